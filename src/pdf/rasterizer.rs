//! Page rasterization using pdfium-render.
//!
//! Note: pdfium-render's Pdfium struct is not Send+Sync, so we create
//! instances on-demand within each operation rather than storing them in
//! shared state. Document handles live only for the duration of a single
//! call and are released on every exit path.

use image::RgbImage;
use pdfium_render::prelude::*;

use crate::error::BleedError;

/// Bind to the PDFium library and return a usable Pdfium instance.
///
/// Tries a platform-named library in the working directory first, then the
/// system library.
fn bind_pdfium() -> Result<Pdfium, BleedError> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| BleedError::PdfiumInit(e.to_string()))?;
    log::debug!("bound to PDFium");
    Ok(Pdfium::new(bindings))
}

/// Number of pages in the PDF byte buffer.
pub fn page_count(bytes: &[u8]) -> Result<u32, BleedError> {
    let pdfium = bind_pdfium()?;
    let doc = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| BleedError::DocumentOpen(e.to_string()))?;
    Ok(doc.pages().len() as u32)
}

/// Target raster size in pixels for a page of the given physical size.
///
/// PDF points are 1/72 inch, so a page renders at `points * dpi / 72` pixels
/// per axis, rounded to the nearest pixel.
pub fn target_pixel_size(width_pts: f32, height_pts: f32, dpi: u32) -> (u32, u32) {
    let scale = dpi as f32 / 72.0;
    (
        (width_pts * scale).round() as u32,
        (height_pts * scale).round() as u32,
    )
}

/// Render one page of the PDF byte buffer to an RGB raster at `dpi`.
///
/// Any alpha the renderer produces is flattened against the default white
/// page background before the raster is returned.
pub fn rasterize_page(bytes: &[u8], page_index: u32, dpi: u32) -> Result<RgbImage, BleedError> {
    let pdfium = bind_pdfium()?;
    let doc = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| BleedError::DocumentOpen(e.to_string()))?;

    let page_count = doc.pages().len() as u32;
    if page_index >= page_count {
        return Err(BleedError::PageOutOfRange {
            page_count,
            requested: page_index + 1,
        });
    }

    let page = doc
        .pages()
        .get(page_index as u16)
        .map_err(|e| BleedError::Render(e.to_string()))?;

    let (width_px, height_px) = target_pixel_size(page.width().value, page.height().value, dpi);
    let width: i32 = width_px
        .try_into()
        .map_err(|_| BleedError::Render(format!("page width {}px exceeds i32 range", width_px)))?;
    let height: i32 = height_px.try_into().map_err(|_| {
        BleedError::Render(format!("page height {}px exceeds i32 range", height_px))
    })?;

    let config = PdfRenderConfig::new()
        .set_target_width(width)
        .set_target_height(height)
        .render_form_data(true)
        .render_annotations(true);

    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| BleedError::Render(e.to_string()))?;

    let image = bitmap.as_image().into_rgb8();
    log::debug!(
        "rendered page {} at {}x{}px ({} dpi)",
        page_index,
        image.width(),
        image.height(),
        dpi
    );
    Ok(image)
}
