//! Output PDF construction with lopdf.
//!
//! Each processed raster becomes one page whose physical size restores the
//! scale implied by the rendering resolution: `pixels * 72 / dpi` points per
//! axis. The raster is embedded as a single full-page image XObject with its
//! samples stored losslessly under FlateDecode.

use std::io::{Cursor, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::{ImageFormat, RgbImage};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::BleedError;

/// Build a multi-page PDF from the processed rasters, in sequence order.
///
/// All-or-nothing: any encoding or serialization failure aborts the whole
/// document.
pub fn assemble_pdf(images: &[RgbImage], dpi: u32) -> Result<Vec<u8>, BleedError> {
    if images.is_empty() {
        return Err(BleedError::Assembly("no pages to assemble".to_string()));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut page_refs = Vec::with_capacity(images.len());

    for image in images {
        let (width_px, height_px) = image.dimensions();
        let width_pt = width_px as f32 * 72.0 / dpi as f32;
        let height_pt = height_px as f32 * 72.0 / dpi as f32;

        let samples = flate_compress(image.as_raw())?;
        let image_id = doc.add_object(Object::Stream(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width_px as i64,
                "Height" => height_px as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            samples,
        )));

        // Scale the unit image square to the full page rectangle.
        let content = format!("q\n{} 0 0 {} 0 0 cm\n/Im0 Do\nQ", width_pt, height_pt);
        let content_id = doc.add_object(Object::Stream(Stream::new(
            dictionary! {},
            content.into_bytes(),
        )));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width_pt),
                Object::Real(height_pt),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => Object::Reference(image_id) },
            },
        });
        page_refs.push(page_id);
    }

    let kids = page_refs
        .iter()
        .map(|&id| Object::Reference(id))
        .collect::<Vec<_>>();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => page_refs.len() as i64,
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| BleedError::Assembly(e.to_string()))?;
    log::debug!(
        "assembled {} page(s) into a {} byte PDF",
        images.len(),
        buffer.len()
    );
    Ok(buffer)
}

/// Lossless PNG encoding of a processed page, for caller-side previews.
pub fn preview_png(image: &RgbImage) -> Result<Vec<u8>, BleedError> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| BleedError::Encoding(e.to_string()))?;
    Ok(png)
}

fn flate_compress(data: &[u8]) -> Result<Vec<u8>, BleedError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| BleedError::Encoding(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| BleedError::Encoding(e.to_string()))
}
