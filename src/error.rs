//! Error taxonomy shared by the rasterizer, bleed transform, and assembler.

use thiserror::Error;

/// Errors that can occur while producing a bleed-extended PDF.
///
/// Every failure is terminal for the request: the transform is deterministic,
/// so retrying with the same input would reproduce the same error, and no
/// partial output document is ever returned.
#[derive(Error, Debug)]
pub enum BleedError {
    #[error("Failed to initialize PDFium: {0}")]
    PdfiumInit(String),

    #[error("Failed to open PDF: {0}")]
    DocumentOpen(String),

    /// The requested page does not exist. `requested` is 1-based so the
    /// message reads naturally for end users.
    #[error("Document has {page_count} pages, but page {requested} was requested")]
    PageOutOfRange { page_count: u32, requested: u32 },

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Invalid bleed geometry: {0}")]
    InvalidGeometry(String),

    /// The edge strips would overlap or exceed the rendered page. Usually
    /// means the DPI is too low for the page size.
    #[error(
        "Edge strip of {strip_px}px does not fit a {width}x{height}px page; \
         increase the resolution or check the page size"
    )]
    StripTooLarge {
        strip_px: u32,
        width: u32,
        height: u32,
    },

    #[error("Image encoding failed: {0}")]
    Encoding(String),

    #[error("Failed to assemble output PDF: {0}")]
    Assembly(String),
}

impl serde::Serialize for BleedError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
