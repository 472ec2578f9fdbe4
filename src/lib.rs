//! pagebleed adds an artificial print bleed to 1-2 page PDFs.
//!
//! Printers cut slightly inside the trim line; if the artwork stops exactly
//! at the page edge, that cut can expose a sliver of unprinted paper. This
//! crate rasterizes each page with PDFium, stretches a thin strip along every
//! edge outward to synthesize a bleed margin, and repacks the results into a
//! new PDF at the original physical scale.
//!
//! ```no_run
//! use pagebleed::{add_bleed, BleedConfig};
//!
//! let input = std::fs::read("flyer.pdf")?;
//! let result = add_bleed(&input, &BleedConfig::default())?;
//! std::fs::write("flyer-with-bleed.pdf", &result.pdf_bytes)?;
//! println!("processed {} page(s)", result.pages_processed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The crate is a pure transformation core: uploads, previews, and downloads
//! are left to the caller, which supplies PDF bytes and receives PDF bytes
//! plus a processed-page count.

pub mod bleed;
mod error;
pub mod pdf;
mod pipeline;

pub use error::BleedError;
pub use pipeline::{
    add_bleed, pages_to_process, BleedConfig, ProcessedDocument, DEFAULT_DPI, DEFAULT_STRETCH_MM,
    DEFAULT_STRIP_MM, MAX_DPI, MIN_DPI,
};
