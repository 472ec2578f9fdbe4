//! PDF input/output boundary: pdfium-backed page rasterization on the way
//! in, lopdf document construction on the way out.

mod assembler;
mod rasterizer;

pub use assembler::{assemble_pdf, preview_png};
pub use rasterizer::{page_count, rasterize_page, target_pixel_size};
