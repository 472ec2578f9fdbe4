//! Request-scoped orchestration: page count → rasterize → bleed → assemble.
//!
//! Everything a request touches lives in this call; there is no shared or
//! ambient state between requests.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::bleed;
use crate::error::BleedError;
use crate::pdf;

/// Width of the edge strip that gets resampled, in millimeters.
pub const DEFAULT_STRIP_MM: f32 = 2.0;
/// Width the strip is stretched to, in millimeters. The net bleed per edge
/// is the difference, 3mm by default.
pub const DEFAULT_STRETCH_MM: f32 = 5.0;
/// Rendering and output resolution.
pub const DEFAULT_DPI: u32 = 300;
/// Lowest resolution a caller may request.
pub const MIN_DPI: u32 = 150;
/// Highest resolution a caller may request.
pub const MAX_DPI: u32 = 600;

/// Geometry and resolution settings for one processing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BleedConfig {
    pub strip_mm: f32,
    pub stretch_mm: f32,
    pub dpi: u32,
}

impl Default for BleedConfig {
    fn default() -> Self {
        Self {
            strip_mm: DEFAULT_STRIP_MM,
            stretch_mm: DEFAULT_STRETCH_MM,
            dpi: DEFAULT_DPI,
        }
    }
}

impl BleedConfig {
    /// Net margin added per edge, in millimeters.
    pub fn bleed_mm(&self) -> f32 {
        self.stretch_mm - self.strip_mm
    }

    fn validate(&self) -> Result<(), BleedError> {
        if !(MIN_DPI..=MAX_DPI).contains(&self.dpi) {
            return Err(BleedError::InvalidGeometry(format!(
                "resolution {} dpi is outside the supported {}-{} dpi range",
                self.dpi, MIN_DPI, MAX_DPI
            )));
        }
        if self.strip_mm <= 0.0 || self.stretch_mm <= 0.0 {
            return Err(BleedError::InvalidGeometry(format!(
                "strip {}mm and stretch {}mm must both be positive",
                self.strip_mm, self.stretch_mm
            )));
        }
        Ok(())
    }
}

/// Result of a processing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// The assembled output PDF.
    pub pdf_bytes: Vec<u8>,
    /// How many pages were processed (1 or 2).
    pub pages_processed: u32,
}

/// How many leading pages of a document get processed.
///
/// A single page is treated as a one-sided job; anything longer is treated
/// as front/back of a two-sided sheet, so pages beyond index 1 are ignored.
pub fn pages_to_process(page_count: u32) -> u32 {
    if page_count == 1 {
        1
    } else {
        2
    }
}

/// Produce a bleed-extended rasterized copy of the first one or two pages of
/// `pdf_bytes`.
///
/// Pages are processed sequentially in document order; any failure aborts
/// the request without producing output.
pub fn add_bleed(pdf_bytes: &[u8], config: &BleedConfig) -> Result<ProcessedDocument, BleedError> {
    config.validate()?;

    let page_count = pdf::page_count(pdf_bytes)?;
    let pages = pages_to_process(page_count);
    log::info!(
        "adding {}mm bleed to {} of {} page(s) at {} dpi",
        config.bleed_mm(),
        pages,
        page_count,
        config.dpi
    );

    let mut processed: Vec<RgbImage> = Vec::with_capacity(pages as usize);
    for index in 0..pages {
        let raster = pdf::rasterize_page(pdf_bytes, index, config.dpi)?;
        let with_bleed =
            bleed::apply_bleed(&raster, config.dpi, config.strip_mm, config.stretch_mm)?;
        log::debug!(
            "page {}: {}x{} -> {}x{}",
            index,
            raster.width(),
            raster.height(),
            with_bleed.width(),
            with_bleed.height()
        );
        processed.push(with_bleed);
    }

    let output = pdf::assemble_pdf(&processed, config.dpi)?;
    Ok(ProcessedDocument {
        pdf_bytes: output,
        pages_processed: pages,
    })
}
