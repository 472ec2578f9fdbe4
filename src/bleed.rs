//! Bleed synthesis: stretches a thin strip along each page edge outward so
//! that trim-line cuts landing slightly inside the page never expose
//! unprinted paper.
//!
//! The transform runs in two passes, vertical first and then horizontal on
//! the vertical result. The pass order is load-bearing: fusing both axes into
//! a single 2D resize would produce different corner pixels.

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::error::BleedError;

/// Millimeters per inch, for DPI conversions.
const MM_PER_INCH: f32 = 25.4;

/// Convert a physical length in millimeters to pixels at the given resolution.
pub fn mm_to_px(mm: f32, dpi: u32) -> u32 {
    (mm * dpi as f32 / MM_PER_INCH).round() as u32
}

/// Stretch the edge strips of `image` to synthesize a bleed margin.
///
/// A `strip_mm` wide band along each edge is resampled (Catmull-Rom) to
/// `stretch_mm`, so the image grows by `stretch - strip` pixels per edge while
/// the interior stays byte-identical. Deterministic: the same input always
/// yields the same output buffer.
pub fn apply_bleed(
    image: &RgbImage,
    dpi: u32,
    strip_mm: f32,
    stretch_mm: f32,
) -> Result<RgbImage, BleedError> {
    let (width, height) = image.dimensions();
    let strip_px = mm_to_px(strip_mm, dpi);
    let stretch_px = mm_to_px(stretch_mm, dpi);

    if strip_px == 0 || stretch_px == 0 {
        return Err(BleedError::InvalidGeometry(format!(
            "strip {}mm / stretch {}mm round to {}px / {}px at {} dpi; both must be at least 1px",
            strip_mm, stretch_mm, strip_px, stretch_px, dpi
        )));
    }

    if strip_px * 2 >= height || strip_px * 2 >= width {
        return Err(BleedError::StripTooLarge {
            strip_px,
            width,
            height,
        });
    }

    let vertical = stretch_vertical(image, strip_px, stretch_px);
    Ok(stretch_horizontal(&vertical, strip_px, stretch_px))
}

/// Vertical pass: resample the top and bottom strips to `stretch_px` rows and
/// restack them around the untouched middle rows.
fn stretch_vertical(image: &RgbImage, strip_px: u32, stretch_px: u32) -> RgbImage {
    let (width, height) = image.dimensions();

    let top = imageops::crop_imm(image, 0, 0, width, strip_px).to_image();
    let top = imageops::resize(&top, width, stretch_px, FilterType::CatmullRom);

    let middle = imageops::crop_imm(image, 0, strip_px, width, height - 2 * strip_px).to_image();

    let bottom = imageops::crop_imm(image, 0, height - strip_px, width, strip_px).to_image();
    let bottom = imageops::resize(&bottom, width, stretch_px, FilterType::CatmullRom);

    let mut out = RgbImage::new(width, stretch_px + middle.height() + stretch_px);
    imageops::replace(&mut out, &top, 0, 0);
    imageops::replace(&mut out, &middle, 0, stretch_px as i64);
    imageops::replace(&mut out, &bottom, 0, (stretch_px + middle.height()) as i64);
    out
}

/// Horizontal pass: same restack, on columns.
fn stretch_horizontal(image: &RgbImage, strip_px: u32, stretch_px: u32) -> RgbImage {
    let (width, height) = image.dimensions();

    let left = imageops::crop_imm(image, 0, 0, strip_px, height).to_image();
    let left = imageops::resize(&left, stretch_px, height, FilterType::CatmullRom);

    let middle = imageops::crop_imm(image, strip_px, 0, width - 2 * strip_px, height).to_image();

    let right = imageops::crop_imm(image, width - strip_px, 0, strip_px, height).to_image();
    let right = imageops::resize(&right, stretch_px, height, FilterType::CatmullRom);

    let mut out = RgbImage::new(stretch_px + middle.width() + stretch_px, height);
    imageops::replace(&mut out, &left, 0, 0);
    imageops::replace(&mut out, &middle, stretch_px as i64, 0);
    imageops::replace(&mut out, &right, (stretch_px + middle.width()) as i64, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic non-uniform test image so resampling and stacking bugs
    /// show up as pixel differences.
    fn gradient_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                (x * 7 % 256) as u8,
                (y * 13 % 256) as u8,
                ((x + y) * 3 % 256) as u8,
            ])
        })
    }

    #[test]
    fn test_mm_to_px_defaults_at_300_dpi() {
        assert_eq!(mm_to_px(2.0, 300), 24);
        assert_eq!(mm_to_px(5.0, 300), 59);
    }

    #[test]
    fn test_mm_to_px_rounds_to_zero_at_tiny_sizes() {
        assert_eq!(mm_to_px(0.01, 300), 0);
    }

    #[test]
    fn test_output_dimensions_grow_by_twice_the_bleed() {
        let img = gradient_image(100, 80);
        // strip 24px, stretch 59px at 300 dpi: +35px per edge
        let out = apply_bleed(&img, 300, 2.0, 5.0).unwrap();
        assert_eq!(out.dimensions(), (100 + 70, 80 + 70));
    }

    #[test]
    fn test_apply_bleed_is_deterministic() {
        let img = gradient_image(120, 90);
        let a = apply_bleed(&img, 300, 2.0, 5.0).unwrap();
        let b = apply_bleed(&img, 300, 2.0, 5.0).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_middle_region_is_untouched() {
        let img = gradient_image(100, 80);
        let strip = mm_to_px(2.0, 300);
        let stretch = mm_to_px(5.0, 300);
        let out = apply_bleed(&img, 300, 2.0, 5.0).unwrap();

        // Interior pixel (x, y) of the input lands at (x - strip + stretch,
        // y - strip + stretch) in the output, byte for byte.
        let offset = stretch - strip;
        for y in strip..80 - strip {
            for x in strip..100 - strip {
                assert_eq!(
                    img.get_pixel(x, y),
                    out.get_pixel(x + offset, y + offset),
                    "interior pixel moved or was resampled at ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_low_dpi_small_image_still_works() {
        // strip 2mm at 10 dpi rounds to 1px; 2*1 < 100 so this must succeed
        let img = gradient_image(100, 100);
        let out = apply_bleed(&img, 10, 2.0, 5.0).unwrap();
        let grow = 2 * (mm_to_px(5.0, 10) - mm_to_px(2.0, 10));
        assert_eq!(out.dimensions(), (100 + grow, 100 + grow));
    }

    #[test]
    fn test_single_pixel_image_fails_with_strip_too_large() {
        let img = gradient_image(1, 1);
        let err = apply_bleed(&img, 10, 2.0, 5.0).unwrap_err();
        assert!(matches!(err, BleedError::StripTooLarge { strip_px: 1, .. }));
    }

    #[test]
    fn test_strip_covering_whole_axis_fails() {
        // strip 24px at 300 dpi; 2*24 >= 40
        let img = gradient_image(200, 40);
        let err = apply_bleed(&img, 300, 2.0, 5.0).unwrap_err();
        assert!(matches!(err, BleedError::StripTooLarge { .. }));
    }

    #[test]
    fn test_zero_pixel_strip_fails_with_invalid_geometry() {
        let img = gradient_image(100, 100);
        let err = apply_bleed(&img, 300, 0.01, 5.0).unwrap_err();
        assert!(matches!(err, BleedError::InvalidGeometry(_)));
    }
}
