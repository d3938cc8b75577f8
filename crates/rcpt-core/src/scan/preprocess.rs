//! Receipt photo preparation before OCR.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use tracing::debug;

use rcpt_ocr::{ImageEncoding, ScanImage};

use crate::error::PreprocessError;
use crate::models::config::PreprocessConfig;

/// Prepare raw photo bytes for recognition.
///
/// Oversized photos are downscaled so their longest side fits the
/// configured maximum, optionally pushed through a contrast stretch and
/// binarization pass that leaves pure black text on white, and re-encoded
/// as JPEG. The caller's bytes are never mutated; all intermediate
/// buffers are dropped before this returns.
pub fn prepare(bytes: &[u8], config: &PreprocessConfig) -> Result<ScanImage, PreprocessError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| PreprocessError::Decode(e.to_string()))?;

    let (orig_width, orig_height) = image.dimensions();
    debug!("decoded receipt photo {}x{}", orig_width, orig_height);

    let (width, height) = resize_dimensions(orig_width, orig_height, config.max_dimension);
    let image = if (width, height) != (orig_width, orig_height) {
        debug!("downscaling to {}x{}", width, height);
        image.resize_exact(width, height, FilterType::Lanczos3)
    } else {
        image
    };

    let image = if config.binarize {
        DynamicImage::ImageLuma8(binarize(&image, config))
    } else {
        image
    };

    let mut encoded = Vec::new();
    let quality = (config.jpeg_quality.clamp(0.0, 1.0) * 100.0) as u8;
    let encoder = JpegEncoder::new_with_quality(&mut encoded, quality);
    image
        .write_with_encoder(encoder)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;

    Ok(ScanImage::new(encoded, ImageEncoding::Jpeg, width, height))
}

/// Scale dimensions down so the longest side equals `max_dimension`.
/// Images already within bounds pass through unchanged.
fn resize_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if max_dimension == 0 || longest <= max_dimension {
        return (width, height);
    }

    let scale = max_dimension as f32 / longest as f32;
    if width >= height {
        (
            max_dimension,
            ((height as f32 * scale).round() as u32).max(1),
        )
    } else {
        (
            ((width as f32 * scale).round() as u32).max(1),
            max_dimension,
        )
    }
}

/// Contrast stretch and threshold to pure black/white.
///
/// Luminance uses the Rec. 709 perceptual weights; the stretch pivots
/// around the configured midpoint before the cutoff is applied.
fn binarize(image: &DynamicImage, config: &PreprocessConfig) -> GrayImage {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut out = GrayImage::new(width, height);

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let luminance =
            0.2126 * pixel[0] as f32 + 0.7152 * pixel[1] as f32 + 0.0722 * pixel[2] as f32;
        let stretched = ((luminance - config.contrast_midpoint) * config.contrast_factor
            + config.contrast_midpoint)
            .clamp(0.0, 255.0);
        let value = if stretched >= config.binarize_threshold as f32 {
            255
        } else {
            0
        };
        out.put_pixel(x, y, Luma([value]));
    }

    out
}
