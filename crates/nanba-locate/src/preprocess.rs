//! Upstream collaborator stages: decode, grayscale, blur, edge detection.
//!
//! Localization consumes a binary edge raster it does not produce. These
//! wrappers supply that input for callers that start from raw image
//! bytes: decode -> grayscale -> Gaussian blur -> Canny. The core pipeline
//! never calls into this module; only drivers and the CLI do.

use image::{GrayImage, RgbImage};

use crate::types::LocateError;

/// Minimum allowed Canny threshold.
///
/// A low threshold of zero treats every pixel with any gradient as a
/// potential edge, producing an edge map dense enough to overwhelm
/// contour tracing.
pub const MIN_THRESHOLD: f32 = 1.0;
const _: () = assert!(MIN_THRESHOLD > 0.0);

/// Decode raw image bytes (PNG, JPEG, BMP, WebP) into a color raster.
///
/// # Errors
///
/// Returns [`LocateError::EmptyInput`] if `bytes` is empty and
/// [`LocateError::ImageDecode`] if the format is unrecognized or the
/// data is corrupt.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, LocateError> {
    if bytes.is_empty() {
        return Err(LocateError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

/// Convert a color raster to grayscale with the standard luminance
/// weighting (`0.299*R + 0.587*G + 0.114*B`).
#[must_use = "returns the grayscale image"]
pub fn grayscale(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}

/// Apply Gaussian blur to a grayscale raster for noise reduction ahead
/// of edge detection.
///
/// Higher `sigma` values produce more smoothing. Non-positive sigma
/// values return the image unchanged, since `imageproc`'s underlying
/// function panics on `sigma <= 0.0`.
#[must_use = "returns the blurred image"]
pub fn gaussian_blur(image: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 {
        return image.clone();
    }

    imageproc::filter::gaussian_blur_f32(image, sigma)
}

/// Detect edges with the Canny algorithm.
///
/// Returns a binary raster: 255 for edge pixels, 0 for non-edge --
/// exactly the input shape [`trace_contours`](crate::trace::trace_contours)
/// expects. Both thresholds are clamped to a minimum of
/// [`MIN_THRESHOLD`] and `low_threshold` is clamped to at most
/// `high_threshold`.
#[must_use = "returns the binary edge map"]
pub fn canny(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let high = high_threshold.max(MIN_THRESHOLD);
    let low = low_threshold.max(MIN_THRESHOLD).min(high);
    imageproc::edges::canny(image, low, high)
}
