//! The text-recognition contract at the downstream edge of the
//! pipeline.
//!
//! Reading characters off the cropped plate is an external concern;
//! this module only fixes the interface an engine must present so the
//! crop produced by [`extract`](crate::extract) can be handed over
//! without either side knowing the other's internals. No engine ships
//! with this crate.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::types::Point;

/// One recognized piece of text inside a plate crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextReading {
    /// Quadrilateral around the text, in crop coordinates, in the
    /// engine's traversal order.
    pub region: [Point; 4],
    /// The recognized text.
    pub text: String,
    /// Engine confidence in `[0, 1]`.
    pub confidence: f32,
}

/// Errors an engine may report while reading a crop.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    /// The crop was unusable (wrong size, empty, unreadable).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The engine itself failed.
    #[error("engine error: {0}")]
    EngineError(String),
}

/// Trait for plate-reading engines.
///
/// Input: the grayscale crop produced by region extraction.
/// Output: recognized readings in the engine's order (typically
/// top-to-bottom), possibly empty when the crop holds no legible text.
pub trait PlateReader {
    /// Read text from a cropped plate raster.
    ///
    /// # Errors
    ///
    /// Implementations report engine-specific failures as [`OcrError`].
    fn read_text(&self, crop: &GrayImage) -> Result<Vec<TextReading>, OcrError>;
}
