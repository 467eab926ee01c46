//! Shared types for the nanba localization pipeline.

use serde::{Deserialize, Serialize};

use crate::select::PlateCriterionKind;

/// Re-export `GrayImage` so downstream crates can reference
/// single-channel raster data without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbImage` so downstream crates can reference the
/// original color raster without depending on `image` directly.
pub use image::RgbImage;

/// A raster grid position: 0-indexed `(row, column)`, row grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Row index (pixels from the top edge).
    pub row: i32,
    /// Column index (pixels from the left edge).
    pub col: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Exact integer arithmetic, so comparisons are free of
    /// floating-point tie-break surprises.
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> i64 {
        let dr = (self.row - other.row) as i64;
        let dc = (self.col - other.col) as i64;
        dr * dr + dc * dc
    }
}

/// An ordered, implicitly closed sequence of points tracing one
/// connected boundary: the last point connects back to the first.
///
/// Insertion order matters: it records traversal direction and fixes
/// the starting point for polygon approximation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour(Vec<Point>);

impl Contour {
    /// Create a new contour from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the contour has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the contour.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the contour and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Enclosed area of the closed point sequence (shoelace formula,
    /// absolute value).
    ///
    /// Degenerate contours (fewer than 3 points, or all points on one
    /// line) have area 0.
    #[must_use]
    pub fn area(&self) -> f64 {
        shoelace_area(&self.0)
    }
}

/// A contour reduced to its essential vertices.
///
/// Vertex count is data-dependent: callers that require a specific
/// count (the plate selector wants exactly 4) must check it explicitly
/// rather than assume at least 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon(Vec<Point>);

impl Polygon {
    /// Create a new polygon from a vector of vertices.
    #[must_use]
    pub const fn new(vertices: Vec<Point>) -> Self {
        Self(vertices)
    }

    /// Returns the number of vertices.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all vertices in traversal order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polygon and returns the underlying vertex vector.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Enclosed area of the closed vertex sequence (shoelace formula,
    /// absolute value).
    #[must_use]
    pub fn area(&self) -> f64 {
        shoelace_area(&self.0)
    }
}

/// Shoelace area of a closed integer point sequence.
///
/// Accumulates the signed double-area exactly in `i64`, then halves in
/// `f64`, so identical inputs always produce bit-identical results.
#[allow(clippy::cast_precision_loss)]
fn shoelace_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice: i64 = 0;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        twice += i64::from(p.col) * i64::from(q.row) - i64::from(q.col) * i64::from(p.row);
    }

    (twice.abs() as f64) / 2.0
}

/// Raster dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Tight axis-aligned rectangle, inclusive on both ends.
///
/// Invariant: `row_min <= row_max` and `col_min <= col_max`. Boxes
/// produced by [`extract::bounding_box_of`](crate::extract::bounding_box_of)
/// always satisfy it; [`extract::crop`](crate::extract::crop) re-checks
/// defensively because callers may construct boxes by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Topmost row containing a filled pixel.
    pub row_min: u32,
    /// Leftmost column containing a filled pixel.
    pub col_min: u32,
    /// Bottommost row containing a filled pixel.
    pub row_max: u32,
    /// Rightmost column containing a filled pixel.
    pub col_max: u32,
}

impl BoundingBox {
    /// Height in pixels (inclusive bounds, so `row_max - row_min + 1`).
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.row_max - self.row_min + 1
    }

    /// Width in pixels (inclusive bounds, so `col_max - col_min + 1`).
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.col_max - self.col_min + 1
    }
}

/// Configuration for plate localization.
///
/// The defaults come from the reference tuning and are untuned magic
/// constants, not guaranteed-correct thresholds: callers working at
/// other image resolutions should adjust `epsilon` (and possibly
/// `top_k`) per image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocateConfig {
    /// Ramer-Douglas-Peucker approximation tolerance in raster units.
    /// Larger values yield fewer vertices (coarser approximation).
    pub epsilon: f64,

    /// Number of largest-area contours to consider as candidates.
    /// Zero yields no candidates, which surfaces as
    /// [`LocateError::NoCandidateFound`].
    pub top_k: usize,

    /// Which shape criterion a candidate approximation must satisfy.
    pub criterion: PlateCriterionKind,
}

impl LocateConfig {
    /// Default approximation tolerance in raster units.
    pub const DEFAULT_EPSILON: f64 = 10.0;

    /// Default number of ranked candidates to consider.
    pub const DEFAULT_TOP_K: usize = 10;
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
            top_k: Self::DEFAULT_TOP_K,
            criterion: PlateCriterionKind::default(),
        }
    }
}

/// Result of localizing and extracting a plate region from one raster.
///
/// Owned by the caller once returned; the pipeline holds no state
/// across invocations.
#[derive(Debug, Clone)]
pub struct PlateRegion {
    /// Binary mask, 255 inside and on the selected polygon, 0 elsewhere.
    pub mask: GrayImage,
    /// Tightest axis-aligned rectangle enclosing the mask's filled pixels.
    pub bounding_box: BoundingBox,
    /// The bounding-box slice of the source raster.
    pub crop: GrayImage,
}

/// Errors that can occur during localization and extraction.
///
/// All variants are recoverable conditions reported to the immediate
/// caller; a [`NoCandidateFound`](Self::NoCandidateFound) in particular
/// should be surfaced as "localization failed" so the caller can retry
/// with an adjusted tolerance or candidate count.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// The input raster (or byte buffer) has zero area.
    #[error("input raster has zero area")]
    EmptyInput,

    /// Every ranked candidate was approximated without producing a
    /// polygon that satisfies the plate criterion.
    #[error("no plate-like candidate found among ranked contours")]
    NoCandidateFound,

    /// A bounding box was requested for a mask with no filled pixels.
    #[error("mask contains no filled pixels")]
    EmptyMask,

    /// The crop box extends past the raster's edge.
    #[error("crop box {bounds:?} exceeds raster dimensions {raster:?}")]
    OutOfBounds {
        /// The rejected crop box.
        bounds: BoundingBox,
        /// The raster it was applied to.
        raster: Dimensions,
    },

    /// A source raster and mask of different sizes were combined.
    #[error("raster dimensions {raster:?} do not match mask dimensions {mask:?}")]
    DimensionMismatch {
        /// The source raster's dimensions.
        raster: Dimensions,
        /// The mask's dimensions.
        mask: Dimensions,
    },

    /// Failed to decode the input image bytes.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_new() {
        let p = Point::new(3, 4);
        assert_eq!(p.row, 3);
        assert_eq!(p.col, 4);
    }

    #[test]
    fn point_distance_squared() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(b.distance_squared(a), 25);
    }

    #[test]
    fn point_distance_to_self_is_zero() {
        let p = Point::new(7, 11);
        assert_eq!(p.distance_squared(p), 0);
    }

    // --- Contour tests ---

    #[test]
    fn contour_new_and_len() {
        let c = Contour::new(vec![Point::new(0, 0), Point::new(1, 1)]);
        assert_eq!(c.len(), 2);
        assert!(!c.is_empty());
    }

    #[test]
    fn contour_empty() {
        let c = Contour::new(vec![]);
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!((c.area()).abs() < f64::EPSILON);
    }

    #[test]
    fn contour_square_area() {
        // 4x4 square: corners (0,0) (0,4) (4,4) (4,0), area 16.
        let c = Contour::new(vec![
            Point::new(0, 0),
            Point::new(0, 4),
            Point::new(4, 4),
            Point::new(4, 0),
        ]);
        assert!((c.area() - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn contour_area_is_orientation_independent() {
        let clockwise = Contour::new(vec![
            Point::new(0, 0),
            Point::new(0, 4),
            Point::new(4, 4),
            Point::new(4, 0),
        ]);
        let counter = Contour::new(vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ]);
        assert!((clockwise.area() - counter.area()).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_contour_has_zero_area() {
        // Two points: a closed "line" contour encloses nothing.
        let line = Contour::new(vec![Point::new(2, 1), Point::new(2, 5)]);
        assert!((line.area()).abs() < f64::EPSILON);

        // Three collinear points likewise.
        let collinear = Contour::new(vec![
            Point::new(0, 0),
            Point::new(0, 3),
            Point::new(0, 6),
        ]);
        assert!((collinear.area()).abs() < f64::EPSILON);
    }

    #[test]
    fn contour_triangle_area() {
        // Right triangle with legs 4 and 6: area 12.
        let c = Contour::new(vec![
            Point::new(0, 0),
            Point::new(0, 6),
            Point::new(4, 0),
        ]);
        assert!((c.area() - 12.0).abs() < f64::EPSILON);
    }

    // --- Polygon tests ---

    #[test]
    fn polygon_vertex_count() {
        let p = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(0, 4),
            Point::new(4, 4),
            Point::new(4, 0),
        ]);
        assert_eq!(p.vertex_count(), 4);
        assert!((p.area() - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn polygon_into_points_preserves_order() {
        let vertices = vec![Point::new(1, 2), Point::new(3, 4), Point::new(5, 6)];
        let p = Polygon::new(vertices.clone());
        assert_eq!(p.into_points(), vertices);
    }

    // --- BoundingBox tests ---

    #[test]
    fn bounding_box_dimensions_are_inclusive() {
        let b = BoundingBox {
            row_min: 20,
            col_min: 10,
            row_max: 50,
            col_max: 80,
        };
        assert_eq!(b.height(), 31);
        assert_eq!(b.width(), 71);
    }

    #[test]
    fn single_pixel_bounding_box() {
        let b = BoundingBox {
            row_min: 5,
            col_min: 7,
            row_max: 5,
            col_max: 7,
        };
        assert_eq!(b.height(), 1);
        assert_eq!(b.width(), 1);
    }

    // --- LocateConfig tests ---

    #[test]
    fn config_defaults_match_reference_tuning() {
        let config = LocateConfig::default();
        assert!((config.epsilon - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.criterion, PlateCriterionKind::FourVertices);
    }

    // --- LocateError tests ---

    #[test]
    fn error_empty_input_display() {
        assert_eq!(
            LocateError::EmptyInput.to_string(),
            "input raster has zero area",
        );
    }

    #[test]
    fn error_no_candidate_display() {
        assert_eq!(
            LocateError::NoCandidateFound.to_string(),
            "no plate-like candidate found among ranked contours",
        );
    }

    #[test]
    fn error_empty_mask_display() {
        assert_eq!(
            LocateError::EmptyMask.to_string(),
            "mask contains no filled pixels",
        );
    }

    // --- Serde round-trip tests ---

    #[test]
    #[allow(clippy::unwrap_used)]
    fn point_serde_round_trip() {
        let p = Point::new(-3, 12);
        let json = serde_json::to_string(&p).unwrap();
        let deserialized: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deserialized);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn contour_serde_round_trip() {
        let c = Contour::new(vec![Point::new(0, 0), Point::new(1, 2), Point::new(3, 0)]);
        let json = serde_json::to_string(&c).unwrap();
        let deserialized: Contour = serde_json::from_str(&json).unwrap();
        assert_eq!(c, deserialized);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn bounding_box_serde_round_trip() {
        let b = BoundingBox {
            row_min: 1,
            col_min: 2,
            row_max: 3,
            col_max: 4,
        };
        let json = serde_json::to_string(&b).unwrap();
        let deserialized: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(b, deserialized);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn config_serde_round_trip() {
        let config = LocateConfig {
            epsilon: 4.5,
            top_k: 3,
            criterion: PlateCriterionKind::FourVertices,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: LocateConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
