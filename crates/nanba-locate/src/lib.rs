//! nanba-locate: Pure license-plate localization pipeline (sans-IO).
//!
//! Reduces a binary edge raster to the quadrilateral most consistent
//! with a license plate and cuts that region out of the source scene:
//! boundary tracing -> area ranking -> polygon approximation ->
//! quadrilateral selection -> mask rasterization -> region extraction.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! rasters and returns structured data. Image decoding and edge
//! detection live in [`preprocess`] as upstream collaborator wrappers;
//! character recognition is an external engine behind the [`ocr`]
//! contract.
//!
//! Every operation is synchronous and deterministic: identical rasters
//! and parameters produce bit-identical output, and no state survives a
//! call. Independent rasters may therefore be processed concurrently by
//! the caller without coordination.

pub mod approx;
pub mod extract;
pub mod ocr;
pub mod preprocess;
pub mod rank;
pub mod rasterize;
pub mod select;
pub mod trace;
pub mod types;

pub use select::{PlateCriterion, PlateCriterionKind};
pub use types::{
    BoundingBox, Contour, Dimensions, GrayImage, LocateConfig, LocateError, PlateRegion, Point,
    Polygon, RgbImage,
};

/// Locate the plate-candidate polygon in a binary edge raster.
///
/// Traces every closed boundary, ranks the contours by enclosed area,
/// and takes the first of the top `config.top_k` whose approximation at
/// `config.epsilon` satisfies the configured criterion (by default:
/// exactly 4 vertices, first match wins).
///
/// The returned polygon's vertices are ordered by boundary traversal
/// direction, so its first and third points are opposite corners,
/// directly usable as a rectangle primitive by a rendering stage.
///
/// # Errors
///
/// Returns [`LocateError::EmptyInput`] for a zero-area raster and
/// [`LocateError::NoCandidateFound`] when no ranked candidate satisfies
/// the criterion. The latter is recoverable: retry with a different
/// `epsilon` or `top_k` without re-acquiring the raster.
pub fn locate(edges: &GrayImage, config: &LocateConfig) -> Result<Polygon, LocateError> {
    let contours = trace::trace_contours(edges)?;
    let ranked = rank::rank_by_area(contours, config.top_k);
    select::select(&ranked, config.epsilon, &config.criterion)
}

/// Extract the plate region selected by [`locate`] from a source raster.
///
/// Rasterizes the polygon into a fresh binary mask of the source's
/// dimensions, derives the tight bounding box of the mask's filled
/// pixels, and slices that box out of the source. The source is
/// typically the grayscale original of the same scene as the edge
/// raster; the crop is what a text-recognition engine consumes.
///
/// # Errors
///
/// Returns [`LocateError::EmptyMask`] if the polygon rasterizes to
/// nothing (possible when every vertex lies outside the raster) and
/// [`LocateError::OutOfBounds`] if the derived box does not fit the
/// source; neither occurs when the polygon came from [`locate`] on an
/// edge raster of the same dimensions.
pub fn extract_region(source: &GrayImage, polygon: &Polygon) -> Result<PlateRegion, LocateError> {
    let dimensions = Dimensions {
        width: source.width(),
        height: source.height(),
    };
    let mask = rasterize::rasterize(polygon, dimensions);
    let bounding_box = extract::bounding_box_of(&mask)?;
    let crop = extract::crop(source, &bounding_box)?;
    Ok(PlateRegion {
        mask,
        bounding_box,
        crop,
    })
}
