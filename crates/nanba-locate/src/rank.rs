//! Candidate ranking: order contours by enclosed area and keep the
//! largest few.
//!
//! The plate boundary is assumed to be among the largest closed shapes
//! in the edge map, so downstream selection only ever looks at a
//! bounded top-K subset.

use crate::types::Contour;

/// Sort contours by enclosed area, largest first, and retain at most
/// `top_k` of them.
///
/// The sort is stable and area ties keep insertion order, so identical
/// inputs always rank identically run-to-run. A `top_k` of zero yields
/// an empty result rather than an error; callers handle the downstream
/// "no candidate" path uniformly.
#[must_use = "returns the ranked candidates"]
pub fn rank_by_area(contours: Vec<Contour>, top_k: usize) -> Vec<Contour> {
    let mut keyed: Vec<(f64, Contour)> = contours
        .into_iter()
        .map(|contour| (contour.area(), contour))
        .collect();

    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.truncate(top_k);
    keyed.into_iter().map(|(_, contour)| contour).collect()
}
