//! Plate selection: pick the first ranked candidate whose approximation
//! looks like a plate.
//!
//! This module defines the [`PlateCriterion`] trait for pluggable shape
//! tests and the [`PlateCriterionKind`] enum for selecting which test to
//! use at runtime.
//!
//! # Strategy pattern
//!
//! The shipped criterion accepts the first candidate whose approximation
//! has exactly 4 vertices. That conflates "looks rectangular" with "is
//! the plate": convexity, edge-length ratio, and angle orthogonality are
//! never checked, so false positives are possible and callers should
//! treat the selection as a heuristic. Keeping the test behind a trait
//! lets a stricter rectangularity criterion slot in without touching the
//! tracer or the approximator.

use serde::{Deserialize, Serialize};

use crate::approx;
use crate::types::{Contour, LocateError, Polygon};

/// Selects which candidate-acceptance test to use.
///
/// Ships with [`FourVertices`](Self::FourVertices) only. Additional
/// variants (e.g. a convexity or aspect-ratio gate) can be added without
/// changing the `LocateConfig` struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlateCriterionKind {
    /// Accept any approximation with exactly 4 vertices.
    #[default]
    FourVertices,
}

/// Trait for candidate-acceptance strategies.
///
/// Input: one approximated candidate polygon.
/// Output: whether the selector should stop and take it.
pub trait PlateCriterion {
    /// Whether `polygon` is consistent with a license plate.
    fn matches(&self, polygon: &Polygon) -> bool;
}

impl PlateCriterion for PlateCriterionKind {
    fn matches(&self, polygon: &Polygon) -> bool {
        match *self {
            Self::FourVertices => polygon.vertex_count() == 4,
        }
    }
}

/// Walk the ranked candidates in order, approximate each with the given
/// tolerance, and take the first whose approximation satisfies the
/// criterion.
///
/// The search is a three-state machine: it starts `Searching` over the
/// ranked list, and terminates either `Found` (the returned polygon --
/// first match wins, later 4-vertex candidates are never examined) or
/// `Exhausted` (the [`LocateError::NoCandidateFound`] error).
///
/// # Errors
///
/// Returns [`LocateError::NoCandidateFound`] when the candidate list is
/// exhausted without a match. The condition is recoverable: callers may
/// retry with a different tolerance or a larger ranked subset without
/// re-acquiring the raster.
pub fn select<C: PlateCriterion>(
    candidates: &[Contour],
    epsilon: f64,
    criterion: &C,
) -> Result<Polygon, LocateError> {
    for candidate in candidates {
        let approximation = approx::approximate(candidate, epsilon);
        if criterion.matches(&approximation) {
            return Ok(approximation);
        }
    }
    Err(LocateError::NoCandidateFound)
}
