//! Polygon approximation using the Ramer-Douglas-Peucker algorithm on
//! closed curves.
//!
//! A closed contour has no natural endpoints, so the recursion anchors
//! on a pair of loop points instead: the contour's first point and the
//! point farthest from it. The loop is split into two open chains
//! between the anchors and classic RDP runs on each. Anchor choice
//! depends only on the input geometry, never on the tolerance, so
//! raising the tolerance can only shrink the output vertex set.

use crate::types::{Contour, Point, Polygon};

/// Approximate a closed contour with a simpler polygon.
///
/// Vertices within `epsilon` raster units of the chord between their
/// surviving neighbors are removed; a larger `epsilon` yields a coarser
/// polygon. Negative tolerances are treated as 0, which preserves every
/// direction-change vertex.
///
/// The output vertex count is data-dependent and may be less than 3 for
/// degenerate contours (single points, lines, or loops collapsed by a
/// large tolerance). Callers that need a specific vertex count must
/// check [`Polygon::vertex_count`] explicitly.
#[must_use = "returns the approximated polygon"]
pub fn approximate(contour: &Contour, epsilon: f64) -> Polygon {
    let points = contour.points();
    if points.len() < 3 {
        return Polygon::new(points.to_vec());
    }

    let tolerance = epsilon.max(0.0);
    let far = farthest_from_first(points);

    // Forward chain: first anchor to far anchor.
    let forward = &points[..=far];
    let mut kept_forward = vec![false; forward.len()];
    kept_forward[0] = true;
    kept_forward[forward.len() - 1] = true;
    rdp_recurse(forward, 0, forward.len() - 1, tolerance, &mut kept_forward);

    // Return chain: far anchor around the loop back to the first anchor.
    let wrapped: Vec<Point> = points[far..]
        .iter()
        .chain(std::iter::once(&points[0]))
        .copied()
        .collect();
    let mut kept_wrapped = vec![false; wrapped.len()];
    kept_wrapped[0] = true;
    kept_wrapped[wrapped.len() - 1] = true;
    rdp_recurse(&wrapped, 0, wrapped.len() - 1, tolerance, &mut kept_wrapped);

    // Merge in traversal order; the wrapped chain's endpoints duplicate
    // the two anchors and are skipped.
    let mut vertices: Vec<Point> = Vec::new();
    for (point, kept) in forward.iter().zip(&kept_forward) {
        if *kept {
            vertices.push(*point);
        }
    }
    for i in 1..wrapped.len() - 1 {
        if kept_wrapped[i] {
            vertices.push(wrapped[i]);
        }
    }

    Polygon::new(vertices)
}

/// Index of the point farthest from the first point of the loop.
///
/// Exact integer distances; ties resolve to the lowest index, so the
/// anchor pair is fully deterministic.
fn farthest_from_first(points: &[Point]) -> usize {
    let first = points[0];
    let mut best_distance = 0;
    let mut best_index = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let d = first.distance_squared(*p);
        if d > best_distance {
            best_distance = d;
            best_index = i;
        }
    }
    best_index
}

/// Recursive step of the Ramer-Douglas-Peucker algorithm on an open
/// chain.
///
/// Finds the point between `start` and `end` farthest from the chord
/// between them. If that distance exceeds `tolerance`, the point is
/// kept and both sub-chains are processed recursively; otherwise every
/// intermediate point is discarded.
fn rdp_recurse(points: &[Point], start: usize, end: usize, tolerance: f64, kept: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut max_dist = 0.0;
    let mut max_idx = start;

    for i in (start + 1)..end {
        let d = perpendicular_distance(points[i], points[start], points[end]);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        kept[max_idx] = true;
        rdp_recurse(points, start, max_idx, tolerance, kept);
        rdp_recurse(points, max_idx, end, tolerance, kept);
    }
}

/// Perpendicular distance from point `p` to the line through `a` and `b`.
///
/// Uses `|cross(b-a, p-a)| / |b-a|`. When `a` and `b` coincide, falls
/// back to the distance from `p` to `a`.
#[allow(clippy::cast_precision_loss)]
fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = f64::from(b.col - a.col);
    let dy = f64::from(b.row - a.row);
    let length_sq = dx.mul_add(dx, dy * dy);

    if length_sq == 0.0 {
        return (a.distance_squared(p) as f64).sqrt();
    }

    let cross = dx.mul_add(
        f64::from(a.row - p.row),
        -(dy * f64::from(a.col - p.col)),
    );
    cross.abs() / length_sq.sqrt()
}
