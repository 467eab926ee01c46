//! Mask rasterization: fill a polygon onto a fresh binary raster.
//!
//! The interior is filled by even-odd scanline traversal and the
//! polygon edges are then rasterized on top, so every pixel strictly
//! inside the polygon and every pixel on its boundary holds 255 and all
//! others hold 0. Boundary pixels land exactly on the polygon edges, so
//! re-tracing the mask and re-approximating recovers an equivalent
//! polygon under the same tolerance.
//!
//! The mask is always freshly allocated; no caller raster is ever
//! mutated.

use image::{GrayImage, Luma};

use crate::types::{Dimensions, Point, Polygon};

/// Fill value for pixels inside or on the polygon.
const FILLED: Luma<u8> = Luma([255]);

/// Rasterize a polygon into a binary mask of the given dimensions.
///
/// Pixels inside the polygon (even-odd rule, sampled at integer pixel
/// positions) and on its edges are set to 255; everything else stays 0.
/// Degenerate polygons still produce their boundary: a two-vertex
/// polygon rasterizes to a line of 255s and a one-vertex polygon to a
/// single pixel. An empty polygon yields an all-zero mask.
#[must_use = "returns the freshly allocated mask"]
pub fn rasterize(polygon: &Polygon, dimensions: Dimensions) -> GrayImage {
    let mut mask = GrayImage::new(dimensions.width, dimensions.height);
    let vertices = polygon.points();
    if vertices.is_empty() || dimensions.width == 0 || dimensions.height == 0 {
        return mask;
    }

    fill_interior(&mut mask, vertices);
    for i in 0..vertices.len() {
        draw_edge(&mut mask, vertices[i], vertices[(i + 1) % vertices.len()]);
    }

    mask
}

/// Even-odd scanline fill of the polygon interior.
///
/// For each pixel row, collects the crossing columns of every non-
/// horizontal edge under a half-open rule (each edge counts its lower
/// endpoint row, not its upper), sorts them, and fills between
/// alternating pairs. The crossing list is rebuilt per row in edge
/// order, so the fill is fully deterministic.
#[allow(clippy::cast_possible_truncation)]
fn fill_interior(mask: &mut GrayImage, vertices: &[Point]) {
    let n = vertices.len();
    if n < 3 {
        return;
    }

    let mut crossings: Vec<f64> = Vec::new();
    for row in 0..mask.height() {
        let y = f64::from(row);
        crossings.clear();

        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let (ar, br) = (f64::from(a.row), f64::from(b.row));
            if (ar <= y && y < br) || (br <= y && y < ar) {
                let t = (y - ar) / (br - ar);
                crossings.push(t.mul_add(f64::from(b.col - a.col), f64::from(a.col)));
            }
        }

        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let from = (pair[0].ceil() as i64).max(0);
            let to = (pair[1].floor() as i64).min(i64::from(mask.width()) - 1);
            for col in from..=to {
                #[allow(clippy::cast_sign_loss)]
                mask.put_pixel(col as u32, row, FILLED);
            }
        }
    }
}

/// Rasterize one polygon edge with Bresenham's line algorithm,
/// endpoints included. Positions outside the mask are skipped.
fn draw_edge(mask: &mut GrayImage, from: Point, to: Point) {
    let dr = (to.row - from.row).abs();
    let dc = (to.col - from.col).abs();
    let step_r = if to.row > from.row { 1 } else { -1 };
    let step_c = if to.col > from.col { 1 } else { -1 };

    let mut err = dc - dr;
    let mut row = from.row;
    let mut col = from.col;

    loop {
        put(mask, row, col);
        if row == to.row && col == to.col {
            break;
        }
        let doubled = 2 * err;
        if doubled > -dr {
            err -= dr;
            col += step_c;
        }
        if doubled < dc {
            err += dc;
            row += step_r;
        }
    }
}

/// Set one mask pixel to 255 if the position is in bounds.
#[allow(clippy::cast_sign_loss)]
fn put(mask: &mut GrayImage, row: i32, col: i32) {
    if row < 0 || col < 0 {
        return;
    }
    let (row, col) = (row as u32, col as u32);
    if row < mask.height() && col < mask.width() {
        mask.put_pixel(col, row, FILLED);
    }
}
