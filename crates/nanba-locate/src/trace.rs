//! Boundary tracing: extract closed contours from a binary raster.
//!
//! Implements Moore-neighbor border following with 8-connectivity over a
//! binary raster (non-zero = foreground). A raster scan finds the first
//! unvisited border pixel of each connected boundary and walks clockwise
//! around it until the walk returns to its start. Traced contours are
//! compressed: collinear intermediate points along straight runs are
//! dropped, keeping only direction-change vertices.

use image::GrayImage;

use crate::types::{Contour, LocateError, Point};

/// 8-connected neighborhood offsets `(row, col)`, clockwise from east.
const NEIGHBORS: [(i32, i32); 8] = [
    (0, 1),   // east
    (1, 1),   // southeast
    (1, 0),   // south
    (1, -1),  // southwest
    (0, -1),  // west
    (-1, -1), // northwest
    (-1, 0),  // north
    (-1, 1),  // northeast
];

/// Index into [`NEIGHBORS`] of the west offset, where the initial
/// background search starts: a raster scan reaches each border's
/// topmost-leftmost pixel from the left, so its west side is open.
const WEST: usize = 4;

/// Trace every closed boundary contour in a binary raster.
///
/// Non-zero pixels are foreground. One contour is produced per maximal
/// connected foreground boundary; contours may be nested but never share
/// identity. Degenerate boundaries are valid output: an isolated pixel
/// yields a single-point contour and a 1-pixel-wide line yields a
/// two-point contour, both with area 0.
///
/// No ordering among the returned contours is guaranteed; ranking is a
/// separate stage.
///
/// # Errors
///
/// Returns [`LocateError::EmptyInput`] if the raster has zero area.
/// An all-zero raster is not an error: it yields an empty contour set.
pub fn trace_contours(edges: &GrayImage) -> Result<Vec<Contour>, LocateError> {
    let (width, height) = edges.dimensions();
    if width == 0 || height == 0 {
        return Err(LocateError::EmptyInput);
    }

    let mut visited = vec![false; width as usize * height as usize];
    let mut contours = Vec::new();

    #[allow(clippy::cast_possible_wrap)]
    for row in 0..height as i32 {
        #[allow(clippy::cast_possible_wrap)]
        for col in 0..width as i32 {
            let start = Point::new(row, col);
            if visited[pixel_index(width, start)] || !is_border(edges, start) {
                continue;
            }
            let traced = follow_border(edges, start, &mut visited);
            contours.push(Contour::new(compress(traced)));
        }
    }

    Ok(contours)
}

/// Flat index of an in-bounds point into the visited buffer.
#[allow(clippy::cast_sign_loss)]
fn pixel_index(width: u32, p: Point) -> usize {
    p.row as usize * width as usize + p.col as usize
}

/// Whether `p` lies inside the raster and holds a foreground value.
/// Out-of-bounds positions count as background.
#[allow(clippy::cast_sign_loss)]
fn is_foreground(edges: &GrayImage, p: Point) -> bool {
    if p.row < 0 || p.col < 0 {
        return false;
    }
    let (row, col) = (p.row as u32, p.col as u32);
    row < edges.height() && col < edges.width() && edges.get_pixel(col, row).0[0] != 0
}

/// Whether `p` is a border pixel: foreground with at least one
/// 4-connected background neighbor (the raster edge counts).
fn is_border(edges: &GrayImage, p: Point) -> bool {
    const CROSS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
    is_foreground(edges, p)
        && CROSS
            .iter()
            .any(|&(dr, dc)| !is_foreground(edges, Point::new(p.row + dr, p.col + dc)))
}

/// The neighbor of `p` in direction `dir` (index into [`NEIGHBORS`]).
fn step(p: Point, dir: usize) -> Point {
    let (dr, dc) = NEIGHBORS[dir];
    Point::new(p.row + dr, p.col + dc)
}

/// Walk clockwise around one boundary starting at `start`, recording
/// every border pixel in traversal order until the walk re-enters
/// `start`.
///
/// At each position the walk sweeps the 8-neighborhood clockwise,
/// beginning just past the direction it arrived from, and steps to the
/// first foreground border pixel found. The sweep ends with the arrival
/// direction itself, so a dead end (1-pixel-wide line) backtracks along
/// the line instead of stalling. The step count is bounded by twice the
/// pixel count, so the walk terminates even on pathological input.
fn follow_border(edges: &GrayImage, start: Point, visited: &mut [bool]) -> Vec<Point> {
    let width = edges.width();

    // First background neighbor, scanning clockwise from west; the sweep
    // around the border starts just past it.
    let Some(initial) = (0..8)
        .map(|k| (WEST + k) % 8)
        .find(|&dir| !is_foreground(edges, step(start, dir)))
    else {
        // Fully enclosed by foreground; cannot happen for a border pixel.
        visited[pixel_index(width, start)] = true;
        return vec![start];
    };

    let mut points = vec![start];
    visited[pixel_index(width, start)] = true;

    let max_steps = edges.width() as usize * edges.height() as usize * 2;
    let mut pos = start;
    let mut backtrack = initial;

    for _ in 0..max_steps {
        let mut advanced = false;
        for k in 1..=8 {
            let dir = (backtrack + k) % 8;
            let next = step(pos, dir);
            if !is_foreground(edges, next) {
                continue;
            }
            if next == start {
                // Closed the loop.
                return points;
            }
            if !is_border(edges, next) {
                continue;
            }
            points.push(next);
            visited[pixel_index(width, next)] = true;
            pos = next;
            backtrack = (dir + 4) % 8;
            advanced = true;
            break;
        }
        if !advanced {
            // Isolated pixel: no foreground neighbor at all.
            return points;
        }
    }

    points
}

/// Drop collinear intermediate points from a closed unit-step contour,
/// keeping only vertices where the traversal direction changes.
///
/// Contours with fewer than 3 points are already minimal.
fn compress(points: Vec<Point>) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points;
    }

    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        let inbound = (cur.row - prev.row, cur.col - prev.col);
        let outbound = (next.row - cur.row, next.col - cur.col);
        if inbound != outbound {
            kept.push(cur);
        }
    }

    // A closed unit-step loop always turns somewhere; the guard only
    // matters for hand-built pathological input.
    if kept.is_empty() { points } else { kept }
}
