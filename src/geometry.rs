//! Coordinate conversion and rectangle helpers.
//!
//! Pure functions shared by the gesture state machine and the renderer. Nothing here
//! validates against the grid bounds; callers decide what an out-of-range cell means.

use crate::types::{CellPos, GridRect, PixelPos};

/// Converts a surface-local pixel position to the grid cell under it.
///
/// Floor division only; positions left of or above the origin yield negative cells.
pub fn pixel_to_grid(pos: PixelPos, cell_size: f32) -> CellPos {
    CellPos::new(
        (pos.x / cell_size).floor() as i32,
        (pos.y / cell_size).floor() as i32,
    )
}

/// Returns true if two footprints share at least one cell.
///
/// Touching edges (`a.right() == b.left()`) do not count as overlap.
pub fn rects_overlap(a: &GridRect, b: &GridRect) -> bool {
    !(a.right() <= b.left()
        || a.left() >= b.right()
        || a.bottom() <= b.top()
        || a.top() >= b.bottom())
}

/// Clamps `value` into `[lo, hi]`.
///
/// Unlike [`Ord::clamp`] this never panics when `lo > hi`; the lower bound wins,
/// which is what a block larger than the grid needs when being dragged.
pub fn clamp(value: i32, lo: i32, hi: i32) -> i32 {
    value.min(hi).max(lo)
}

/// Normalizes a drag between two cells into the rectangle they span, inclusive of both.
pub fn normalize_span(anchor: CellPos, current: CellPos) -> GridRect {
    GridRect::new(
        anchor.x.min(current.x),
        anchor.y.min(current.y),
        (current.x - anchor.x).abs() + 1,
        (current.y - anchor.y).abs() + 1,
    )
}

/// Returns true if `pos` lies on a surface of `width` × `height` pixels.
pub fn surface_contains(pos: PixelPos, width: f32, height: f32) -> bool {
    pos.x >= 0.0 && pos.y >= 0.0 && pos.x < width && pos.y < height
}
