//! Pure coordinate math between pixel points and grid cells.
//!
//! Every function here walks per-row/per-column size tables supplied by the
//! caller. Nothing is cached: when the tables change, callers pass the new ones.

use crate::types::{CellPos, CellRect, Point};

/// Ensures `value` lies between `lower` and `upper` (inclusive).
///
/// Unlike [`i32::clamp`] this never panics: when `upper < lower` the lower bound wins.
pub fn limit(value: i32, lower: i32, upper: i32) -> i32 {
    lower.max(upper.min(value))
}

/// Floating-point counterpart of [`limit`].
pub fn limit_f32(value: f32, lower: f32, upper: f32) -> f32 {
    lower.max(upper.min(value))
}

/// Returns the index of the cell containing `offset` on one axis.
///
/// Accumulates `sizes` and stops at the first cell whose trailing edge reaches
/// or passes `offset`. Offsets past the end resolve to the last cell; an empty
/// table resolves to 0.
pub fn index_for_offset(offset: f32, sizes: &[f32]) -> i32 {
    let mut accumulated = 0.0_f32;
    for (index, &size) in sizes.iter().enumerate() {
        accumulated += size;
        if accumulated >= offset {
            return index as i32;
        }
    }
    last_index(sizes)
}

/// Returns the index of the cell whose leading edge is nearest to `offset` on one axis.
///
/// Picks the first cell whose center lies strictly past `offset`, so a point
/// that has crossed a cell's center rounds up to the next grid line. Offsets past
/// the last center resolve to the last cell; an empty table resolves to 0.
pub fn closest_index_for_offset(offset: f32, sizes: &[f32]) -> i32 {
    let mut leading_edge = 0.0_f32;
    for (index, &size) in sizes.iter().enumerate() {
        let center = leading_edge + size / 2.0;
        if center > offset {
            return index as i32;
        }
        leading_edge += size;
    }
    last_index(sizes)
}

fn last_index(sizes: &[f32]) -> i32 {
    sizes.len().saturating_sub(1) as i32
}

/// Returns the cell containing `point`.
pub fn cell_for_point(point: Point, row_sizes: &[f32], column_sizes: &[f32]) -> CellPos {
    CellPos::new(
        index_for_offset(point.y, row_sizes),
        index_for_offset(point.x, column_sizes),
    )
}

/// Returns the cell whose top-left corner is nearest to `point`.
///
/// Used for drag previews, so a block snaps to the closest grid line instead of
/// floor-rounding to the cell under the pointer.
pub fn closest_cell_for_point(point: Point, row_sizes: &[f32], column_sizes: &[f32]) -> CellPos {
    CellPos::new(
        closest_index_for_offset(point.y, row_sizes),
        closest_index_for_offset(point.x, column_sizes),
    )
}

/// Leading edge of the cell at `index`: the summed size of every cell before it.
///
/// Indices past the end sum the whole table; negative indices yield 0.
pub fn offset_of_index(index: i32, sizes: &[f32]) -> f32 {
    let count = index.max(0) as usize;
    sizes.iter().take(count).sum()
}

/// Total length of one axis.
pub fn total_extent(sizes: &[f32]) -> f32 {
    sizes.iter().sum()
}

/// Pixel position of a cell's top-left corner.
pub fn cell_origin(cell: CellPos, row_sizes: &[f32], column_sizes: &[f32]) -> Point {
    Point::new(
        offset_of_index(cell.column, column_sizes),
        offset_of_index(cell.row, row_sizes),
    )
}

/// Pixel bounds `(min, max)` covered by a cell rectangle.
pub fn rect_bounds(rect: CellRect, row_sizes: &[f32], column_sizes: &[f32]) -> (Point, Point) {
    let min = cell_origin(rect.origin(), row_sizes, column_sizes);
    let max = Point::new(
        offset_of_index(rect.column + rect.column_span, column_sizes),
        offset_of_index(rect.row + rect.row_span, row_sizes),
    );
    (min, max)
}
