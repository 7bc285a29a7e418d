//! The grid: row/column counts with limit enforcement and per-cell size tables.

use crate::config::DiagramConfig;
use crate::events::GridResized;
use crate::geometry::{self, limit};
use crate::types::{CellPos, CellRect, Point};

/// Bounded 2D arrangement of rows and columns hosting blocks.
///
/// The size tables always hold exactly one entry per row/column. Their values
/// belong to the layout collaborator, which fills them via [`Grid::arrange`] or
/// the `set_*_sizes` setters; the grid itself only grows or shrinks them.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    row_sizes: Vec<f32>,
    column_sizes: Vec<f32>,
    max_rows: i32,
    max_columns: i32,
    max_block_height: i32,
    max_block_width: i32,
    default_cell_size: f32,
}

impl Grid {
    /// Creates a grid with the given counts, clamped to `[1, max]` per the configuration.
    pub fn new(rows: i32, columns: i32, config: &DiagramConfig) -> Self {
        let config = config.clone().normalized();
        let rows = limit(rows, 1, config.max_rows);
        let columns = limit(columns, 1, config.max_columns);
        Self {
            row_sizes: vec![config.default_cell_size; rows as usize],
            column_sizes: vec![config.default_cell_size; columns as usize],
            max_rows: config.max_rows,
            max_columns: config.max_columns,
            max_block_height: config.max_block_height,
            max_block_width: config.max_block_width,
            default_cell_size: config.default_cell_size,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> i32 {
        self.row_sizes.len() as i32
    }

    /// Number of columns.
    pub fn columns(&self) -> i32 {
        self.column_sizes.len() as i32
    }

    /// Height of every row in pixels.
    pub fn row_sizes(&self) -> &[f32] {
        &self.row_sizes
    }

    /// Width of every column in pixels.
    pub fn column_sizes(&self) -> &[f32] {
        &self.column_sizes
    }

    /// Upper limit for the row count.
    pub fn max_rows(&self) -> i32 {
        self.max_rows
    }

    /// Upper limit for the column count.
    pub fn max_columns(&self) -> i32 {
        self.max_columns
    }

    /// Upper limit for a block's row span.
    pub fn max_block_height(&self) -> i32 {
        self.max_block_height
    }

    /// Upper limit for a block's column span.
    pub fn max_block_width(&self) -> i32 {
        self.max_block_width
    }

    /// Sets the number of rows, clamped to `[1, max_rows]`.
    ///
    /// Rows are appended to or removed from the end.
    ///
    /// # Returns
    ///
    /// The applied change, or `None` when the clamped count equals the current one.
    pub fn set_row_count(&mut self, rows: i32) -> Option<GridResized> {
        let rows = limit(rows, 1, self.max_rows);
        let delta = rows - self.rows();
        if delta == 0 {
            return None;
        }

        resize_table(&mut self.row_sizes, rows, self.default_cell_size);
        log::debug!("grid rows changed by {delta} to {rows}");
        Some(GridResized {
            row_delta: delta,
            column_delta: 0,
        })
    }

    /// Sets the number of columns, clamped to `[1, max_columns]`.
    ///
    /// # Returns
    ///
    /// The applied change, or `None` when the clamped count equals the current one.
    pub fn set_column_count(&mut self, columns: i32) -> Option<GridResized> {
        let columns = limit(columns, 1, self.max_columns);
        let delta = columns - self.columns();
        if delta == 0 {
            return None;
        }

        resize_table(&mut self.column_sizes, columns, self.default_cell_size);
        log::debug!("grid columns changed by {delta} to {columns}");
        Some(GridResized {
            row_delta: 0,
            column_delta: delta,
        })
    }

    /// Splits the available area evenly between all rows and columns.
    pub fn arrange(&mut self, width: f32, height: f32) {
        let row_size = height.max(0.0) / self.rows() as f32;
        let column_size = width.max(0.0) / self.columns() as f32;
        self.row_sizes.fill(row_size);
        self.column_sizes.fill(column_size);
    }

    /// Replaces the row size table with measured values.
    ///
    /// # Returns
    ///
    /// `false` (and leaves the table untouched) if the length does not match the
    /// row count or any size is negative.
    pub fn set_row_sizes(&mut self, sizes: Vec<f32>) -> bool {
        if sizes.len() != self.row_sizes.len() || sizes.iter().any(|s| !(*s >= 0.0)) {
            return false;
        }
        self.row_sizes = sizes;
        true
    }

    /// Replaces the column size table with measured values.
    ///
    /// # Returns
    ///
    /// `false` (and leaves the table untouched) if the length does not match the
    /// column count or any size is negative.
    pub fn set_column_sizes(&mut self, sizes: Vec<f32>) -> bool {
        if sizes.len() != self.column_sizes.len() || sizes.iter().any(|s| !(*s >= 0.0)) {
            return false;
        }
        self.column_sizes = sizes;
        true
    }

    /// Copies the current size tables.
    pub fn snapshot(&self) -> SizeSnapshot {
        SizeSnapshot {
            row_sizes: self.row_sizes.clone(),
            column_sizes: self.column_sizes.clone(),
        }
    }
}

fn resize_table(table: &mut Vec<f32>, len: i32, default_size: f32) {
    let fill = table.last().copied().unwrap_or(default_size);
    table.resize(len as usize, fill);
}

/// Row/column size tables captured at a point in time.
///
/// Drag sessions keep one of these for their whole gesture, so pointer-to-cell
/// conversion stays consistent even if the live tables are re-arranged meanwhile.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SizeSnapshot {
    /// Height of every row in pixels
    pub row_sizes: Vec<f32>,
    /// Width of every column in pixels
    pub column_sizes: Vec<f32>,
}

impl SizeSnapshot {
    /// Total width and height covered by the tables.
    pub fn extent(&self) -> Point {
        Point::new(
            geometry::total_extent(&self.column_sizes),
            geometry::total_extent(&self.row_sizes),
        )
    }

    /// Pixel position of a cell's top-left corner.
    pub fn cell_origin(&self, cell: CellPos) -> Point {
        geometry::cell_origin(cell, &self.row_sizes, &self.column_sizes)
    }

    /// Pixel bounds `(min, max)` of a cell rectangle.
    pub fn rect_bounds(&self, rect: CellRect) -> (Point, Point) {
        geometry::rect_bounds(rect, &self.row_sizes, &self.column_sizes)
    }

    /// The cell containing `point`.
    pub fn cell_at(&self, point: Point) -> CellPos {
        geometry::cell_for_point(point, &self.row_sizes, &self.column_sizes)
    }

    /// The cell whose top-left corner is nearest to `point`.
    pub fn closest_cell(&self, point: Point) -> CellPos {
        geometry::closest_cell_for_point(point, &self.row_sizes, &self.column_sizes)
    }
}
