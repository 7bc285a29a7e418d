//! Clamped position and extent setters for blocks.
//!
//! Every setter takes the owning [`Grid`] explicitly and reports the change it
//! applied, so the caller can publish it. A request that clamps to the current
//! value changes nothing and reports nothing.
//!
//! Position setters keep the whole block inside the grid. Span setters only
//! enforce the configured block size limits: growing a span does not move the
//! block back inside the grid. Callers re-apply the position afterwards when
//! that matters (see [`Block::reclamp`]).

use crate::events::{DimensionsChanged, PositionChanged};
use crate::geometry::limit;
use crate::grid::Grid;
use crate::types::Block;

impl Block {
    /// Sets the top row, clamped to `[0, grid.rows() - row_span]`.
    pub fn set_row(&mut self, row: i32, grid: &Grid) -> Option<PositionChanged> {
        let row = limit(row, 0, grid.rows() - self.row_span);
        let delta = row - self.row;
        if delta == 0 {
            return None;
        }

        self.row = row;
        Some(PositionChanged {
            block: self.id,
            row_delta: delta,
            column_delta: 0,
        })
    }

    /// Sets the left column, clamped to `[0, grid.columns() - column_span]`.
    pub fn set_column(&mut self, column: i32, grid: &Grid) -> Option<PositionChanged> {
        let column = limit(column, 0, grid.columns() - self.column_span);
        let delta = column - self.column;
        if delta == 0 {
            return None;
        }

        self.column = column;
        Some(PositionChanged {
            block: self.id,
            row_delta: 0,
            column_delta: delta,
        })
    }

    /// Moves the block on both axes at once.
    ///
    /// Applies the same clamps as [`Block::set_row`] and [`Block::set_column`] but
    /// reports a single combined change.
    pub fn set_position(&mut self, row: i32, column: i32, grid: &Grid) -> Option<PositionChanged> {
        let row_delta = self.set_row(row, grid).map_or(0, |e| e.row_delta);
        let column_delta = self.set_column(column, grid).map_or(0, |e| e.column_delta);
        if row_delta == 0 && column_delta == 0 {
            return None;
        }

        Some(PositionChanged {
            block: self.id,
            row_delta,
            column_delta,
        })
    }

    /// Sets the row span, clamped to `[1, grid.max_block_height()]`.
    pub fn set_row_span(&mut self, row_span: i32, grid: &Grid) -> Option<DimensionsChanged> {
        let row_span = limit(row_span, 1, grid.max_block_height());
        let delta = row_span - self.row_span;
        if delta == 0 {
            return None;
        }

        self.row_span = row_span;
        Some(DimensionsChanged {
            block: self.id,
            row_delta: delta,
            column_delta: 0,
        })
    }

    /// Sets the column span, clamped to `[1, grid.max_block_width()]`.
    pub fn set_column_span(&mut self, column_span: i32, grid: &Grid) -> Option<DimensionsChanged> {
        let column_span = limit(column_span, 1, grid.max_block_width());
        let delta = column_span - self.column_span;
        if delta == 0 {
            return None;
        }

        self.column_span = column_span;
        Some(DimensionsChanged {
            block: self.id,
            row_delta: 0,
            column_delta: delta,
        })
    }

    /// Re-applies the position clamps against the grid's current size.
    pub fn reclamp(&mut self, grid: &Grid) -> Option<PositionChanged> {
        self.set_position(self.row, self.column, grid)
    }

    /// Whether the block lies entirely inside the grid.
    pub fn fits(&self, grid: &Grid) -> bool {
        self.row >= 0
            && self.column >= 0
            && self.row.saturating_add(self.row_span) <= grid.rows()
            && self.column.saturating_add(self.column_span) <= grid.columns()
    }

    pub(crate) fn set_invalid(&mut self, invalid: bool) -> bool {
        let changed = self.invalid != invalid;
        self.invalid = invalid;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagramConfig;

    fn grid(rows: i32, columns: i32) -> Grid {
        let config = DiagramConfig {
            max_block_height: 4,
            max_block_width: 5,
            ..Default::default()
        };
        Grid::new(rows, columns, &config)
    }

    #[test]
    fn test_set_row_clamps_to_grid() {
        let grid = grid(10, 10);
        let mut block = Block::new(0, 0, 3, 1);

        let event = block.set_row(20, &grid).expect("row should change");
        assert_eq!(block.row(), 7);
        assert_eq!(event.row_delta, 7);
        assert_eq!(event.column_delta, 0);
        assert_eq!(event.block, block.id());

        block.set_row(-4, &grid);
        assert_eq!(block.row(), 0);
    }

    #[test]
    fn test_zero_delta_reports_nothing() {
        let grid = grid(10, 10);
        let mut block = Block::new(9, 0, 1, 1);

        assert!(block.set_row(9, &grid).is_none());
        assert!(block.set_row(50, &grid).is_none());
        assert_eq!(block.row(), 9);
    }

    #[test]
    fn test_set_column_clamps_to_grid() {
        let grid = grid(10, 6);
        let mut block = Block::new(0, 0, 1, 4);

        let event = block.set_column(5, &grid).expect("column should change");
        assert_eq!(block.column(), 2);
        assert_eq!(event.row_delta, 0);
        assert_eq!(event.column_delta, 2);
    }

    #[test]
    fn test_span_wider_than_grid_pins_to_origin() {
        let grid = grid(2, 2);
        let mut block = Block::new(1, 1, 4, 4);

        block.set_row(1, &grid);
        block.set_column(1, &grid);
        assert_eq!(block.position(), crate::types::CellPos::new(0, 0));
    }

    #[test]
    fn test_span_setters_clamp_to_block_limits() {
        let grid = grid(10, 10);
        let mut block = Block::new(0, 0, 1, 1);

        let event = block.set_row_span(9, &grid).expect("span should change");
        assert_eq!(block.row_span(), 4);
        assert_eq!(event.row_delta, 3);
        assert_eq!(event.column_delta, 0);

        let event = block.set_column_span(0, &grid);
        assert!(event.is_none());
        assert_eq!(block.column_span(), 1);

        let event = block.set_column_span(5, &grid).expect("span should change");
        assert_eq!(event.row_delta, 0);
        assert_eq!(event.column_delta, 4);
    }

    #[test]
    fn test_span_change_does_not_reclamp_position() {
        let grid = grid(5, 5);
        let mut block = Block::new(0, 0, 1, 1);
        block.set_row(4, &grid);

        block.set_row_span(3, &grid);
        assert_eq!(block.row(), 4);
        assert!(!block.fits(&grid));

        let event = block.reclamp(&grid).expect("reclamp should move the block");
        assert_eq!(block.row(), 2);
        assert_eq!(event.row_delta, -2);
        assert!(block.fits(&grid));
    }

    #[test]
    fn test_position_setters_always_leave_block_inside() {
        let grid = grid(6, 7);
        let mut block = Block::new(0, 0, 1, 1);

        let requests = [(-3, 9), (5, 5), (2, -8), (100, 100), (3, 3)];
        let spans = [(2, 3), (4, 5), (1, 1), (3, 2), (4, 4)];
        for ((row, column), (row_span, column_span)) in requests.into_iter().zip(spans) {
            block.set_row_span(row_span, &grid);
            block.set_column_span(column_span, &grid);
            block.set_row(row, &grid);
            block.set_column(column, &grid);
            assert!(block.fits(&grid), "block {:?} escaped the grid", block.rect());
        }
    }

    #[test]
    fn test_set_position_combines_deltas() {
        let grid = grid(10, 10);
        let mut block = Block::new(1, 1, 2, 2);

        let event = block.set_position(4, 0, &grid).expect("block should move");
        assert_eq!(event.row_delta, 3);
        assert_eq!(event.column_delta, -1);
        assert!(block.set_position(4, 0, &grid).is_none());
    }

    #[test]
    fn test_huge_span_does_not_overflow() {
        let config = DiagramConfig {
            max_block_height: i32::MAX,
            ..Default::default()
        };
        let grid = Grid::new(4, 4, &config);
        let mut block = Block::new(3, 0, 1, 1);

        block.set_row_span(i32::MAX, &grid);
        assert_eq!(block.row_span(), i32::MAX);
        assert!(!block.fits(&grid));

        block.reclamp(&grid);
        assert_eq!(block.row(), 0);
    }
}
