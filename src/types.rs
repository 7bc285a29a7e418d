//! Core data types shared by the grid model, collision detection and drag sessions.
//!
//! Coordinates come in two flavours: continuous [`Point`]s in pixels, relative to
//! the grid's top-left corner, and discrete cells addressed by zero-based row and
//! column indices.

use uuid::Uuid;

/// Unique identifier for blocks placed on a grid.
pub type BlockId = Uuid;

/// A continuous position in pixels, relative to the grid origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset
    pub x: f32,
    /// Vertical offset
    pub y: f32,
}

impl Point {
    /// The grid origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a point from its coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A discrete grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellPos {
    /// Zero-based row index
    pub row: i32,
    /// Zero-based column index
    pub column: i32,
}

impl CellPos {
    /// Creates a cell position.
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }
}

/// A rectangle of whole cells: top-left cell plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// Top row
    pub row: i32,
    /// Left column
    pub column: i32,
    /// Height in cells
    pub row_span: i32,
    /// Width in cells
    pub column_span: i32,
}

impl CellRect {
    /// Creates a cell rectangle.
    pub const fn new(row: i32, column: i32, row_span: i32, column_span: i32) -> Self {
        Self {
            row,
            column,
            row_span,
            column_span,
        }
    }

    /// Top-left cell of the rectangle.
    pub fn origin(&self) -> CellPos {
        CellPos::new(self.row, self.column)
    }

    /// Last row covered by the rectangle (inclusive).
    pub fn last_row(&self) -> i32 {
        self.row.saturating_add(self.row_span.saturating_sub(1))
    }

    /// Last column covered by the rectangle (inclusive).
    pub fn last_column(&self) -> i32 {
        self.column.saturating_add(self.column_span.saturating_sub(1))
    }

    /// Whether the given cell lies inside the rectangle.
    pub fn contains(&self, cell: CellPos) -> bool {
        (self.row..=self.last_row()).contains(&cell.row)
            && (self.column..=self.last_column()).contains(&cell.column)
    }
}

/// Layout state of a rectangular block placed on the grid.
///
/// Fields are only mutated through the clamped setters in [`crate::block`], which
/// take the owning grid as an explicit argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Unique identifier for this block
    pub(crate) id: BlockId,
    pub(crate) row: i32,
    pub(crate) column: i32,
    pub(crate) row_span: i32,
    pub(crate) column_span: i32,
    /// Set while the block overlaps the reference placement of the last collision pass
    pub(crate) invalid: bool,
}

impl Block {
    /// Creates a block at the given cell with the given spans.
    ///
    /// No clamping happens here; use [`crate::Diagram::insert_block`] to place a block
    /// on a grid with its limits applied.
    pub fn new(row: i32, column: i32, row_span: i32, column_span: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            row,
            column,
            row_span,
            column_span,
            invalid: false,
        }
    }

    /// Unique identifier of the block.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Zero-based index of the block's top row.
    pub fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based index of the block's left column.
    pub fn column(&self) -> i32 {
        self.column
    }

    /// Height of the block in cells.
    pub fn row_span(&self) -> i32 {
        self.row_span
    }

    /// Width of the block in cells.
    pub fn column_span(&self) -> i32 {
        self.column_span
    }

    /// Whether the block overlaps the current reference placement.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// The cells occupied by the block.
    pub fn rect(&self) -> CellRect {
        CellRect::new(self.row, self.column, self.row_span, self.column_span)
    }

    /// Top-left cell of the block.
    pub fn position(&self) -> CellPos {
        CellPos::new(self.row, self.column)
    }
}
