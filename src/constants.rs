//! Shared application-wide constants.
//! Centralizes the default limits and tweakable values used by the diagram core
//! and the presentation layer.

// Grid limits
/// Default maximum number of grid rows.
pub const MAX_ROWS: i32 = 64;
/// Default maximum number of grid columns.
pub const MAX_COLUMNS: i32 = 64;
/// Default maximum block height in cells.
pub const MAX_BLOCK_HEIGHT: i32 = 16;
/// Default maximum block width in cells.
pub const MAX_BLOCK_WIDTH: i32 = 16;

// Layout
/// Size (in pixels) given to rows/columns appended by a resize before the next layout pass.
pub const DEFAULT_CELL_SIZE: f32 = 40.0;

// Interactions
/// Distance (in pixels) the pointer has to travel after a press before a drag starts.
pub const DRAG_THRESHOLD: f32 = 4.0;

// Block rendering
/// Opacity of blocks while no drag is in progress.
pub const NODE_OPACITY: f32 = 1.0;
/// Opacity of blocks that are not involved in the current drag.
pub const INACTIVE_NODE_OPACITY: f32 = 0.6;
/// Opacity of blocks that overlap the current drag preview.
pub const INVALID_NODE_OPACITY: f32 = 0.25;
/// Corner radius for block rectangles (in screen pixels).
pub const NODE_CORNER_RADIUS: f32 = 6.0;
/// Inset between a block's cell area and its painted rectangle (in screen pixels).
pub const NODE_MARGIN: f32 = 4.0;
/// Side length of the resize grip in a block's bottom-right corner (in screen pixels).
pub const RESIZE_GRIP_SIZE: f32 = 12.0;
