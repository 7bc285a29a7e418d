//! # Grid Diagram
//!
//! An interactive diagram surface: a resizable grid of cells on which rectangular
//! blocks are placed, dragged, resized and repositioned, with live overlap feedback
//! while a block is being dragged.
//!
//! ## Features
//! - Pointer-to-cell conversion over per-row/per-column size tables
//! - Clamped grid and block setters with change notifications
//! - Advisory overlap detection between a drag candidate and the other blocks
//! - A drag state machine driven by discrete begin/update/end calls
//! - Doubling the grid resolution while keeping block proportions
//!
//! The [`Diagram`] type is the entry point; the `ui` module hosts an egui
//! front-end built on top of it.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod block;
mod collision;
mod config;
mod constants;
mod diagram;
mod drag;
mod events;
mod geometry;
mod grid;
mod types;
mod ui;

// Re-export public types and functions
pub use collision::{clear_invalid, invalid_set, mark_invalid, overlaps};
pub use config::DiagramConfig;
pub use diagram::Diagram;
pub use drag::{DragController, DragHandle, DragOutcome, DragPhase, DragSession, DragStart, DragUpdate, TrackStep};
pub use events::{
    DimensionsChanged, EventHub, GridResized, InvalidChanged, PositionChanged, SubscriptionId,
};
pub use geometry::{
    cell_for_point, cell_origin, closest_cell_for_point, closest_index_for_offset,
    index_for_offset, limit, limit_f32, offset_of_index, rect_bounds, total_extent,
};
pub use grid::{Grid, SizeSnapshot};
pub use types::{Block, BlockId, CellPos, CellRect, Point};
pub use ui::{block_opacity, border_style, gradient_stops, scale_color, DiagramApp, PointerEvent};

/// Runs the diagram editor with default settings.
///
/// This function initializes the egui application window and starts the main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use grid_diagram::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    run_app_with(DiagramConfig::default())
}

/// Runs the diagram editor with the given configuration.
pub fn run_app_with(config: DiagramConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Grid Diagram",
        options,
        Box::new(|_cc| Ok(Box::new(DiagramApp::new(config)))),
    )
}
