//! Application state management structures.
//!
//! The diagram itself lives in the core; this module only holds what the
//! presentation layer needs on top of it: where the canvas sits on screen, the
//! in-flight pointer interaction, and per-block colors.

use crate::diagram::Diagram;
use crate::config::DiagramConfig;
use crate::types::{BlockId, CellPos, Point};
use eframe::egui;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// Palette cycled through when new blocks are added.
pub const BLOCK_PALETTE: [egui::Color32; 5] = [
    egui::Color32::from_rgb(90, 150, 230),
    egui::Color32::from_rgb(110, 190, 120),
    egui::Color32::from_rgb(230, 160, 70),
    egui::Color32::from_rgb(190, 110, 200),
    egui::Color32::from_rgb(220, 100, 100),
];

/// State related to canvas placement and display.
pub struct CanvasState {
    /// Screen position of the grid's top-left corner
    pub origin: egui::Pos2,
    /// Whether grid lines are drawn
    pub show_grid: bool,
    /// Brightness factor applied to block colors
    pub brightness: f32,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            origin: egui::Pos2::ZERO,
            show_grid: true,
            brightness: 1.0,
        }
    }
}

/// State related to the pointer interaction in progress.
#[derive(Default)]
pub struct InteractionState {
    /// Block whose spans are being changed with the resize grip
    pub resizing_block: Option<BlockId>,
    /// Top-left corner of the drag preview, in grid pixels
    pub preview_origin: Option<Point>,
    /// Cell the dragged block would snap to
    pub preview_cell: Option<CellPos>,
    /// Last block pressed; drawn with a highlighted border
    pub focused_block: Option<BlockId>,
}

/// Pointer input translated into grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button went down
    Pressed(Point),
    /// Pointer moved while the primary button is held
    Moved(Point),
    /// Primary button went up
    Released(Point),
    /// The gesture was aborted (Escape)
    Cancel,
}

/// The main application: a diagram plus its presentation state.
pub struct DiagramApp {
    /// The grid and its blocks
    pub diagram: Diagram,
    /// Canvas placement and display options
    pub canvas: CanvasState,
    /// Current pointer interaction
    pub interaction: InteractionState,
    /// Fill color of each block
    pub colors: HashMap<BlockId, egui::Color32>,
    /// Counter used to pick the next palette color
    pub block_counter: usize,
    /// Set by diagram notifications; cleared once a repaint has been requested
    pub needs_repaint: Rc<Cell<bool>>,
}

impl Default for DiagramApp {
    fn default() -> Self {
        Self::new(DiagramConfig::default())
    }
}

impl DiagramApp {
    /// Creates an app with a starter diagram built from `config`.
    pub fn new(config: DiagramConfig) -> Self {
        let mut diagram = Diagram::new(8, 12, config);

        let needs_repaint = Rc::new(Cell::new(false));
        let flag = Rc::clone(&needs_repaint);
        diagram.on_grid_resized(move |_| flag.set(true));
        let flag = Rc::clone(&needs_repaint);
        diagram.on_block_position_changed(move |_| flag.set(true));
        let flag = Rc::clone(&needs_repaint);
        diagram.on_block_dimensions_changed(move |_| flag.set(true));
        let flag = Rc::clone(&needs_repaint);
        diagram.on_block_invalid_changed(move |_| flag.set(true));

        let mut app = Self {
            diagram,
            canvas: CanvasState::default(),
            interaction: InteractionState::default(),
            colors: HashMap::new(),
            block_counter: 0,
            needs_repaint,
        };
        app.add_block(1, 1, 2, 3);
        app.add_block(4, 6, 3, 2);
        app
    }

    /// Places a block and assigns it the next palette color.
    pub fn add_block(&mut self, row: i32, column: i32, row_span: i32, column_span: i32) -> BlockId {
        let id = self.diagram.insert_block(row, column, row_span, column_span);
        let color = BLOCK_PALETTE[self.block_counter % BLOCK_PALETTE.len()];
        self.colors.insert(id, color);
        self.block_counter += 1;
        self.needs_repaint.set(true);
        id
    }

    /// Removes a block together with its color.
    pub fn remove_block(&mut self, id: BlockId) -> bool {
        self.colors.remove(&id);
        if self.interaction.resizing_block == Some(id) {
            self.interaction.resizing_block = None;
        }
        if self.interaction.focused_block == Some(id) {
            self.interaction.focused_block = None;
        }
        self.diagram.remove_block(id).is_some()
    }

    /// Converts a screen position into grid pixels.
    pub fn screen_to_grid(&self, screen_pos: egui::Pos2) -> Point {
        let local = screen_pos - self.canvas.origin;
        Point::new(local.x, local.y)
    }

    /// Converts grid pixels into a screen position.
    pub fn grid_to_screen(&self, point: Point) -> egui::Pos2 {
        self.canvas.origin + egui::vec2(point.x, point.y)
    }
}
