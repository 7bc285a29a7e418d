//! Canvas interaction: turns egui pointer input into diagram drag and resize
//! operations.

use super::state::{DiagramApp, PointerEvent};
use crate::constants::RESIZE_GRIP_SIZE;
use crate::geometry;
use crate::types::{BlockId, Point};
use eframe::egui;

impl DiagramApp {
    /// Reads this frame's pointer input and forwards it as [`PointerEvent`]s.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_pointer(&mut self, ui: &egui::Ui, response: &egui::Response) {
        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.handle_pointer_event(PointerEvent::Cancel);
        }

        let (pressed, released, down, latest) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.latest_pos(),
            )
        });
        let Some(screen_pos) = latest else {
            return;
        };
        let point = self.screen_to_grid(screen_pos);

        if pressed && response.hovered() {
            self.handle_pointer_event(PointerEvent::Pressed(point));
        } else if released {
            self.handle_pointer_event(PointerEvent::Released(point));
        } else if down {
            self.handle_pointer_event(PointerEvent::Moved(point));
        }
    }

    /// Applies one pointer event to the diagram.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Pressed(point) => {
                if self.diagram.dragged_block().is_some() {
                    return;
                }
                if let Some(id) = self.grip_at_point(point) {
                    self.interaction.resizing_block = Some(id);
                    self.interaction.focused_block = Some(id);
                } else if let Some(id) = self.diagram.block_at_point(point) {
                    self.diagram.press_block(id, point);
                    self.interaction.focused_block = Some(id);
                } else {
                    self.interaction.focused_block = None;
                }
            }
            PointerEvent::Moved(point) => {
                if let Some(id) = self.interaction.resizing_block {
                    self.resize_block_to(id, point);
                } else if let Some(update) = self.diagram.pointer_moved(point) {
                    self.interaction.preview_origin = Some(update.preview_origin);
                    self.interaction.preview_cell = Some(update.cell);
                }
            }
            PointerEvent::Released(point) => {
                if self.interaction.resizing_block.take().is_some() {
                    return;
                }
                // Dropping outside the grid rejects the drop.
                let committed = self.is_inside_grid(point);
                self.diagram.release(committed);
                self.clear_preview();
            }
            PointerEvent::Cancel => {
                self.interaction.resizing_block = None;
                self.diagram.release(false);
                self.clear_preview();
            }
        }
    }

    fn clear_preview(&mut self) {
        self.interaction.preview_origin = None;
        self.interaction.preview_cell = None;
    }

    /// Whether `point` lies on the grid's current pixel area.
    pub fn is_inside_grid(&self, point: Point) -> bool {
        let extent = self.diagram.snapshot().extent();
        (0.0..=extent.x).contains(&point.x) && (0.0..=extent.y).contains(&point.y)
    }

    /// The block whose bottom-right resize grip lies under `point`, topmost first.
    pub fn grip_at_point(&self, point: Point) -> Option<BlockId> {
        let grid = self.diagram.grid();
        self.diagram
            .blocks()
            .iter()
            .rev()
            .find(|block| {
                let (_, max) =
                    geometry::rect_bounds(block.rect(), grid.row_sizes(), grid.column_sizes());
                (max.x - RESIZE_GRIP_SIZE..=max.x).contains(&point.x)
                    && (max.y - RESIZE_GRIP_SIZE..=max.y).contains(&point.y)
            })
            .map(|block| block.id())
    }

    /// Stretches a block so its bottom-right cell is the one under `point`.
    ///
    /// Spans change first; the position is re-clamped afterwards in case the new
    /// spans pushed the block past the grid's edge.
    fn resize_block_to(&mut self, id: BlockId, point: Point) {
        let Some(block) = self.diagram.block(id) else {
            self.interaction.resizing_block = None;
            return;
        };
        let grid = self.diagram.grid();
        let cell = geometry::cell_for_point(point, grid.row_sizes(), grid.column_sizes());
        let row_span = cell.row - block.row() + 1;
        let column_span = cell.column - block.column() + 1;

        self.diagram.set_block_row_span(id, row_span);
        self.diagram.set_block_column_span(id, column_span);
        self.diagram.reclamp_block(id);
    }
}
