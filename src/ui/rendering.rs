//! Canvas rendering for the grid, the blocks and the drag preview.

use super::state::DiagramApp;
use crate::config::DiagramConfig;
use crate::constants::{NODE_CORNER_RADIUS, NODE_MARGIN, RESIZE_GRIP_SIZE};
use crate::geometry;
use crate::types::{Block, BlockId, Point};
use eframe::egui;
use eframe::epaint::StrokeKind;

/// Opacity a block is painted with, given the block being dragged (if any).
///
/// Without a drag every block uses the normal opacity. During a drag the dragged
/// block itself is hidden (its preview follows the pointer instead), blocks
/// overlapping the preview fade the most, and all others fade a little.
pub fn block_opacity(block: &Block, dragged: Option<BlockId>, config: &DiagramConfig) -> f32 {
    match dragged {
        None => config.node_opacity,
        Some(id) if id == block.id() => 0.0,
        Some(_) if block.is_invalid() => config.invalid_node_opacity,
        Some(_) => config.inactive_node_opacity,
    }
}

/// Scales a color's channels by `factor`, saturating at 255. Negative factors act as 0.
pub fn scale_color(color: egui::Color32, factor: f32) -> egui::Color32 {
    let factor = factor.max(0.0);
    let scale = |channel: u8| (channel as f32 * factor).min(255.0) as u8;
    egui::Color32::from_rgb(scale(color.r()), scale(color.g()), scale(color.b()))
}

/// Outline of a block overlapping the drag candidate.
pub const INVALID_BORDER: egui::Color32 = egui::Color32::from_rgb(255, 80, 80);
/// Outline of the last pressed block.
pub const FOCUSED_BORDER: egui::Color32 = egui::Color32::from_rgb(0, 191, 255);
/// Outline of every other block.
pub const BORDER: egui::Color32 = egui::Color32::from_rgb(169, 169, 169);

/// Border color and stroke width for a block. The overlap warning wins over focus.
pub fn border_style(block: &Block, focused: Option<BlockId>) -> (egui::Color32, f32) {
    if block.is_invalid() {
        (INVALID_BORDER, 2.5)
    } else if focused == Some(block.id()) {
        (FOCUSED_BORDER, 2.0)
    } else {
        (BORDER, 1.5)
    }
}

/// Top and bottom stops of a block's vertical fill gradient.
pub fn gradient_stops(color: egui::Color32, brightness: f32) -> (egui::Color32, egui::Color32) {
    (
        scale_color(color, brightness),
        scale_color(color, 0.8 * brightness),
    )
}

fn to_rect(app: &DiagramApp, min: Point, max: Point) -> egui::Rect {
    egui::Rect::from_min_max(app.grid_to_screen(min), app.grid_to_screen(max))
}

impl DiagramApp {
    /// Renders the grid, the preview highlight and all blocks.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn render_diagram(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        if self.canvas.show_grid {
            self.draw_grid(painter, canvas_rect);
        }

        self.draw_drop_highlight(painter);

        let dragged = self.diagram.dragged_block();
        for block in self.diagram.blocks() {
            let opacity = block_opacity(block, dragged, self.diagram.config());
            self.draw_block(painter, block, opacity);
        }

        self.draw_drag_preview(painter);
    }

    /// Draws one line per row and column boundary.
    fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let grid = self.diagram.grid();
        let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(128, 128, 128, 48));
        let extent = self.diagram.snapshot().extent();

        for index in 0..=grid.rows() {
            let y = geometry::offset_of_index(index, grid.row_sizes());
            let from = self.grid_to_screen(Point::new(0.0, y));
            let to = self.grid_to_screen(Point::new(extent.x, y));
            painter.line_segment([from, to], stroke);
        }
        for index in 0..=grid.columns() {
            let x = geometry::offset_of_index(index, grid.column_sizes());
            let from = self.grid_to_screen(Point::new(x, 0.0));
            let to = self.grid_to_screen(Point::new(x, extent.y));
            painter.line_segment([from, to], stroke);
        }

        painter.rect_stroke(
            canvas_rect,
            0.0,
            egui::Stroke::new(1.0, egui::Color32::from_gray(90)),
            StrokeKind::Inside,
        );
    }

    /// Marks the cells the dragged block would occupy if dropped now.
    fn draw_drop_highlight(&self, painter: &egui::Painter) {
        let Some(candidate) = self.diagram.drag_preview() else {
            return;
        };
        let grid = self.diagram.grid();
        let (min, max) = geometry::rect_bounds(candidate, grid.row_sizes(), grid.column_sizes());
        let rect = to_rect(self, min, max);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgba_unmultiplied(100, 150, 255, 40));
        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(1.5, egui::Color32::from_rgb(100, 150, 255)),
            StrokeKind::Inside,
        );
    }

    /// Draws a block with a vertical gradient fill at the given opacity.
    fn draw_block(&self, painter: &egui::Painter, block: &Block, opacity: f32) {
        if opacity <= 0.0 {
            return;
        }
        let grid = self.diagram.grid();
        let (min, max) = geometry::rect_bounds(block.rect(), grid.row_sizes(), grid.column_sizes());
        let rect = to_rect(self, min, max).shrink(NODE_MARGIN);
        self.paint_block_body(painter, block, rect, opacity);
    }

    /// Draws the dragged block following the pointer.
    fn draw_drag_preview(&self, painter: &egui::Painter) {
        let (Some(dragged), Some(origin)) =
            (self.diagram.dragged_block(), self.interaction.preview_origin)
        else {
            return;
        };
        let Some(block) = self.diagram.block(dragged) else {
            return;
        };
        let grid = self.diagram.grid();
        let (min, max) = geometry::rect_bounds(block.rect(), grid.row_sizes(), grid.column_sizes());
        let size = max - min;
        let rect = to_rect(self, origin, origin + size).shrink(NODE_MARGIN);
        self.paint_block_body(painter, block, rect, self.diagram.config().node_opacity);
    }

    fn paint_block_body(&self, painter: &egui::Painter, block: &Block, rect: egui::Rect, opacity: f32) {
        let base = self
            .colors
            .get(&block.id())
            .copied()
            .unwrap_or(egui::Color32::GRAY);
        let (top, bottom) = gradient_stops(base, self.canvas.brightness);
        let (top, bottom) = (top.gamma_multiply(opacity), bottom.gamma_multiply(opacity));

        let mut mesh = egui::Mesh::default();
        mesh.colored_vertex(rect.left_top(), top);
        mesh.colored_vertex(rect.right_top(), top);
        mesh.colored_vertex(rect.left_bottom(), bottom);
        mesh.colored_vertex(rect.right_bottom(), bottom);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(2, 1, 3);
        painter.add(egui::Shape::mesh(mesh));

        let (stroke_color, width) = border_style(block, self.interaction.focused_block);
        painter.rect_stroke(
            rect,
            NODE_CORNER_RADIUS,
            egui::Stroke::new(width, stroke_color.gamma_multiply(opacity)),
            StrokeKind::Outside,
        );

        let grip = egui::Rect::from_min_max(
            rect.right_bottom() - egui::vec2(RESIZE_GRIP_SIZE - NODE_MARGIN, RESIZE_GRIP_SIZE - NODE_MARGIN),
            rect.right_bottom(),
        );
        painter.rect_filled(grip, 2.0, stroke_color.gamma_multiply(opacity * 0.8));

        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("{}×{}", block.column_span(), block.row_span()),
            egui::FontId::proportional(13.0),
            egui::Color32::BLACK.gamma_multiply(opacity),
        );
    }
}
