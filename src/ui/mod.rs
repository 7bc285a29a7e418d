//! User interface for the grid diagram editor.
//!
//! The UI is a thin collaborator around [`crate::Diagram`]: it lays the grid
//! out over the canvas every frame, forwards pointer input to the drag and
//! resize operations, and paints whatever state the diagram reports.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main DiagramApp
//! - `canvas` - Pointer handling for dragging and resizing blocks
//! - `rendering` - Drawing the grid, blocks and drag preview

mod canvas;
mod rendering;
mod state;

pub use rendering::{block_opacity, border_style, gradient_stops, scale_color};
pub use state::{DiagramApp, PointerEvent};

use eframe::egui;

impl eframe::App for DiagramApp {
    /// Main update function called by egui for each frame.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl DiagramApp {
    /// Draws one frame: the toolbar on top and the canvas below it.
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });

        if self.needs_repaint.replace(false) {
            ctx.request_repaint();
        }
    }

    /// Draws the toolbar with grid size controls and block actions.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let grid = self.diagram.grid();
            let (max_rows, max_columns) = (grid.max_rows(), grid.max_columns());
            let mut rows = grid.rows();
            let mut columns = grid.columns();

            ui.label("Rows");
            if ui
                .add(egui::DragValue::new(&mut rows).range(1..=max_rows))
                .changed()
            {
                self.diagram.set_row_count(rows);
            }
            ui.label("Columns");
            if ui
                .add(egui::DragValue::new(&mut columns).range(1..=max_columns))
                .changed()
            {
                self.diagram.set_column_count(columns);
            }

            ui.separator();

            if ui.button("Scale up").clicked() {
                self.diagram.scale_up();
            }
            if ui.button("Add block").clicked() {
                self.add_block(0, 0, 2, 2);
            }

            ui.separator();

            ui.checkbox(&mut self.canvas.show_grid, "Show grid");
            ui.add(egui::Slider::new(&mut self.canvas.brightness, 0.5..=1.5).text("Brightness"));

            ui.separator();

            let invalid = self.diagram.invalid_blocks().len();
            ui.label(format!(
                "{} blocks, {} overlapping",
                self.diagram.blocks().len(),
                invalid
            ));
            if let Some(cell) = self.interaction.preview_cell {
                ui.label(format!("→ row {}, column {}", cell.row, cell.column));
            }
        });
    }

    /// Draws the canvas and handles its pointer input.
    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        let canvas_rect = response.rect;
        self.canvas.origin = canvas_rect.min;
        self.diagram.arrange(canvas_rect.width(), canvas_rect.height());

        self.handle_canvas_pointer(ui, &response);

        if response.secondary_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let point = self.screen_to_grid(pos);
                if let Some(id) = self.diagram.block_at_point(point) {
                    self.remove_block(id);
                }
            }
        }

        self.render_diagram(&painter, canvas_rect);
    }
}
