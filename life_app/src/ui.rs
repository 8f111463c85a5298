// ui.rs - Board rendering, editing and controls

use std::time::Instant;

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use life_core::Shape;

use crate::LifeApp;

/// Pointer position in cell units, shifted half a cell so the shape
/// centre lands on the cell under the cursor.
fn pointer_cell(board: Rect, cell_size: f32, pos: Pos2) -> (f64, f64) {
    let local = pos - board.min;
    (
        f64::from(local.x / cell_size) - 0.5,
        f64::from(local.y / cell_size) - 0.5,
    )
}

impl LifeApp {

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("▶ Start").clicked() {
                self.sim.start(Instant::now());
            }
            if ui.button("⏩ Quick").clicked() {
                self.sim.start_quick(Instant::now());
            }
            if ui.button("⏸ Stop").clicked() {
                self.sim.stop();
            }
            if ui.button("Step").clicked() {
                self.sim.step();
            }
            if ui.button("⏹ Clear").clicked() {
                self.sim.clear();
            }

            ui.separator();

            ui.label("Shape:");
            egui::ComboBox::from_id_source("shape_selector")
                .selected_text(self.selected_shape.name())
                .show_ui(ui, |ui| {
                    for shape in Shape::ALL {
                        ui.selectable_value(&mut self.selected_shape, shape, shape.name());
                    }
                });

            ui.separator();

            ui.label(format!("Generation: {}", self.sim.generation()));
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let grid = self.sim.grid();
        let (width, height) = (grid.width(), grid.height());
        let size = Vec2::new(width as f32, height as f32) * self.cell_size;

        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        let board = response.rect;

        painter.rect_filled(board, 0.0, Color32::WHITE);

        for y in 0..height {
            for x in 0..width {
                let rect = Rect::from_min_size(
                    board.min + Vec2::new(x as f32, y as f32) * self.cell_size,
                    Vec2::splat(self.cell_size),
                );
                if grid.get_state(x, y) {
                    painter.rect_filled(rect, 0.0, self.live_color);
                }
                painter.rect_stroke(rect, 0.0, Stroke::new(0.5, self.grid_color));
            }
        }

        // The edit point is UI state only; the board never sees it.
        self.edit_point = response.hover_pos().map(|pos| {
            let (x, y) = pointer_cell(board, self.cell_size, pos);
            (x.floor() as i64, y.floor() as i64)
        });
        if let Some((x, y)) = self.edit_point {
            let rect = Rect::from_min_size(
                board.min + Vec2::new(x as f32, y as f32) * self.cell_size,
                Vec2::splat(self.cell_size),
            );
            painter.rect_stroke(rect, 0.0, Stroke::new(1.0, self.edit_color));
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let (x, y) = pointer_cell(board, self.cell_size, pos);
                self.sim.place(x, y, self.selected_shape);
            }
        }
    }

    fn save_restore(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                self.serialised = self.sim.save();
            }
            ui.text_edit_singleline(&mut self.serialised);
            if ui.button("Restore").clicked() {
                self.sim.restore(self.serialised.trim());
            }
        });
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.sim.tick(now);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            self.controls(ui);
            ui.separator();

            self.board(ui);
            ui.separator();

            self.save_restore(ui);

            let population = self.sim.grid().population();
            let cells = self.sim.grid().cells().len();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {population}"));
                ui.label(format!("Population: {:.1}%", population as f32 / cells as f32 * 100.0));
            });
        });

        // Keep frames coming while running; otherwise egui repaints on input.
        if let Some(remaining) = self.sim.ticker().remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}
