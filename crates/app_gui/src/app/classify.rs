//! Classify page: upload a photo, see the grade gallery for its fruit.

use super::UiApp;
use eframe::egui;
use ripeness_core::reference_labels;

impl UiApp {
    pub(super) fn render_classify_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.heading("Detection Fruit - Ripeness");
        self.render_back_button(ui);
        ui.add_space(8.0);
        self.render_upload_picker(ctx, ui, "Upload fruit image (jpg/png)");

        let Some(info) = self.upload_result(ui).map(|p| p.info()) else {
            return;
        };

        ui.add_space(12.0);
        ui.heading("📸 Ripeness Grade");
        let Some(refs) = reference_labels(info.fruit) else {
            ui.label(format!("{}: {}", info.fruit, info.condition));
            return;
        };

        let cells: Vec<_> = refs
            .iter()
            .map(|r| (r.caption, self.reference_texture(ctx, r.label)))
            .collect();
        ui.columns(cells.len(), |cols| {
            for (col, (caption, texture)) in cols.iter_mut().zip(cells) {
                // Missing reference images leave the column empty.
                if let Some(texture) = texture {
                    let width = col.available_width();
                    col.add(egui::Image::new(&texture).max_width(width));
                    col.label(caption);
                }
            }
        });
    }
}
