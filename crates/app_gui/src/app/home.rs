//! Landing page with the two entry buttons.

use super::{APP_TITLE, UiApp};
use eframe::egui;
use ripeness_core::NavAction;

const BUTTON_SIZE: egui::Vec2 = egui::vec2(360.0, 100.0);
const BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(167, 208, 240);

impl UiApp {
    pub(super) fn render_home_panel(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(70.0);
            ui.label(
                egui::RichText::new(format!("🍎🍌🍊 {APP_TITLE}"))
                    .size(44.0)
                    .strong()
                    .color(egui::Color32::from_rgb(44, 62, 80)),
            );
            ui.add_space(12.0);
            ui.label(
                egui::RichText::new("AI-Powered Ripeness Detection for Fruits")
                    .size(20.0)
                    .color(egui::Color32::from_rgb(90, 125, 156)),
            );
            ui.add_space(50.0);

            if big_button(ui, "🍏 DETECTION FRUIT") {
                self.navigate(NavAction::OpenClassify);
            }
            ui.add_space(18.0);
            if big_button(ui, "📊 PREDICT RIPENESS") {
                self.navigate(NavAction::OpenPredict);
            }
        });
    }
}

fn big_button(ui: &mut egui::Ui, text: &str) -> bool {
    let label = egui::RichText::new(text)
        .size(22.0)
        .color(egui::Color32::from_rgb(26, 60, 94));
    ui.add(
        egui::Button::new(label)
            .fill(BUTTON_FILL)
            .corner_radius(12.0)
            .min_size(BUTTON_SIZE),
    )
    .clicked()
}
