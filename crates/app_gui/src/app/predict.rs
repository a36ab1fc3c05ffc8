//! Detailed prediction page with the per-class probabilities.

use super::{Status, UiApp};
use eframe::egui;
use ripeness_core::{Prediction, export_probabilities_csv};
use rfd::FileDialog;
use std::path::Path;

const RESULT_STRIPE: egui::Color32 = egui::Color32::from_rgb(74, 144, 226);

impl UiApp {
    pub(super) fn render_predict_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.heading("Predict Ripeness - Detailed Mode");
        self.render_back_button(ui);
        ui.add_space(8.0);
        self.render_upload_picker(ctx, ui, "Upload fruit image...");

        let Some(prediction) = self.upload_result(ui).cloned() else {
            return;
        };

        ui.separator();
        egui::Frame::group(ui.style())
            .fill(egui::Color32::WHITE)
            .stroke(egui::Stroke::new(2.0, RESULT_STRIPE))
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.heading("Prediction Result");
                for line in result_lines(&prediction) {
                    ui.label(line);
                }
            });

        egui::CollapsingHeader::new("Show detailed probabilities (debug)").show(ui, |ui| {
            for line in probability_lines(&prediction) {
                ui.monospace(line);
            }
            ui.add_space(6.0);
            if ui.button("Export CSV").clicked()
                && let Some(path) = FileDialog::new()
                    .add_filter("CSV", &["csv"])
                    .set_file_name("fruit_probabilities.csv")
                    .save_file()
            {
                self.status = export_csv(&prediction, &path);
            }
        });
    }
}

fn export_csv(prediction: &Prediction, path: &Path) -> Status {
    match export_probabilities_csv(prediction, path) {
        Ok(()) => {
            tracing::info!("probabilities exported to {}", path.display());
            Status::Info(format!("CSV exported: {}", path.display()))
        }
        Err(e) => Status::Error(format!("Export failed: {e}")),
    }
}

fn result_lines(prediction: &Prediction) -> [String; 4] {
    let info = prediction.info();
    [
        format!("Fruit: {}", info.fruit),
        format!("Grade: {}", info.grade),
        format!("Condition: {}", info.condition),
        format!("Confidence: {:.2}%", prediction.confidence * 100.0),
    ]
}

fn probability_lines(prediction: &Prediction) -> Vec<String> {
    prediction
        .probabilities
        .iter()
        .map(|p| format!("{:25} : {:.6}", p.label, p.probability))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripeness_core::{CLASS_NAMES, decide};
    use rstest::rstest;

    fn prediction_for(idx: usize, p: f32) -> Prediction {
        let mut probs = vec![0.0; CLASS_NAMES.len()];
        probs[idx] = p;
        decide(&probs, &CLASS_NAMES).unwrap()
    }

    #[rstest]
    #[case(8, 0.9876, ["Fruit: Banana", "Grade: 2", "Condition: Ripe", "Confidence: 98.76%"])]
    #[case(5, 0.5, ["Fruit: Apple", "Grade: 3", "Condition: Rotten", "Confidence: 50.00%"])]
    #[case(3, 0.61, ["Fruit: Orange", "Grade: 1", "Condition: Unripe", "Confidence: 61.00%"])]
    fn result_box_lines(#[case] idx: usize, #[case] p: f32, #[case] expected: [&str; 4]) {
        assert_eq!(result_lines(&prediction_for(idx, p)), expected.map(String::from));
    }

    #[test]
    fn export_reports_success_and_failure() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let prediction = prediction_for(2, 1.0);

        let path = dir.path().join("probs.csv");
        let status = export_csv(&prediction, &path);
        assert_eq!(status, Status::Info(format!("CSV exported: {}", path.display())));
        assert!(std::fs::read_to_string(&path)?.contains("GreenOrange_1"));

        let bad = dir.path().join("no-such-dir").join("probs.csv");
        assert!(matches!(export_csv(&prediction, &bad), Status::Error(_)));
        Ok(())
    }

    #[test]
    fn probability_lines_are_padded_per_class() {
        let lines = probability_lines(&prediction_for(4, 1.0));
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "RottenBanana_3            : 0.000000");
        assert_eq!(lines[4], "RedApple_2                : 1.000000");
    }
}
