//! Picking, previewing and classifying the uploaded photo.

use super::{Status, UiApp};
use anyhow::{Context, Result};
use eframe::egui;
use image::DynamicImage;
use ripeness_core::{ModelError, Prediction};
use rfd::FileDialog;
use std::path::{Path, PathBuf};

const PREVIEW_SIZE: u32 = 960;
pub(super) const PREVIEW_WIDTH: f32 = 480.0;

/// The photo currently shown on a page.
pub struct Upload {
    pub path: PathBuf,
    pub preview: egui::TextureHandle,
    /// None when no model is loaded.
    pub outcome: Option<Result<Prediction, String>>,
}

pub(super) fn texture_from_image(
    ctx: &egui::Context,
    name: String,
    img: &DynamicImage,
    max_side: u32,
) -> egui::TextureHandle {
    let thumb = if img.width() > max_side || img.height() > max_side {
        img.thumbnail(max_side, max_side).to_rgba8()
    } else {
        img.to_rgba8()
    };
    let (w, h) = thumb.dimensions();
    let size = [w as usize, h as usize];
    let pixels = thumb.into_raw();
    let color = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
    ctx.load_texture(name, color, egui::TextureOptions::LINEAR)
}

fn read_image(path: &Path) -> Result<(Vec<u8>, DynamicImage)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("Cannot open image {}", path.display()))?;
    Ok((bytes, img))
}

impl UiApp {
    /// File picker plus preview of the last upload.
    pub(super) fn render_upload_picker(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        hint: &str,
    ) {
        ui.horizontal(|ui| {
            ui.label(hint);
            if ui.button("Browse files...").clicked()
                && let Some(path) = FileDialog::new()
                    .add_filter("Images", &["jpg", "jpeg", "png"])
                    .pick_file()
            {
                self.accept_upload(ctx, path);
            }
        });
        self.status.show(ui);

        if let Some(upload) = &self.upload {
            ui.add_space(8.0);
            ui.add(egui::Image::new(&upload.preview).max_width(PREVIEW_WIDTH));
            let name = upload
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(egui::RichText::new(format!("Uploaded Image: {name}")).small());
        }
    }

    fn accept_upload(&mut self, ctx: &egui::Context, path: PathBuf) {
        self.status = Status::Empty;
        let (bytes, img) = match read_image(&path) {
            Ok(read) => read,
            Err(e) => {
                tracing::warn!("{e:#}");
                self.status = Status::Error(format!("{e:#}"));
                self.upload = None;
                return;
            }
        };

        let outcome = self.model.classifier().map(|classifier| {
            classifier
                .classify_bytes(&bytes)
                .map_err(|e| format!("Classification failed: {e:#}"))
        });
        let name = format!("upload:{}", path.display());
        let preview = texture_from_image(ctx, name, &img, PREVIEW_SIZE);
        self.upload = Some(Upload {
            path,
            preview,
            outcome,
        });
    }

    /// Prediction of the current upload, or the reason there is none.
    pub(super) fn upload_result(&self, ui: &mut egui::Ui) -> Option<&Prediction> {
        let upload = self.upload.as_ref()?;
        match &upload.outcome {
            None => {
                ui.colored_label(egui::Color32::RED, ModelError::NotLoaded.to_string());
                None
            }
            Some(Err(message)) => {
                ui.colored_label(egui::Color32::RED, message);
                None
            }
            Some(Ok(prediction)) => Some(prediction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::unavailable;
    use image::{ImageFormat, Rgb, RgbImage};
    use ndarray::Array4;
    use ripeness_core::{ClassifierConfig, ModelStatus, ProbabilityModel, RipenessClassifier};
    use tempfile::tempdir;

    struct AlwaysRipeApple;

    impl ProbabilityModel for AlwaysRipeApple {
        fn predict(&self, _input: &Array4<f32>) -> Result<Vec<f32>> {
            let mut probs = vec![0.0; 9];
            probs[4] = 1.0;
            Ok(probs)
        }
    }

    fn ready() -> &'static ModelStatus {
        Box::leak(Box::new(ModelStatus::Ready {
            classifier: RipenessClassifier::new(
                Box::new(AlwaysRipeApple),
                ClassifierConfig::default(),
            ),
            path: PathBuf::from("model_fruit.onnx"),
            warnings: Vec::new(),
        }))
    }

    fn write_png(dir: &Path) -> Result<PathBuf> {
        let path = dir.join("apple.png");
        RgbImage::from_pixel(24, 16, Rgb([200, 30, 30])).save_with_format(&path, ImageFormat::Png)?;
        Ok(path)
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = read_image(Path::new("missing/fruit.png")).unwrap_err();
        assert!(format!("{err:#}").contains("missing/fruit.png"));
    }

    #[test]
    fn upload_without_model_keeps_preview_but_no_prediction() -> Result<()> {
        let dir = tempdir()?;
        let path = write_png(dir.path())?;
        let ctx = egui::Context::default();
        let mut app = UiApp::new(unavailable(), dir.path().to_path_buf());

        app.accept_upload(&ctx, path.clone());

        assert_eq!(app.status, Status::Empty);
        let upload = app.upload.as_ref().expect("upload kept");
        assert_eq!(upload.path, path);
        assert!(upload.outcome.is_none());
        assert_eq!(upload.preview.size(), [24, 16]);

        let mut prediction_shown = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                prediction_shown = app.upload_result(ui).is_some();
            });
        });
        assert!(!prediction_shown);
        Ok(())
    }

    #[test]
    fn undecodable_upload_sets_error_and_drops_previous() -> Result<()> {
        let dir = tempdir()?;
        let good = write_png(dir.path())?;
        let garbage = dir.path().join("broken.jpg");
        std::fs::write(&garbage, b"this is not a jpeg")?;
        let ctx = egui::Context::default();
        let mut app = UiApp::new(unavailable(), dir.path().to_path_buf());

        app.accept_upload(&ctx, good);
        assert!(app.upload.is_some());
        app.accept_upload(&ctx, garbage);

        assert!(app.upload.is_none());
        match &app.status {
            Status::Error(text) => assert!(text.contains("broken.jpg")),
            other => panic!("expected an error status, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn upload_with_model_is_classified() -> Result<()> {
        let dir = tempdir()?;
        let path = write_png(dir.path())?;
        let ctx = egui::Context::default();
        let mut app = UiApp::new(ready(), dir.path().to_path_buf());

        app.accept_upload(&ctx, path);

        let upload = app.upload.as_ref().expect("upload kept");
        match &upload.outcome {
            Some(Ok(prediction)) => {
                assert_eq!(prediction.label, "RedApple_2");
                assert_eq!(prediction.info().condition, "Ripe");
            }
            other => panic!("expected a prediction, got {:?}", other.as_ref().map(|o| o.is_ok())),
        }
        Ok(())
    }
}
