//! Application state and page dispatch.

mod classify;
mod home;
mod predict;
mod upload;

use eframe::{App, Frame, egui};
use ripeness_core::{ModelStatus, NavAction, Navigator, Page, first_reference_image};
use std::collections::HashMap;
use std::path::PathBuf;

use upload::Upload;

pub const APP_TITLE: &str = "Fruit Ripeness Detection";
const FOOTER: &str = "Artificial Intelligence Project • Semester 5 • 2025/2026";
const REFERENCE_SIZE: u32 = 320;

/// One-line message under the upload picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Status {
    #[default]
    Empty,
    Info(String),
    Error(String),
}

impl Status {
    fn show(&self, ui: &mut egui::Ui) {
        match self {
            Status::Empty => {}
            Status::Info(text) => {
                ui.label(text);
            }
            Status::Error(text) => {
                ui.colored_label(egui::Color32::RED, text);
            }
        }
    }
}

pub struct UiApp {
    nav: Navigator,
    model: &'static ModelStatus,
    reference_root: PathBuf,
    upload: Option<Upload>,
    status: Status,
    // None marks a label whose reference image is missing or unreadable.
    references: HashMap<String, Option<egui::TextureHandle>>,
}

impl UiApp {
    pub fn new(model: &'static ModelStatus, reference_root: PathBuf) -> Self {
        Self {
            nav: Navigator::new(),
            model,
            reference_root,
            upload: None,
            status: Status::Empty,
            references: HashMap::new(),
        }
    }

    fn page(&self) -> Page {
        self.nav.page()
    }

    /// Move between pages; leaving a page drops its upload and textures.
    fn navigate(&mut self, action: NavAction) {
        if self.nav.apply(action) {
            self.upload = None;
            self.status = Status::Empty;
            self.references.clear();
        }
    }

    fn render_back_button(&mut self, ui: &mut egui::Ui) {
        if ui.button("← Back to Home").clicked() {
            self.navigate(NavAction::Back);
        }
    }

    fn render_model_banner(&self, ui: &mut egui::Ui) {
        for warning in self.model.warnings() {
            ui.colored_label(egui::Color32::from_rgb(200, 140, 0), warning);
        }
        if let Some(error) = self.model.error() {
            ui.colored_label(egui::Color32::RED, format!("❌ {error}"));
        }
    }

    fn reference_texture(
        &mut self,
        ctx: &egui::Context,
        label: &str,
    ) -> Option<egui::TextureHandle> {
        if let Some(slot) = self.references.get(label) {
            return slot.clone();
        }

        let loaded = first_reference_image(&self.reference_root, label).and_then(|path| {
            match image::open(&path) {
                Ok(img) => {
                    let name = format!("reference:{label}");
                    Some(upload::texture_from_image(ctx, name, &img, REFERENCE_SIZE))
                }
                Err(e) => {
                    tracing::warn!("Failed to load reference image {}: {}", path.display(), e);
                    None
                }
            }
        });
        self.references.insert(label.to_string(), loaded.clone());
        loaded
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(FOOTER);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!("v{}", env!("RIPENESS_VERSION")));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_model_banner(ui);
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.page() {
                    Page::Home => self.render_home_panel(ui),
                    Page::Classify => self.render_classify_panel(ctx, ui),
                    Page::Predict => self.render_predict_panel(ctx, ui),
                });
        });
    }
}
