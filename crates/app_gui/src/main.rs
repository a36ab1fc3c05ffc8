mod app;

use app::{APP_TITLE, UiApp};
use eframe::{NativeOptions, egui};
use ripeness_core::{AppConfig, global_model};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path = AppConfig::default_path();
    let config = AppConfig::load_or_default(&config_path);
    tracing::info!(
        "reference images from {}, {} model candidate(s)",
        config.reference_root.display(),
        config.model_paths.len()
    );

    // Loaded once; every page reuses this handle.
    let model = global_model(&config.model_paths, config.classifier_config());
    if let Some(path) = model.loaded_path() {
        tracing::info!("classification enabled with {}", path.display());
    } else {
        tracing::warn!("classification disabled, running without a model");
    }

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };
    let reference_root = config.reference_root;
    if let Err(e) = eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(UiApp::new(model, reference_root)))),
    ) {
        eprintln!("Application stopped with error: {e}");
    }
}
