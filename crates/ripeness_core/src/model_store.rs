//! One-time model loading with a process-wide cache.

use crate::classifier::{ClassifierConfig, ProbabilityModel, RipenessClassifier};
use crate::error::ModelError;
use anyhow::Result;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

pub const MODEL_FILE_NAME: &str = "model_fruit.onnx";

/// Outcome of trying to load the model.
pub enum ModelStatus {
    Ready {
        classifier: RipenessClassifier,
        path: PathBuf,
        /// Load failures of candidates tried before `path`.
        warnings: Vec<String>,
    },
    Unavailable {
        warnings: Vec<String>,
        error: String,
    },
}

impl ModelStatus {
    pub fn classifier(&self) -> Option<&RipenessClassifier> {
        match self {
            ModelStatus::Ready { classifier, .. } => Some(classifier),
            ModelStatus::Unavailable { .. } => None,
        }
    }

    pub fn loaded_path(&self) -> Option<&Path> {
        match self {
            ModelStatus::Ready { path, .. } => Some(path.as_path()),
            ModelStatus::Unavailable { .. } => None,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            ModelStatus::Ready { warnings, .. } | ModelStatus::Unavailable { warnings, .. } => {
                warnings.as_slice()
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ModelStatus::Ready { .. } => None,
            ModelStatus::Unavailable { error, .. } => Some(error.as_str()),
        }
    }
}

/// Working directory, `models/`, then next to the executable.
pub fn default_model_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(MODEL_FILE_NAME),
        Path::new("models").join(MODEL_FILE_NAME),
    ];
    match std::env::current_exe() {
        Ok(exe) => {
            if let Some(dir) = exe.parent() {
                paths.push(dir.join(MODEL_FILE_NAME));
            }
        }
        Err(e) => tracing::debug!("cannot resolve executable dir: {e}"),
    }
    paths
}

/// Try each existing candidate in order with `loader`; the first success wins.
pub fn load_model_with<F>(paths: &[PathBuf], cfg: ClassifierConfig, mut loader: F) -> ModelStatus
where
    F: FnMut(&Path) -> Result<Box<dyn ProbabilityModel>>,
{
    let mut warnings = Vec::new();
    for path in paths {
        if !path.exists() {
            continue;
        }
        match loader(path) {
            Ok(model) => {
                tracing::info!("model loaded from {}", path.display());
                return ModelStatus::Ready {
                    classifier: RipenessClassifier::new(model, cfg),
                    path: path.clone(),
                    warnings,
                };
            }
            Err(err) => {
                let err = ModelError::Load {
                    path: path.clone(),
                    message: format!("{err:#}"),
                };
                tracing::warn!("{err}");
                warnings.push(err.to_string());
            }
        }
    }
    let error = ModelError::NotFound(MODEL_FILE_NAME.to_string()).to_string();
    tracing::error!("{error}");
    ModelStatus::Unavailable { warnings, error }
}

/// Load with the compiled-in inference backend.
pub fn load_model(paths: &[PathBuf], cfg: ClassifierConfig) -> ModelStatus {
    load_model_with(paths, cfg, onnx_loader)
}

#[cfg(feature = "ort")]
fn onnx_loader(path: &Path) -> Result<Box<dyn ProbabilityModel>> {
    Ok(Box::new(crate::classifier::OnnxModel::load(path)?))
}

#[cfg(not(feature = "ort"))]
fn onnx_loader(_path: &Path) -> Result<Box<dyn ProbabilityModel>> {
    anyhow::bail!("ONNX Runtime support not compiled in")
}

/// Memoizes a [`ModelStatus`]; the loader runs at most once.
pub struct ModelCache {
    cell: OnceCell<ModelStatus>,
}

impl ModelCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_load<F>(&self, load: F) -> &ModelStatus
    where
        F: FnOnce() -> ModelStatus,
    {
        self.cell.get_or_init(load)
    }

    pub fn get(&self) -> Option<&ModelStatus> {
        self.cell.get()
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_MODEL: ModelCache = ModelCache::new();

/// Process-wide model; later calls reuse the first outcome whatever their arguments.
pub fn global_model(paths: &[PathBuf], cfg: ClassifierConfig) -> &'static ModelStatus {
    GLOBAL_MODEL.get_or_load(|| load_model(paths, cfg))
}
