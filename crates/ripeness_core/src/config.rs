use crate::classifier::ClassifierConfig;
use crate::model_store::default_model_paths;
use crate::preprocess::INPUT_SIZE;
use crate::reference::DEFAULT_REFERENCE_ROOT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "fruit_ripeness.toml";
pub const CONFIG_ENV_VAR: &str = "FRUIT_RIPENESS_CONFIG";

/// Settings read from `fruit_ripeness.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model candidates, tried in order.
    pub model_paths: Vec<PathBuf>,
    pub reference_root: PathBuf,
    pub input_size: u32,
    pub apply_softmax: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_paths: default_model_paths(),
            reference_root: PathBuf::from(DEFAULT_REFERENCE_ROOT),
            input_size: INPUT_SIZE,
            apply_softmax: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config: {}", path.display()))?;
        let cfg: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        if cfg.input_size == 0 {
            anyhow::bail!("input_size must be positive in {}", path.display());
        }
        Ok(cfg)
    }

    /// Defaults when the file is absent or unusable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("{e:#}; using defaults");
                Self::default()
            }
        }
    }

    /// Location from `FRUIT_RIPENESS_CONFIG`, else the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            input_size: self.input_size,
            apply_softmax: self.apply_softmax,
        }
    }
}
