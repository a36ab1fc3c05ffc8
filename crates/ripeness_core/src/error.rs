use std::path::PathBuf;
use thiserror::Error;

/// Failures around the ripeness model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model file '{0}' not found!")]
    NotFound(String),

    #[error("Failed to load model from {path}\nError: {message}")]
    Load { path: PathBuf, message: String },

    #[error("Model is not loaded.")]
    NotLoaded,

    #[error("model returned no probabilities")]
    EmptyOutput,

    #[error("inference failed: {0}")]
    Inference(String),
}
