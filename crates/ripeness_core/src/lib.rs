//! Fruit ripeness classification: label table, navigation, preprocessing,
//! model loading and reference image lookup.

pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod labels;
pub mod model_store;
pub mod nav;
pub mod preprocess;
pub mod reference;

#[cfg(feature = "ort")]
pub use classifier::OnnxModel;
pub use classifier::{
    ClassifierConfig, LabelProbability, Prediction, ProbabilityModel, RipenessClassifier, decide,
    softmax,
};
pub use config::AppConfig;
pub use error::ModelError;
pub use export::export_probabilities_csv;
pub use labels::{CLASS_NAMES, Fruit, FruitInfo, GradeReference, fruit_info, reference_labels};
pub use model_store::{ModelCache, ModelStatus, global_model, load_model, load_model_with};
pub use nav::{NavAction, Navigator, Page};
pub use preprocess::{INPUT_SIZE, preprocess_bytes, preprocess_image};
pub use reference::{DEFAULT_REFERENCE_ROOT, first_reference_image};
