use crate::error::ModelError;
use crate::labels::{CLASS_NAMES, FruitInfo, fruit_info};
use crate::preprocess::{INPUT_SIZE, preprocess_bytes};
use anyhow::Result;
use ndarray::Array4;
use serde::Serialize;

/// Anything that turns a preprocessed image into per-class probabilities.
pub trait ProbabilityModel: Send + Sync {
    /// Probability vector over the known labels, in [`CLASS_NAMES`] order.
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>>;
}

/// Probability assigned to one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelProbability {
    pub label: String,
    pub probability: f32,
}

/// Top label of a model run plus the full distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    /// Probability of `label` in [0,1].
    pub confidence: f32,
    pub probabilities: Vec<LabelProbability>,
}

impl Prediction {
    pub fn info(&self) -> FruitInfo {
        fruit_info(Some(&self.label))
    }
}

/// Pick the most likely label. Ties go to the lower index; NaN never wins
/// over a real probability.
pub fn decide(probabilities: &[f32], labels: &[&str]) -> Result<Prediction, ModelError> {
    let (best_idx, &best_prob) = probabilities
        .iter()
        .enumerate()
        .reduce(|best, cur| {
            if best.1.is_nan() || cur.1 > best.1 {
                cur
            } else {
                best
            }
        })
        .ok_or(ModelError::EmptyOutput)?;

    let label_at = |idx: usize| {
        labels
            .get(idx)
            .map(|l| l.to_string())
            .unwrap_or_else(|| format!("class_{idx}"))
    };

    Ok(Prediction {
        label: label_at(best_idx),
        confidence: best_prob,
        probabilities: probabilities
            .iter()
            .enumerate()
            .map(|(idx, &probability)| LabelProbability {
                label: label_at(idx),
                probability,
            })
            .collect(),
    })
}

pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|x| x / sum).collect()
}

/// Input and output handling around a [`ProbabilityModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub input_size: u32,
    /// Set when the exported model emits logits instead of probabilities.
    pub apply_softmax: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            input_size: INPUT_SIZE,
            apply_softmax: false,
        }
    }
}

/// A loaded model bundled with its preprocessing settings.
pub struct RipenessClassifier {
    model: Box<dyn ProbabilityModel>,
    cfg: ClassifierConfig,
}

impl RipenessClassifier {
    pub fn new(model: Box<dyn ProbabilityModel>, cfg: ClassifierConfig) -> Self {
        Self { model, cfg }
    }

    /// Decode, preprocess and classify an uploaded image.
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<Prediction> {
        let input = preprocess_bytes(bytes, self.cfg.input_size)?;
        self.classify_tensor(&input)
    }

    pub fn classify_tensor(&self, input: &Array4<f32>) -> Result<Prediction> {
        let raw = self.model.predict(input)?;
        let probs = if self.cfg.apply_softmax {
            softmax(&raw)
        } else {
            raw
        };
        let prediction = decide(&probs, &CLASS_NAMES)?;
        tracing::info!(
            "predicted {} ({:.2}%)",
            prediction.label,
            prediction.confidence * 100.0
        );
        Ok(prediction)
    }
}

#[cfg(feature = "ort")]
pub use onnx::OnnxModel;

#[cfg(feature = "ort")]
mod onnx {
    use super::ProbabilityModel;
    use crate::error::ModelError;
    use anyhow::{Result, anyhow};
    use ndarray::{Array4, CowArray};
    use once_cell::sync::OnceCell;
    use ort::{
        GraphOptimizationLevel, SessionBuilder, environment::Environment, session::Session,
        tensor::OrtOwnedTensor, value::Value,
    };
    use std::path::Path;
    use std::sync::Arc;

    static ORT_ENV: OnceCell<Arc<Environment>> = OnceCell::new();

    fn environment() -> Result<Arc<Environment>> {
        ORT_ENV
            .get_or_try_init(|| {
                let env = Environment::builder()
                    .with_name("fruit-ripeness")
                    .build()?;
                Ok::<_, anyhow::Error>(env.into_arc())
            })
            .cloned()
    }

    /// ONNX export of the ripeness model run through ONNX Runtime.
    pub struct OnnxModel {
        session: Session,
    }

    impl OnnxModel {
        pub fn load(path: &Path) -> Result<Self> {
            let env = environment()?;
            let session = SessionBuilder::new(&env)?
                .with_optimization_level(GraphOptimizationLevel::Level1)?
                .with_model_from_file(path)?;
            Ok(Self { session })
        }
    }

    impl ProbabilityModel for OnnxModel {
        fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
            let cow = CowArray::from(input.view().into_dyn());
            let value = Value::from_array(self.session.allocator(), &cow)
                .map_err(|e| anyhow!("cannot build input tensor: {e}"))?;
            let outputs: Vec<Value> = self
                .session
                .run(vec![value])
                .map_err(|e| ModelError::Inference(e.to_string()))?;
            let first = outputs.first().ok_or(ModelError::EmptyOutput)?;
            let probs: OrtOwnedTensor<f32, _> = first.try_extract()?;
            let scores: Vec<f32> = probs.view().iter().cloned().collect();
            if scores.is_empty() {
                return Err(ModelError::EmptyOutput.into());
            }
            Ok(scores)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct FixedModel(Vec<f32>);

    impl ProbabilityModel for FixedModel {
        fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
            assert_eq!(input.shape(), &[1, 150, 150, 3]);
            Ok(self.0.clone())
        }
    }

    fn one_hot(idx: usize, p: f32) -> Vec<f32> {
        let rest = (1.0 - p) / 8.0;
        (0..9).map(|i| if i == idx { p } else { rest }).collect()
    }

    #[test]
    fn decide_picks_argmax_and_keeps_distribution() {
        let probs = one_hot(8, 0.9);
        let pred = decide(&probs, &CLASS_NAMES).unwrap();
        assert_eq!(pred.label, "YellowBanana_1");
        assert_relative_eq!(pred.confidence, 0.9);
        assert_eq!(pred.probabilities.len(), 9);
        assert_eq!(pred.probabilities[0].label, "RottenBanana_3");
        let info = pred.info();
        assert_eq!((info.grade, info.condition), (2, "Ripe"));
    }

    #[test]
    fn decide_breaks_ties_on_first_index() {
        let pred = decide(&[0.4, 0.4, 0.2], &CLASS_NAMES).unwrap();
        assert_eq!(pred.label, "RottenBanana_3");
    }

    #[test]
    fn decide_names_extra_classes_by_index() {
        let mut probs = vec![0.0; 10];
        probs[9] = 1.0;
        let pred = decide(&probs, &CLASS_NAMES).unwrap();
        assert_eq!(pred.label, "class_9");
        assert_eq!(pred.info(), FruitInfo::UNKNOWN);
    }

    #[test]
    fn decide_rejects_empty_output() {
        assert!(matches!(decide(&[], &CLASS_NAMES), Err(ModelError::EmptyOutput)));
    }

    #[test]
    fn decide_skips_nan_entries() {
        let pred = decide(&[f32::NAN, 0.7, 0.3], &CLASS_NAMES).unwrap();
        assert_eq!(pred.label, "GreenApple_1");
    }

    #[test]
    fn softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(probs.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn classifier_runs_preprocess_and_decide() -> Result<()> {
        let img = image::DynamicImage::new_rgb8(32, 32);
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png)?;

        let clf = RipenessClassifier::new(
            Box::new(FixedModel(one_hot(5, 0.8))),
            ClassifierConfig::default(),
        );
        let pred = clf.classify_bytes(bytes.get_ref())?;
        assert_eq!(pred.label, "RottenApple_3");
        assert_eq!(pred.info().condition, "Rotten");
        Ok(())
    }

    #[test]
    fn classifier_applies_softmax_when_configured() -> Result<()> {
        let clf = RipenessClassifier::new(
            Box::new(FixedModel(vec![0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])),
            ClassifierConfig {
                apply_softmax: true,
                ..ClassifierConfig::default()
            },
        );
        let pred = clf.classify_tensor(&Array4::zeros((1, 150, 150, 3)))?;
        assert_eq!(pred.label, "GreenOrange_1");
        assert!(pred.confidence < 1.0 && pred.confidence > 0.9);
        let total: f32 = pred.probabilities.iter().map(|p| p.probability).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-5);
        Ok(())
    }
}
