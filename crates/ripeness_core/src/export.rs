use crate::classifier::Prediction;
use crate::labels::fruit_info;
use anyhow::Result;
use std::path::Path;

/// Export the per-class probabilities of a prediction to CSV with headers:
/// label,probability,fruit,grade,condition
pub fn export_probabilities_csv(prediction: &Prediction, path: impl AsRef<Path>) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["label", "probability", "fruit", "grade", "condition"])?;

    for row in &prediction.probabilities {
        let info = fruit_info(Some(&row.label));
        wtr.write_record([
            row.label.as_str(),
            format!("{:.6}", row.probability).as_str(),
            info.fruit.to_string().as_str(),
            info.grade.to_string().as_str(),
            info.condition,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
