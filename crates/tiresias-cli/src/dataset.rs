//! Batch files: the rows under attack, as JSON.
//!
//! ```json
//! { "rows": [[0.5], [2.0]], "labels": [1, 0], "truth": [1.0, 0.0] }
//! ```
//!
//! `rows` omit the attacked column. `labels` are the model's predictions
//! for the full rows; `truth` holds the real attacked values and is only
//! needed for `evaluate`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use tiresias::prelude::*;

#[derive(Debug, Clone, Deserialize)]
pub struct BatchFile {
    pub rows: Vec<Vec<f64>>,
    #[serde(default)]
    pub labels: Option<Vec<ClassLabel>>,
    #[serde(default)]
    pub truth: Option<Vec<FeatureValue>>,
}

impl BatchFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse batch: {}", path.display()))
    }

    /// Split into the observation batch and the ground truth, if any.
    pub fn into_batch(self) -> Result<(ObservationBatch, Option<Vec<FeatureValue>>)> {
        let batch =
            ObservationBatch::from_rows(self.rows, self.labels).context("Malformed batch")?;
        Ok((batch, self.truth))
    }
}
