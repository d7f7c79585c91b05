//! Inference results with per-row provenance.

use serde::Serialize;

use tiresias_core::types::FeatureValue;

use crate::evidence::CandidateEvidence;

/// Which stage decided a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceSource {
    ExactMatch,
    Fallback,
}

impl std::fmt::Display for InferenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceSource::ExactMatch => write!(f, "exact-match"),
            InferenceSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Inferred values for one batch, the stage behind each value and the
/// evidence gathered per candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceReport {
    pub(crate) values: Vec<FeatureValue>,
    pub(crate) sources: Vec<InferenceSource>,
    pub(crate) evidence: Vec<CandidateEvidence>,
}

impl InferenceReport {
    pub(crate) fn empty() -> Self {
        Self {
            values: Vec::new(),
            sources: Vec::new(),
            evidence: Vec::new(),
        }
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    pub fn sources(&self) -> &[InferenceSource] {
        &self.sources
    }

    pub fn evidence(&self) -> &[CandidateEvidence] {
        &self.evidence
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(value, source)` for each row, in batch order.
    pub fn rows(&self) -> impl Iterator<Item = (FeatureValue, InferenceSource)> + '_ {
        self.values.iter().copied().zip(self.sources.iter().copied())
    }

    /// Rows resolved by the exact-match stage.
    pub fn exact_match_count(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| **s == InferenceSource::ExactMatch)
            .count()
    }

    pub fn into_values(self) -> Vec<FeatureValue> {
        self.values
    }
}
