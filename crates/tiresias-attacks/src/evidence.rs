//! Per-candidate evidence and the two decision stages built on it.
//!
//! For every candidate value the engine records, per row, the class the
//! model predicts once that value is spliced in and the candidate's
//! weighted leaf probability. The exact-match stage turns the predicted
//! classes into a [`RowVerdict`]; the fallback stage picks the heaviest
//! candidate.

use ndarray::Array1;
use serde::Serialize;

use tiresias_core::probe::argmax;
use tiresias_core::types::{ClassLabel, FeatureValue};

/// Everything the model revealed about one candidate value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateEvidence {
    pub value: FeatureValue,
    pub prior: f64,
    /// Predicted class for each row with this value spliced in.
    pub predicted_class: Vec<ClassLabel>,
    /// Leaf sample fraction times prior, for each row.
    pub weighted_probability: Vec<f64>,
}

/// Outcome of the exact-match stage for a single row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum RowVerdict {
    /// Exactly one candidate reproduces the observed label.
    Conclusive(FeatureValue),
    /// No candidate, or more than one, reproduces it.
    Inconclusive,
}

impl RowVerdict {
    pub fn value(&self) -> Option<FeatureValue> {
        match self {
            RowVerdict::Conclusive(v) => Some(*v),
            RowVerdict::Inconclusive => None,
        }
    }

    pub fn is_conclusive(&self) -> bool {
        matches!(self, RowVerdict::Conclusive(_))
    }
}

/// Compare each candidate's prediction for `row` with the observed label.
///
/// Several matching candidates are ambiguous and stay inconclusive; they
/// are never resolved by order or prior here.
pub fn exact_match(
    evidence: &[CandidateEvidence],
    observed: Option<ClassLabel>,
    row: usize,
) -> RowVerdict {
    let Some(label) = observed else {
        return RowVerdict::Inconclusive;
    };

    let mut matches = evidence
        .iter()
        .filter(|e| e.predicted_class[row] == label)
        .map(|e| e.value);

    match (matches.next(), matches.next()) {
        (Some(value), None) => RowVerdict::Conclusive(value),
        _ => RowVerdict::Inconclusive,
    }
}

/// Candidate with the largest weighted probability for `row`.
///
/// Ties go to the first candidate in iteration order. `None` only when
/// there is no evidence at all.
pub fn fallback(evidence: &[CandidateEvidence], row: usize) -> Option<FeatureValue> {
    if evidence.is_empty() {
        return None;
    }
    let weights: Array1<f64> = evidence
        .iter()
        .map(|e| e.weighted_probability[row])
        .collect();
    Some(evidence[argmax(weights.view())].value)
}
