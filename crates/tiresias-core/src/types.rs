//! Shared types for attribute inference.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{AttackError, AttackResult};

/// Value of a single feature. Categorical and boolean features are
/// expressed by their numeric code, the same way the model consumes them.
pub type FeatureValue = f64;

/// Class index produced by a classifier (the argmax column of its
/// probability output).
pub type ClassLabel = usize;

/// Identifier of a node inside a tree-structured model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Which column of the model's full feature layout is under attack.
///
/// Immutable once built. The index refers to the layout the model was
/// trained on; the attacked rows carry every column except this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackConfig {
    attack_feature: usize,
}

impl AttackConfig {
    /// Build a configuration from a signed index, as read from a config
    /// file or command line. Negative indexes are a configuration error.
    pub fn new(attack_feature: i64) -> AttackResult<Self> {
        if attack_feature < 0 {
            return Err(AttackError::configuration(format!(
                "attack feature must be non-negative, got {}",
                attack_feature
            )));
        }
        let attack_feature = usize::try_from(attack_feature).map_err(|_| {
            AttackError::configuration(format!(
                "attack feature {} does not fit in a column index",
                attack_feature
            ))
        })?;
        Ok(Self { attack_feature })
    }

    /// Build a configuration from an index that is already known to be valid.
    pub fn from_index(attack_feature: usize) -> Self {
        Self { attack_feature }
    }

    pub fn attack_feature(&self) -> usize {
        self.attack_feature
    }
}

/// Candidate values for the attacked feature with their prior probabilities.
///
/// `values` and `priors` are parallel sequences; equal length is enforced
/// here so the engine never sees a malformed pair. Iteration order is the
/// caller's order and decides fallback ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCandidateSet")]
pub struct CandidateSet {
    values: Vec<FeatureValue>,
    priors: Vec<f64>,
}

/// Unchecked wire form; deserialization goes through [`CandidateSet::new`].
#[derive(Deserialize)]
struct RawCandidateSet {
    values: Vec<FeatureValue>,
    priors: Vec<f64>,
}

impl TryFrom<RawCandidateSet> for CandidateSet {
    type Error = AttackError;

    fn try_from(raw: RawCandidateSet) -> AttackResult<Self> {
        Self::new(raw.values, raw.priors)
    }
}

impl CandidateSet {
    pub fn new(values: Vec<FeatureValue>, priors: Vec<f64>) -> AttackResult<Self> {
        if values.is_empty() {
            return Err(AttackError::MissingArgument("values"));
        }
        if priors.len() != values.len() {
            return Err(AttackError::shape_mismatch(
                "priors",
                values.len(),
                priors.len(),
            ));
        }
        Ok(Self { values, priors })
    }

    /// Build from optionally supplied sequences, reporting whichever is
    /// absent. `priors` is checked before `values`.
    pub fn from_parts(
        values: Option<Vec<FeatureValue>>,
        priors: Option<Vec<f64>>,
    ) -> AttackResult<Self> {
        let priors = priors.ok_or(AttackError::MissingArgument("priors"))?;
        let values = values.ok_or(AttackError::MissingArgument("values"))?;
        Self::new(values, priors)
    }

    /// Uniform prior over the given values.
    pub fn uniform(values: Vec<FeatureValue>) -> AttackResult<Self> {
        let n = values.len();
        let prior = if n > 0 { 1.0 / n as f64 } else { 0.0 };
        Self::new(values, vec![prior; n])
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(value, prior)` pairs in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureValue, f64)> + '_ {
        self.values.iter().copied().zip(self.priors.iter().copied())
    }

    /// The candidate with the highest prior; the first one on ties.
    pub fn most_probable(&self) -> FeatureValue {
        let mut best = 0;
        for (i, prior) in self.priors.iter().enumerate() {
            if *prior > self.priors[best] {
                best = i;
            }
        }
        self.values[best]
    }
}

/// Rows under attack, with the attacked column removed, plus the labels the
/// model produced for the full rows (when known).
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationBatch {
    x: Array2<f64>,
    y: Option<Vec<ClassLabel>>,
}

impl ObservationBatch {
    pub fn new(x: Array2<f64>, y: Option<Vec<ClassLabel>>) -> AttackResult<Self> {
        if let Some(labels) = &y {
            if labels.len() != x.nrows() {
                return Err(AttackError::shape_mismatch(
                    "labels",
                    x.nrows(),
                    labels.len(),
                ));
            }
        }
        Ok(Self { x, y })
    }

    /// Build from row vectors. Every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>, y: Option<Vec<ClassLabel>>) -> AttackResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(AttackError::shape_mismatch("row width", n_cols, row.len()));
            }
            data.extend(row);
        }
        let x = Array2::from_shape_vec((n_rows, n_cols), data)
            .map_err(|e| AttackError::configuration(e.to_string()))?;
        Self::new(x, y)
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn labels(&self) -> Option<&[ClassLabel]> {
        self.y.as_deref()
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    /// Width of the attacked rows (full layout minus one).
    pub fn n_known_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn negative_attack_feature_is_rejected() {
        let err = AttackConfig::new(-1).unwrap_err();
        assert!(matches!(err, AttackError::Configuration(_)));
    }

    #[test]
    fn zero_attack_feature_is_valid() {
        assert_eq!(AttackConfig::new(0).unwrap().attack_feature(), 0);
    }

    #[test]
    fn candidate_lengths_must_agree() {
        let err = CandidateSet::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert_eq!(err, AttackError::shape_mismatch("priors", 2, 1));
    }

    #[test]
    fn missing_parts_are_named() {
        assert_eq!(
            CandidateSet::from_parts(Some(vec![0.0]), None).unwrap_err(),
            AttackError::MissingArgument("priors")
        );
        assert_eq!(
            CandidateSet::from_parts(None, Some(vec![1.0])).unwrap_err(),
            AttackError::MissingArgument("values")
        );
    }

    #[test]
    fn deserialized_candidates_are_validated() {
        let err = serde_json::from_str::<CandidateSet>(r#"{"values":[0.0,1.0,2.0],"priors":[0.5]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("priors"));

        let err = serde_json::from_str::<CandidateSet>(r#"{"values":[],"priors":[]}"#).unwrap_err();
        assert!(err.to_string().contains("values"));

        let set: CandidateSet =
            serde_json::from_str(r#"{"values":[0.0,1.0],"priors":[0.25,0.75]}"#).unwrap();
        assert_eq!(set, CandidateSet::new(vec![0.0, 1.0], vec![0.25, 0.75]).unwrap());
    }

    #[test]
    fn empty_candidate_set_is_rejected() {
        assert_eq!(
            CandidateSet::new(vec![], vec![]).unwrap_err(),
            AttackError::MissingArgument("values")
        );
    }

    #[test]
    fn most_probable_prefers_first_on_ties() {
        let set = CandidateSet::new(vec![3.0, 4.0, 5.0], vec![0.4, 0.4, 0.2]).unwrap();
        assert_eq!(set.most_probable(), 3.0);
        let uniform = CandidateSet::uniform(vec![7.0, 8.0]).unwrap();
        assert_eq!(uniform.priors(), &[0.5, 0.5]);
        assert_eq!(uniform.most_probable(), 7.0);
    }

    #[test]
    fn labels_must_cover_every_row() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let err = ObservationBatch::new(x, Some(vec![0])).unwrap_err();
        assert_eq!(err, AttackError::shape_mismatch("labels", 2, 1));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = ObservationBatch::from_rows(vec![vec![1.0, 2.0], vec![3.0]], None).unwrap_err();
        assert_eq!(err, AttackError::shape_mismatch("row width", 2, 1));
    }

    #[test]
    fn from_rows_keeps_layout() {
        let batch = ObservationBatch::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]], None).unwrap();
        assert_eq!(batch.n_samples(), 2);
        assert_eq!(batch.n_known_features(), 2);
        assert_eq!(batch.x()[[1, 0]], 3.0);
        assert!(batch.labels().is_none());
    }
}
