//! White-box attribute inference against tree-structured models.
//!
//! A variation of the model inversion attack of Fredrikson et al.
//! (CCS 2015). The attacker knows every feature of a sample except one,
//! the label the model produced for the full sample, and the model's
//! internals. Each candidate value of the hidden feature is spliced back
//! into the row and two signals are read off the model:
//!
//! 1. **Exact match.** If exactly one candidate makes the model reproduce
//!    the observed label, that candidate is the answer.
//! 2. **Fallback.** Otherwise every candidate is weighted by the share of
//!    training samples that reached the same leaf, times its prior, and
//!    the heaviest candidate wins.
//!
//! The attacked feature is assumed discrete with few possible values,
//! e.g. a boolean.

use ndarray::{concatenate, s, Array2, ArrayView2, Axis};
use tracing::{debug, trace};

use tiresias_core::error::{AttackError, AttackResult, ProbeError, ProbeResult};
use tiresias_core::probe::ProbeModel;
use tiresias_core::types::{AttackConfig, CandidateSet, ClassLabel, FeatureValue, ObservationBatch};

use crate::evidence::{exact_match, fallback, CandidateEvidence, RowVerdict};
use crate::report::{InferenceReport, InferenceSource};

/// Splice `value` into column `index` of every row of `x`.
///
/// Columns before `index` keep their position; columns from `index` on
/// move one to the right.
pub fn splice_column(
    x: ArrayView2<'_, f64>,
    index: usize,
    value: FeatureValue,
) -> AttackResult<Array2<f64>> {
    if index > x.ncols() {
        return Err(AttackError::shape_mismatch(
            "attack feature column",
            x.ncols(),
            index,
        ));
    }
    let column = Array2::from_elem((x.nrows(), 1), value);
    concatenate(
        Axis(1),
        &[x.slice(s![.., ..index]), column.view(), x.slice(s![.., index..])],
    )
    .map_err(|e| AttackError::configuration(e.to_string()))
}

/// Attribute inference engine bound to one model and one attacked column.
///
/// Holds no mutable state: one engine may serve concurrent calls as long
/// as the model tolerates concurrent reads, which [`ProbeModel`] requires.
#[derive(Debug, Clone)]
pub struct AttributeInferenceEngine<M> {
    model: M,
    config: AttackConfig,
}

impl<M: ProbeModel> AttributeInferenceEngine<M> {
    pub fn new(model: M, config: AttackConfig) -> Self {
        Self { model, config }
    }

    /// Build an engine from a signed column index. Negative indexes are a
    /// configuration error.
    pub fn with_attack_feature(model: M, attack_feature: i64) -> AttackResult<Self> {
        Ok(Self::new(model, AttackConfig::new(attack_feature)?))
    }

    pub fn attack_feature(&self) -> usize {
        self.config.attack_feature()
    }

    pub fn config(&self) -> &AttackConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Infer the attacked feature for every row of `batch`.
    pub fn infer(
        &self,
        batch: &ObservationBatch,
        candidates: &CandidateSet,
    ) -> AttackResult<Vec<FeatureValue>> {
        Ok(self.infer_detailed(batch, candidates)?.into_values())
    }

    /// Infer from loosely supplied arguments. Missing or mismatched
    /// candidate arguments fail before the model is queried.
    pub fn infer_from_parts(
        &self,
        x: Array2<f64>,
        y: Option<Vec<ClassLabel>>,
        values: Option<Vec<FeatureValue>>,
        priors: Option<Vec<f64>>,
    ) -> AttackResult<Vec<FeatureValue>> {
        let candidates = CandidateSet::from_parts(values, priors)?;
        let batch = ObservationBatch::new(x, y)?;
        self.infer(&batch, &candidates)
    }

    /// Infer the attacked feature and keep the evidence behind each answer.
    pub fn infer_detailed(
        &self,
        batch: &ObservationBatch,
        candidates: &CandidateSet,
    ) -> AttackResult<InferenceReport> {
        let n_samples = batch.n_samples();
        if n_samples == 0 {
            debug!("Empty batch, nothing to infer");
            return Ok(InferenceReport::empty());
        }

        let attack_feature = self.config.attack_feature();
        if attack_feature > batch.n_known_features() {
            return Err(AttackError::shape_mismatch(
                "attack feature column",
                batch.n_known_features(),
                attack_feature,
            ));
        }

        debug!(
            "Inferring feature {} for {} rows over {} candidates with {}",
            attack_feature,
            n_samples,
            candidates.len(),
            self.model.name()
        );

        let evidence = candidates
            .iter()
            .map(|(value, prior)| self.gather_evidence(batch, value, prior))
            .collect::<AttackResult<Vec<_>>>()?;

        let labels = batch.labels();
        let mut values = Vec::with_capacity(n_samples);
        let mut sources = Vec::with_capacity(n_samples);
        for row in 0..n_samples {
            let observed = labels.map(|y| y[row]);
            match exact_match(&evidence, observed, row) {
                RowVerdict::Conclusive(value) => {
                    values.push(value);
                    sources.push(InferenceSource::ExactMatch);
                }
                RowVerdict::Inconclusive => {
                    // A CandidateSet is never empty, so there is always evidence.
                    let value = fallback(&evidence, row).ok_or_else(|| {
                        AttackError::configuration("no candidate evidence to fall back on")
                    })?;
                    values.push(value);
                    sources.push(InferenceSource::Fallback);
                }
            }
        }

        let report = InferenceReport {
            values,
            sources,
            evidence,
        };
        debug!(
            "Inference finished: {} of {} rows resolved by exact match",
            report.exact_match_count(),
            n_samples
        );
        Ok(report)
    }

    fn gather_evidence(
        &self,
        batch: &ObservationBatch,
        value: FeatureValue,
        prior: f64,
    ) -> AttackResult<CandidateEvidence> {
        let full = splice_column(batch.x().view(), self.config.attack_feature(), value)?;
        let predicted_class = self.model.predict_classes(full.view())?;
        if predicted_class.len() != full.nrows() {
            return Err(ProbeError::OutputShape {
                expected: full.nrows(),
                got: predicted_class.len(),
            }
            .into());
        }

        let n_samples = full.nrows() as f64;
        let weighted_probability = full
            .rows()
            .into_iter()
            .map(|row| {
                let samples = self.model.leaf_samples(row)?;
                Ok::<_, ProbeError>(samples as f64 / n_samples * prior)
            })
            .collect::<ProbeResult<Vec<f64>>>()?;

        trace!(
            "Candidate {} (prior {}): classes {:?}, weights {:?}",
            value,
            prior,
            predicted_class,
            weighted_probability
        );

        Ok(CandidateEvidence {
            value,
            prior,
            predicted_class,
            weighted_probability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn splice_preserves_column_order() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let full = splice_column(x.view(), 1, 9.0).unwrap();
        assert_eq!(full, array![[1.0, 9.0, 2.0], [3.0, 9.0, 4.0]]);
    }

    #[test]
    fn splice_at_edges() {
        let x = array![[1.0, 2.0]];
        assert_eq!(splice_column(x.view(), 0, 0.0).unwrap(), array![[0.0, 1.0, 2.0]]);
        assert_eq!(splice_column(x.view(), 2, 0.0).unwrap(), array![[1.0, 2.0, 0.0]]);
    }

    #[test]
    fn splice_past_the_end_is_rejected() {
        let x = array![[1.0, 2.0]];
        let err = splice_column(x.view(), 3, 0.0).unwrap_err();
        assert!(matches!(err, AttackError::ShapeMismatch { .. }));
    }

    #[test]
    fn splice_into_empty_batch() {
        let x = Array2::<f64>::zeros((0, 2));
        let full = splice_column(x.view(), 1, 5.0).unwrap();
        assert_eq!(full.dim(), (0, 3));
    }
}
