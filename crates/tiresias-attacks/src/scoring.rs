//! Attack success metrics.
//!
//! Measures how much an inference attack recovers beyond what the prior
//! alone gives away. `advantage` is the headline number for a privacy
//! audit: accuracy of the attack minus accuracy of always guessing the
//! most probable value.

use serde::Serialize;

use tiresias_core::error::{AttackError, AttackResult};
use tiresias_core::types::{CandidateSet, FeatureValue};

use crate::report::{InferenceReport, InferenceSource};

/// Scores for a single attack run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackScores {
    pub rows: usize,
    pub accuracy: f64,
    pub exact_match_rate: f64,
    pub exact_match_accuracy: f64,
    pub fallback_accuracy: f64,
    pub prior_baseline_accuracy: f64,
    pub advantage: f64,
}

/// Mean scores across several attack runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateScores {
    pub mean_accuracy: f64,
    pub mean_exact_match_rate: f64,
    pub mean_prior_baseline_accuracy: f64,
    pub mean_advantage: f64,
    pub run_count: usize,
}

/// Fraction of positions where `inferred` equals `truth`.
pub fn accuracy(inferred: &[FeatureValue], truth: &[FeatureValue]) -> f64 {
    let n = inferred.len().min(truth.len());
    if n == 0 {
        return 0.0;
    }
    let hits = inferred
        .iter()
        .zip(truth)
        .filter(|(a, b)| a == b)
        .count();
    hits as f64 / n as f64
}

/// Accuracy of always guessing the highest-prior candidate.
pub fn prior_baseline_accuracy(candidates: &CandidateSet, truth: &[FeatureValue]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let guess = candidates.most_probable();
    truth.iter().filter(|t| **t == guess).count() as f64 / truth.len() as f64
}

fn accuracy_for(report: &InferenceReport, truth: &[FeatureValue], source: InferenceSource) -> f64 {
    let mut total = 0usize;
    let mut hits = 0usize;
    for ((value, s), t) in report.rows().zip(truth) {
        if s == source {
            total += 1;
            if value == *t {
                hits += 1;
            }
        }
    }
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

/// Score an inference report against the true values of the attacked feature.
pub fn score_inference(
    report: &InferenceReport,
    candidates: &CandidateSet,
    truth: &[FeatureValue],
) -> AttackResult<AttackScores> {
    if report.len() != truth.len() {
        return Err(AttackError::shape_mismatch("truth", report.len(), truth.len()));
    }

    let rows = report.len();
    if rows == 0 {
        return Ok(AttackScores {
            rows: 0,
            accuracy: 0.0,
            exact_match_rate: 0.0,
            exact_match_accuracy: 0.0,
            fallback_accuracy: 0.0,
            prior_baseline_accuracy: 0.0,
            advantage: 0.0,
        });
    }

    let accuracy = accuracy(report.values(), truth);
    let baseline = prior_baseline_accuracy(candidates, truth);
    Ok(AttackScores {
        rows,
        accuracy,
        exact_match_rate: report.exact_match_count() as f64 / rows as f64,
        exact_match_accuracy: accuracy_for(report, truth, InferenceSource::ExactMatch),
        fallback_accuracy: accuracy_for(report, truth, InferenceSource::Fallback),
        prior_baseline_accuracy: baseline,
        advantage: accuracy - baseline,
    })
}

/// Aggregate scores across multiple runs.
pub fn aggregate(scores: &[AttackScores]) -> AggregateScores {
    let n = scores.len();
    if n == 0 {
        return AggregateScores {
            mean_accuracy: 0.0,
            mean_exact_match_rate: 0.0,
            mean_prior_baseline_accuracy: 0.0,
            mean_advantage: 0.0,
            run_count: 0,
        };
    }

    let nf = n as f64;
    AggregateScores {
        mean_accuracy: scores.iter().map(|s| s.accuracy).sum::<f64>() / nf,
        mean_exact_match_rate: scores.iter().map(|s| s.exact_match_rate).sum::<f64>() / nf,
        mean_prior_baseline_accuracy: scores
            .iter()
            .map(|s| s.prior_baseline_accuracy)
            .sum::<f64>()
            / nf,
        mean_advantage: scores.iter().map(|s| s.advantage).sum::<f64>() / nf,
        run_count: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(values: Vec<f64>, sources: Vec<InferenceSource>) -> InferenceReport {
        InferenceReport {
            values,
            sources,
            evidence: Vec::new(),
        }
    }

    #[test]
    fn accuracy_counts_hits() {
        assert!((accuracy(&[0.0, 1.0, 1.0, 0.0], &[0.0, 1.0, 0.0, 0.0]) - 0.75).abs() < 1e-10);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn baseline_guesses_highest_prior() {
        let candidates = CandidateSet::new(vec![0.0, 1.0], vec![0.2, 0.8]).unwrap();
        let truth = [1.0, 1.0, 0.0, 1.0];
        assert!((prior_baseline_accuracy(&candidates, &truth) - 0.75).abs() < 1e-10);
    }

    #[test]
    fn scores_split_by_source() {
        use InferenceSource::*;
        let candidates = CandidateSet::uniform(vec![0.0, 1.0]).unwrap();
        let r = report(
            vec![0.0, 1.0, 1.0, 0.0],
            vec![ExactMatch, ExactMatch, Fallback, Fallback],
        );
        let truth = [0.0, 1.0, 0.0, 0.0];
        let scores = score_inference(&r, &candidates, &truth).unwrap();

        assert_eq!(scores.rows, 4);
        assert!((scores.accuracy - 0.75).abs() < 1e-10);
        assert!((scores.exact_match_rate - 0.5).abs() < 1e-10);
        assert!((scores.exact_match_accuracy - 1.0).abs() < 1e-10);
        assert!((scores.fallback_accuracy - 0.5).abs() < 1e-10);
        // Uniform prior guesses 0.0, right on three of four rows
        assert!((scores.prior_baseline_accuracy - 0.75).abs() < 1e-10);
        assert!(scores.advantage.abs() < 1e-10);
    }

    #[test]
    fn truth_length_must_match() {
        let candidates = CandidateSet::uniform(vec![0.0, 1.0]).unwrap();
        let r = report(vec![0.0], vec![InferenceSource::Fallback]);
        let err = score_inference(&r, &candidates, &[0.0, 1.0]).unwrap_err();
        assert_eq!(err, AttackError::shape_mismatch("truth", 1, 2));
    }

    #[test]
    fn empty_report_scores_zero() {
        let candidates = CandidateSet::uniform(vec![0.0]).unwrap();
        let scores = score_inference(&report(vec![], vec![]), &candidates, &[]).unwrap();
        assert_eq!(scores.rows, 0);
        assert_eq!(scores.accuracy, 0.0);
    }

    #[test]
    fn aggregate_means() {
        let a = AttackScores {
            rows: 10,
            accuracy: 0.8,
            exact_match_rate: 0.5,
            exact_match_accuracy: 1.0,
            fallback_accuracy: 0.6,
            prior_baseline_accuracy: 0.6,
            advantage: 0.2,
        };
        let b = AttackScores {
            accuracy: 0.6,
            advantage: 0.0,
            ..a.clone()
        };
        let agg = aggregate(&[a, b]);
        assert_eq!(agg.run_count, 2);
        assert!((agg.mean_accuracy - 0.7).abs() < 1e-10);
        assert!((agg.mean_advantage - 0.1).abs() < 1e-10);
        assert_eq!(aggregate(&[]).run_count, 0);
    }
}
