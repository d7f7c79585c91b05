//! End-to-end attacks against a real decision tree.

use std::sync::Arc;

use ndarray::array;
use tiresias_attacks::prelude::*;
use tiresias_core::prelude::*;
use tiresias_models::{DecisionTree, TreeNode};

/// Tree over `[sensitive, income]`:
///
/// ```text
///                 0 (100) sensitive <= 0.5
///               /                          \
///   1 (70) leaf [60, 10]           2 (30) income <= 1.0
///                                   /                 \
///                           3 (20) [2, 18]      4 (10) [8, 2]
/// ```
fn audited_tree() -> DecisionTree {
    DecisionTree::new(
        2,
        2,
        vec![
            TreeNode::split(0, 100, 0, 0.5, 1, 2),
            TreeNode::leaf(1, 70, vec![60.0, 10.0]),
            TreeNode::split(2, 30, 1, 1.0, 3, 4),
            TreeNode::leaf(3, 20, vec![2.0, 18.0]),
            TreeNode::leaf(4, 10, vec![8.0, 2.0]),
        ],
    )
    .unwrap()
}

fn boolean_prior() -> CandidateSet {
    CandidateSet::new(vec![0.0, 1.0], vec![0.6, 0.4]).unwrap()
}

#[test]
fn recovers_sensitive_feature_from_tree() {
    let tree = audited_tree();
    let engine = AttributeInferenceEngine::new(&tree, AttackConfig::from_index(0));
    let batch = ObservationBatch::from_rows(
        vec![vec![0.5], vec![2.0], vec![3.0]],
        Some(vec![1, 0, 1]),
    )
    .unwrap();

    let report = engine.infer_detailed(&batch, &boolean_prior()).unwrap();

    // Row 0: only sensitive = 1 reaches the class-1 leaf.
    // Row 1: both values predict class 0, the larger leaf wins.
    // Row 2: neither value predicts class 1, the larger leaf wins.
    assert_eq!(report.values(), &[1.0, 0.0, 0.0]);
    assert_eq!(
        report.sources(),
        &[
            InferenceSource::ExactMatch,
            InferenceSource::Fallback,
            InferenceSource::Fallback
        ]
    );

    let zero = &report.evidence()[0];
    assert!((zero.weighted_probability[1] - 70.0 / 3.0 * 0.6).abs() < 1e-10);
    let one = &report.evidence()[1];
    assert!((one.weighted_probability[1] - 10.0 / 3.0 * 0.4).abs() < 1e-10);
}

#[test]
fn scoring_an_attack_on_a_tree() {
    let tree = audited_tree();
    let engine = AttributeInferenceEngine::new(&tree, AttackConfig::from_index(0));
    let candidates = boolean_prior();
    let batch = ObservationBatch::from_rows(
        vec![vec![0.5], vec![2.0], vec![3.0]],
        Some(vec![1, 0, 1]),
    )
    .unwrap();
    let truth = [1.0, 0.0, 1.0];

    let report = engine.infer_detailed(&batch, &candidates).unwrap();
    let scores = score_inference(&report, &candidates, &truth).unwrap();

    assert_eq!(scores.rows, 3);
    assert!((scores.accuracy - 2.0 / 3.0).abs() < 1e-10);
    assert!((scores.exact_match_rate - 1.0 / 3.0).abs() < 1e-10);
    assert!((scores.exact_match_accuracy - 1.0).abs() < 1e-10);
    assert!((scores.fallback_accuracy - 0.5).abs() < 1e-10);
    assert!((scores.prior_baseline_accuracy - 1.0 / 3.0).abs() < 1e-10);
    assert!((scores.advantage - 1.0 / 3.0).abs() < 1e-10);
}

#[test]
fn wrong_row_width_surfaces_as_model_error() {
    let tree = audited_tree();
    let engine = AttributeInferenceEngine::new(&tree, AttackConfig::from_index(0));
    let batch = ObservationBatch::new(array![[0.5, 1.0]], None).unwrap();

    let err = engine.infer(&batch, &boolean_prior()).unwrap_err();

    assert_eq!(
        err,
        AttackError::Model(ProbeError::FeatureCount {
            expected: 2,
            got: 3
        })
    );
}

#[test]
fn shared_engine_serves_concurrent_callers() {
    let engine = Arc::new(AttributeInferenceEngine::new(
        Arc::new(audited_tree()),
        AttackConfig::from_index(0),
    ));
    let candidates = boolean_prior();
    let expected = engine
        .infer(
            &ObservationBatch::from_rows(vec![vec![0.5], vec![2.0]], Some(vec![1, 0])).unwrap(),
            &candidates,
        )
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                let candidates = candidates.clone();
                scope.spawn(move || {
                    let batch = ObservationBatch::from_rows(
                        vec![vec![0.5], vec![2.0]],
                        Some(vec![1, 0]),
                    )
                    .unwrap();
                    engine.infer(&batch, &candidates).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
    assert_eq!(expected, vec![1.0, 0.0]);
}
