//! ProbeModel: the white-box capability an attacked model must expose.
//!
//! Attacks only ever read from a model. Besides the usual class
//! probabilities, a white-box model reveals how it partitions its training
//! data: the path a row takes through the model and how many training
//! samples were routed through each node on that path. Decision trees,
//! rule lists and tree-ensemble surrogates can all implement this.

use std::sync::Arc;

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::{ProbeError, ProbeResult};
use crate::types::{ClassLabel, NodeId};

/// Read-only white-box access to a trained classifier.
pub trait ProbeModel: Send + Sync {
    /// Class probabilities, one output row per input row.
    fn predict_proba(&self, rows: ArrayView2<'_, f64>) -> ProbeResult<Array2<f64>>;

    /// Nodes visited by `row`, from the root to the leaf. The last element
    /// is the leaf.
    fn decision_path(&self, row: ArrayView1<'_, f64>) -> ProbeResult<Vec<NodeId>>;

    /// Number of training samples routed through `node` during fitting.
    fn samples_at_node(&self, node: NodeId) -> ProbeResult<usize>;

    /// Predicted class per row: the argmax of [`predict_proba`](Self::predict_proba).
    fn predict_classes(&self, rows: ArrayView2<'_, f64>) -> ProbeResult<Vec<ClassLabel>> {
        let proba = self.predict_proba(rows)?;
        if proba.nrows() != rows.nrows() {
            return Err(ProbeError::OutputShape {
                expected: rows.nrows(),
                got: proba.nrows(),
            });
        }
        Ok(proba.rows().into_iter().map(argmax).collect())
    }

    /// Training samples at the leaf reached by `row`.
    fn leaf_samples(&self, row: ArrayView1<'_, f64>) -> ProbeResult<usize> {
        let path = self.decision_path(row)?;
        let leaf = path.last().ok_or(ProbeError::EmptyDecisionPath)?;
        self.samples_at_node(*leaf)
    }

    /// Human readable model name, used in logs and reports.
    fn name(&self) -> &str {
        "probe-model"
    }
}

/// Index of the largest entry. The first maximum wins and NaN never does;
/// an empty row yields class 0.
pub fn argmax(row: ArrayView1<'_, f64>) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in row.iter().enumerate() {
        match best {
            Some((_, b)) if !(p > b) => {}
            _ if p.is_nan() => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i).unwrap_or(0)
}

impl<M: ProbeModel + ?Sized> ProbeModel for &M {
    fn predict_proba(&self, rows: ArrayView2<'_, f64>) -> ProbeResult<Array2<f64>> {
        (**self).predict_proba(rows)
    }

    fn decision_path(&self, row: ArrayView1<'_, f64>) -> ProbeResult<Vec<NodeId>> {
        (**self).decision_path(row)
    }

    fn samples_at_node(&self, node: NodeId) -> ProbeResult<usize> {
        (**self).samples_at_node(node)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<M: ProbeModel + ?Sized> ProbeModel for Box<M> {
    fn predict_proba(&self, rows: ArrayView2<'_, f64>) -> ProbeResult<Array2<f64>> {
        (**self).predict_proba(rows)
    }

    fn decision_path(&self, row: ArrayView1<'_, f64>) -> ProbeResult<Vec<NodeId>> {
        (**self).decision_path(row)
    }

    fn samples_at_node(&self, node: NodeId) -> ProbeResult<usize> {
        (**self).samples_at_node(node)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<M: ProbeModel + ?Sized> ProbeModel for Arc<M> {
    fn predict_proba(&self, rows: ArrayView2<'_, f64>) -> ProbeResult<Array2<f64>> {
        (**self).predict_proba(rows)
    }

    fn decision_path(&self, row: ArrayView1<'_, f64>) -> ProbeResult<Vec<NodeId>> {
        (**self).decision_path(row)
    }

    fn samples_at_node(&self, node: NodeId) -> ProbeResult<usize> {
        (**self).samples_at_node(node)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Predicts class 1 when the first feature is positive.
    struct SignModel;

    impl ProbeModel for SignModel {
        fn predict_proba(&self, rows: ArrayView2<'_, f64>) -> ProbeResult<Array2<f64>> {
            let mut out = Array2::zeros((rows.nrows(), 2));
            for (i, row) in rows.rows().into_iter().enumerate() {
                let class = if row[0] > 0.0 { 1 } else { 0 };
                out[[i, class]] = 1.0;
            }
            Ok(out)
        }

        fn decision_path(&self, row: ArrayView1<'_, f64>) -> ProbeResult<Vec<NodeId>> {
            if row[0] > 0.0 {
                Ok(vec![NodeId(0), NodeId(2)])
            } else {
                Ok(vec![NodeId(0), NodeId(1)])
            }
        }

        fn samples_at_node(&self, node: NodeId) -> ProbeResult<usize> {
            match node.0 {
                0 => Ok(10),
                1 => Ok(7),
                2 => Ok(3),
                _ => Err(ProbeError::UnknownNode(node)),
            }
        }
    }

    #[test]
    fn argmax_takes_first_maximum() {
        assert_eq!(argmax(array![0.2, 0.4, 0.4].view()), 1);
        assert_eq!(argmax(array![0.5, 0.5].view()), 0);
    }

    #[test]
    fn argmax_skips_nan() {
        assert_eq!(argmax(array![f64::NAN, 0.1, 0.3].view()), 2);
        assert_eq!(argmax(array![0.1, f64::NAN].view()), 0);
    }

    #[test]
    fn predict_classes_uses_argmax() {
        let rows = array![[1.0], [-1.0], [0.5]];
        assert_eq!(SignModel.predict_classes(rows.view()).unwrap(), vec![1, 0, 1]);
    }

    #[test]
    fn leaf_samples_reads_last_node() {
        assert_eq!(SignModel.leaf_samples(array![2.0].view()).unwrap(), 3);
        assert_eq!(SignModel.leaf_samples(array![-2.0].view()).unwrap(), 7);
    }

    #[test]
    fn wrappers_delegate() {
        let boxed: Box<dyn ProbeModel> = Box::new(SignModel);
        assert_eq!(boxed.leaf_samples(array![2.0].view()).unwrap(), 3);
        let shared = Arc::new(SignModel);
        assert_eq!((&shared).samples_at_node(NodeId(0)).unwrap(), 10);
        assert_eq!(shared.name(), "probe-model");
    }
}
