//! Decision tree described by an exported node table.
//!
//! Node `0` is the root. Every split sends a row left when
//! `row[feature] <= threshold` and right otherwise. Child indexes are
//! always greater than their parent's, which keeps the table acyclic and
//! lets depth be computed in a single forward pass.

use std::path::Path;

use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tiresias_core::error::{ProbeError, ProbeResult};
use tiresias_core::probe::ProbeModel;
use tiresias_core::types::NodeId;

use crate::error::{ModelError, ModelResult};

/// One row of the node table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: usize,
    /// Training samples routed through this node during fitting.
    pub samples: usize,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Training samples of each class that ended in this leaf.
        class_counts: Vec<f64>,
    },
}

impl TreeNode {
    pub fn split(
        id: usize,
        samples: usize,
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    ) -> Self {
        Self {
            id,
            samples,
            kind: NodeKind::Split {
                feature,
                threshold,
                left,
                right,
            },
        }
    }

    pub fn leaf(id: usize, samples: usize, class_counts: Vec<f64>) -> Self {
        Self {
            id,
            samples,
            kind: NodeKind::Leaf { class_counts },
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }
}

#[derive(Deserialize)]
struct RawTree {
    n_features: usize,
    n_classes: usize,
    nodes: Vec<TreeNode>,
}

/// A fitted binary decision tree with full white-box introspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionTree {
    n_features: usize,
    n_classes: usize,
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Build a tree from its node table, validating the structure.
    pub fn new(n_features: usize, n_classes: usize, nodes: Vec<TreeNode>) -> ModelResult<Self> {
        if nodes.is_empty() {
            return Err(ModelError::invalid("tree has no nodes"));
        }
        if n_classes == 0 {
            return Err(ModelError::invalid("tree must have at least one class"));
        }

        let mut has_parent = vec![false; nodes.len()];
        for (index, node) in nodes.iter().enumerate() {
            if node.id != index {
                return Err(ModelError::invalid(format!(
                    "node at position {} has id {}",
                    index, node.id
                )));
            }
            match &node.kind {
                NodeKind::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(ModelError::invalid(format!(
                            "node {} splits on feature {} but the tree has {} features",
                            index, feature, n_features
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ModelError::invalid(format!(
                            "node {} has a NaN threshold",
                            index
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= index || child >= nodes.len() {
                            return Err(ModelError::invalid(format!(
                                "node {} has invalid child {}",
                                index, child
                            )));
                        }
                        if has_parent[child] {
                            return Err(ModelError::invalid(format!(
                                "node {} has more than one parent",
                                child
                            )));
                        }
                        has_parent[child] = true;
                    }
                }
                NodeKind::Leaf { class_counts } => {
                    if class_counts.len() != n_classes {
                        return Err(ModelError::invalid(format!(
                            "leaf {} has {} class counts, expected {}",
                            index,
                            class_counts.len(),
                            n_classes
                        )));
                    }
                }
            }
        }

        Ok(Self {
            n_features,
            n_classes,
            nodes,
        })
    }

    /// Parse a tree from its JSON node table.
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let raw: RawTree = serde_json::from_str(json)?;
        Self::new(raw.n_features, raw.n_classes, raw.nodes)
    }

    /// Load a tree from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tree = Self::from_json_str(&json)?;
        debug!(
            "Loaded decision tree from {} ({} nodes, {} leaves)",
            path.display(),
            tree.node_count(),
            tree.leaf_count()
        );
        Ok(tree)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Training samples seen by the root.
    pub fn total_samples(&self) -> usize {
        self.nodes[0].samples
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut depth = vec![0usize; self.nodes.len()];
        let mut max = 0;
        for (index, node) in self.nodes.iter().enumerate() {
            if let NodeKind::Split { left, right, .. } = node.kind {
                depth[left] = depth[index] + 1;
                depth[right] = depth[index] + 1;
                max = max.max(depth[index] + 1);
            }
        }
        max
    }

    fn check_width(&self, got: usize) -> ProbeResult<()> {
        if got != self.n_features {
            return Err(ProbeError::FeatureCount {
                expected: self.n_features,
                got,
            });
        }
        Ok(())
    }

    fn route(&self, row: ArrayView1<'_, f64>) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = 0;
        loop {
            path.push(NodeId(current));
            match &self.nodes[current].kind {
                NodeKind::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    current = if row[*feature] <= *threshold { *left } else { *right };
                }
                NodeKind::Leaf { .. } => return path,
            }
        }
    }

    fn leaf_distribution(&self, leaf: NodeId) -> Vec<f64> {
        match &self.nodes[leaf.0].kind {
            NodeKind::Leaf { class_counts } => {
                let total: f64 = class_counts.iter().sum();
                if total > 0.0 {
                    class_counts.iter().map(|c| c / total).collect()
                } else {
                    vec![1.0 / self.n_classes as f64; self.n_classes]
                }
            }
            NodeKind::Split { .. } => vec![0.0; self.n_classes],
        }
    }
}

impl ProbeModel for DecisionTree {
    fn predict_proba(&self, rows: ArrayView2<'_, f64>) -> ProbeResult<Array2<f64>> {
        self.check_width(rows.ncols())?;
        let mut out = Array2::zeros((rows.nrows(), self.n_classes));
        for (i, row) in rows.rows().into_iter().enumerate() {
            let path = self.route(row);
            let leaf = *path.last().ok_or(ProbeError::EmptyDecisionPath)?;
            for (class, p) in self.leaf_distribution(leaf).into_iter().enumerate() {
                out[[i, class]] = p;
            }
        }
        Ok(out)
    }

    fn decision_path(&self, row: ArrayView1<'_, f64>) -> ProbeResult<Vec<NodeId>> {
        self.check_width(row.len())?;
        Ok(self.route(row))
    }

    fn samples_at_node(&self, node: NodeId) -> ProbeResult<usize> {
        self.nodes
            .get(node.0)
            .map(|n| n.samples)
            .ok_or(ProbeError::UnknownNode(node))
    }

    fn name(&self) -> &str {
        "decision-tree"
    }
}
