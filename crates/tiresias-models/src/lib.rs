//! # Tiresias Models
//!
//! White-box models that implement [`ProbeModel`](tiresias_core::probe::ProbeModel).
//!
//! Models here are never trained; they are loaded from the node table a
//! tree learner exports after fitting, which carries everything an
//! attribute inference attack needs: split rules, per-node training sample
//! counts and leaf class counts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tiresias_models::DecisionTree;
//!
//! let tree = DecisionTree::load("model.json")?;
//! println!("{} leaves, depth {}", tree.leaf_count(), tree.depth());
//! ```

mod error;
mod tree;

pub use error::{ModelError, ModelResult};
pub use tree::{DecisionTree, NodeKind, TreeNode};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{DecisionTree, ModelError, ModelResult, NodeKind, TreeNode};
}
