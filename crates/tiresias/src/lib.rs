//! # Tiresias
//!
//! White-box attribute inference attacks for auditing how much a trained
//! model leaks about a sensitive feature.
//!
//! An adversary who knows every feature of a record except one, plus the
//! label the model assigned to it, can often recover the hidden feature by
//! reading the model's internal structure. Tiresias runs that attack so you
//! can measure the leak before someone else does.
//!
//! ## Quick Start
//!
//! ```rust
//! use tiresias::prelude::*;
//!
//! // A fitted tree over [smoker, age_bucket]
//! let tree = DecisionTree::new(2, 2, vec![
//!     TreeNode::split(0, 100, 0, 0.5, 1, 2),
//!     TreeNode::leaf(1, 70, vec![60.0, 10.0]),
//!     TreeNode::leaf(2, 30, vec![5.0, 25.0]),
//! ]).unwrap();
//!
//! // Attack column 0 ("smoker") given age bucket and observed label
//! let engine = AttributeInferenceEngine::new(&tree, AttackConfig::from_index(0));
//! let batch = ObservationBatch::from_rows(vec![vec![3.0], vec![1.0]], Some(vec![1, 0])).unwrap();
//! let candidates = CandidateSet::new(vec![0.0, 1.0], vec![0.8, 0.2]).unwrap();
//!
//! let inferred = engine.infer(&batch, &candidates).unwrap();
//! assert_eq!(inferred, vec![1.0, 0.0]);
//! ```
//!
//! ## Architecture
//!
//! - [`tiresias_core`] - Shared types and the `ProbeModel` capability trait
//! - [`tiresias_models`] - Reference white-box models (`DecisionTree`)
//! - [`tiresias_attacks`] - The inference engine and attack scoring
//!
//! ## How the attack decides
//!
//! | Stage | Uses | Outcome |
//! |-------|------|---------|
//! | Exact match | observed label | the single candidate that reproduces it |
//! | Fallback | leaf sample share × prior | the heaviest candidate, first on ties |
//!
//! More than one reproducing candidate is treated as ambiguous and left to
//! the fallback stage.

// Re-export all subcrates
pub use tiresias_attacks as attacks;
pub use tiresias_core as core;
pub use tiresias_models as models;

// Matrix types used by `ObservationBatch` and `ProbeModel`
pub use ndarray;

/// Prelude module for convenient imports.
///
/// ```rust
/// use tiresias::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tiresias_core::types::{
        AttackConfig, CandidateSet, ObservationBatch,
        FeatureValue, ClassLabel, NodeId,
    };

    // Core traits
    pub use tiresias_core::probe::ProbeModel;

    // Error types
    pub use tiresias_core::error::{AttackError, AttackResult, ProbeError, ProbeResult};

    // Models
    pub use tiresias_models::{DecisionTree, ModelError, ModelResult, NodeKind, TreeNode};

    // Attacks
    pub use tiresias_attacks::engine::{splice_column, AttributeInferenceEngine};
    pub use tiresias_attacks::evidence::{CandidateEvidence, RowVerdict};
    pub use tiresias_attacks::report::{InferenceReport, InferenceSource};
    pub use tiresias_attacks::scoring::{
        aggregate, score_inference, AggregateScores, AttackScores,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
