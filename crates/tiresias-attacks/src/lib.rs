//! # Tiresias Attacks
//!
//! White-box attribute inference.
//!
//! Given a model, a batch of rows with one feature withheld and the labels
//! the model produced for the full rows, the engine reconstructs the
//! withheld feature row by row. It reads the model's decision structure
//! rather than treating it as a black box:
//!
//! | Stage | Signal | Decides a row when |
//! |-------|--------|--------------------|
//! | Exact match | Predicted class per candidate | exactly one candidate reproduces the label |
//! | Fallback | Leaf sample share × prior | always, for the remaining rows |
//!
//! [`scoring`] turns a report into audit numbers: accuracy, how many rows
//! the exact-match stage settled, and the advantage over guessing from
//! the prior alone.

pub mod engine;
pub mod evidence;
pub mod prelude;
pub mod report;
pub mod scoring;

pub use engine::{splice_column, AttributeInferenceEngine};
pub use evidence::{CandidateEvidence, RowVerdict};
pub use report::{InferenceReport, InferenceSource};
pub use scoring::{score_inference, AggregateScores, AttackScores};
