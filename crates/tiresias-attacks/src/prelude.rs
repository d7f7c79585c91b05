//! Tiresias Attacks Prelude.

pub use crate::engine::{splice_column, AttributeInferenceEngine};
pub use crate::evidence::{CandidateEvidence, RowVerdict};
pub use crate::report::{InferenceReport, InferenceSource};
pub use crate::scoring::{aggregate, score_inference, AggregateScores, AttackScores};
