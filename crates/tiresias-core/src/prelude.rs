//! Tiresias Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use tiresias_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    AttackConfig, CandidateSet, ObservationBatch,
    FeatureValue, ClassLabel, NodeId,
};

// Re-export the ProbeModel trait
pub use crate::probe::{argmax, ProbeModel};

// Re-export error types
pub use crate::error::{AttackError, AttackResult, ProbeError, ProbeResult};
