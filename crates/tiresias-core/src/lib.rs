//! # Tiresias Core
//!
//! Core traits and types for white-box attribute inference attacks.
//!
//! An attribute inference attack reconstructs a withheld feature of a
//! sample from the remaining features, the model's observed prediction and
//! the model's internal decision structure. This crate defines the pieces
//! shared by every attack and model implementation:
//!
//! - **AttackConfig**: which column of the full feature layout is hidden
//! - **CandidateSet**: the values the hidden feature may take, with priors
//! - **ObservationBatch**: the rows under attack and their observed labels
//! - **ProbeModel**: the narrow white-box capability a model must expose
//!
//! ## Quick Start
//!
//! ```rust
//! use tiresias_core::prelude::*;
//!
//! // Attack the third column of the training layout
//! let config = AttackConfig::new(2).unwrap();
//! assert_eq!(config.attack_feature(), 2);
//!
//! // A boolean feature with a skewed prior
//! let candidates = CandidateSet::new(vec![0.0, 1.0], vec![0.7, 0.3]).unwrap();
//! assert_eq!(candidates.len(), 2);
//!
//! // Negative indexes are rejected up front
//! assert!(AttackConfig::new(-1).is_err());
//! ```

pub mod error;
pub mod probe;
pub mod types;
pub mod prelude;
