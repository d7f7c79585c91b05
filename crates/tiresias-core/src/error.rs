//! Error types for attack configuration and model probing.
//!
//! Every precondition failure is reported before a model is queried, so an
//! error never leaves a partially computed inference behind.

use thiserror::Error;

use crate::types::NodeId;

/// Result type for attack operations.
pub type AttackResult<T> = Result<T, AttackError>;

/// Result type for white-box model queries.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors raised while configuring or running an attack.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttackError {
    /// Invalid attack configuration (e.g. a negative feature index).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required argument was not supplied.
    #[error("Missing parameter `{0}`")]
    MissingArgument(&'static str),

    /// Two inputs that must agree in length or width do not.
    #[error("Shape mismatch for {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// The probed model failed to answer a query.
    #[error("Model error: {0}")]
    Model(#[from] ProbeError),
}

/// Errors a [`ProbeModel`](crate::probe::ProbeModel) may report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbeError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Decision path is empty")]
    EmptyDecisionPath,

    #[error("Feature count mismatch: expected {expected}, got {got}")]
    FeatureCount { expected: usize, got: usize },

    #[error("Unexpected output shape: expected {expected} rows, got {got}")]
    OutputShape { expected: usize, got: usize },

    /// Failures specific to a `ProbeModel` implementation outside this
    /// workspace, such as a model served from another process.
    #[error("{0}")]
    Other(String),
}

// Convenience constructors
impl AttackError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        AttackError::Configuration(msg.into())
    }

    pub fn shape_mismatch(what: &'static str, expected: usize, got: usize) -> Self {
        AttackError::ShapeMismatch {
            what,
            expected,
            got,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_names_the_parameter() {
        let err = AttackError::MissingArgument("priors");
        assert_eq!(err.to_string(), "Missing parameter `priors`");
    }

    #[test]
    fn probe_errors_convert_into_attack_errors() {
        let err: AttackError = ProbeError::UnknownNode(NodeId(7)).into();
        assert_eq!(err, AttackError::Model(ProbeError::UnknownNode(NodeId(7))));
        assert!(err.to_string().contains("node-7"));
    }

    #[test]
    fn other_probe_errors_keep_their_message() {
        let err: AttackError = ProbeError::Other("model backend offline".into()).into();
        assert_eq!(err.to_string(), "Model error: model backend offline");
    }
}
