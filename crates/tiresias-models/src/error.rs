//! Model loading errors.

use thiserror::Error;

/// Errors raised while building or loading a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

impl ModelError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ModelError::InvalidTree(msg.into())
    }
}
