//! Runtime error type.

use mu_store::{NodeError, StoreError};
use mu_value::ValueError;

/// Result of a runtime operation.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Node(#[from] NodeError),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A configuration value could not be used.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl RuntimeError {
    #[cold]
    pub fn config(message: impl Into<String>) -> Self {
        RuntimeError::Config {
            message: message.into(),
        }
    }
}
