//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent rejected operations on a structure.
///
/// Every one of them is recoverable: the caller shows the message and keeps
/// the structure it had before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid index {index} (length {len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("capacity exceeded: structure already holds {capacity} elements")]
    CapacityExceeded { capacity: usize },

    #[error("edge already exists between {from} and {to}")]
    DuplicateEdge { from: String, to: String },

    #[error("node already exists: {0}")]
    DuplicateNode(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
