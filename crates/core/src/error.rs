//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic conversion and business failures.
/// Infrastructure concerns (storage, collaborators) wrap it elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was empty or not a well-formed object id.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A timestamp could not be represented on the other side of a conversion.
    #[error("time conversion failed: {0}")]
    TimeConversion(String),

    /// A required foreign identity (owner, parent) was absent.
    #[error("missing required relation: {0}")]
    MissingRelation(String),

    /// A lifecycle rule rejected the requested status change.
    #[error("illegal transition: {0}")]
    IllegalTransition(String),

    /// No public status translation exists for a private status code.
    #[error("no public status for private status {0}")]
    UnmappedStatus(i32),

    /// A value failed validation (entity invariant, malformed document).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A conflict occurred (stale revision / optimistic concurrency).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn time_conversion(msg: impl Into<String>) -> Self {
        Self::TimeConversion(msg.into())
    }

    pub fn missing_relation(msg: impl Into<String>) -> Self {
        Self::MissingRelation(msg.into())
    }

    pub fn illegal_transition(msg: impl Into<String>) -> Self {
        Self::IllegalTransition(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
