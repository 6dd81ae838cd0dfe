//! Errors raised when a catalog or quotation command is rejected.
//!
//! Resolving a price never fails. Only state changes can: a blank required
//! field, a broken quantity ordering, an unknown id, a stale version or a
//! status transition the lifecycle does not allow.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Blank required field, zero quantity, discount over 100, bad config value.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The data is well-formed but breaks a rule between fields or against
    /// current state (min quantities out of order, not enough stock, editing a
    /// sent quotation).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("not found")]
    NotFound,

    /// Stale expected version, duplicate id, or a lifecycle step out of order.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Optimistic concurrency failure.
    pub fn stale_version(expected: impl core::fmt::Debug, found: u64) -> Self {
        Self::Conflict(format!("expected version {expected:?}, found {found}"))
    }

    /// Short machine-readable tag, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvariantViolation(_) => "invariant",
            Self::InvalidId(_) => "invalid_id",
            Self::NotFound => "not_found",
            Self::Conflict(_) => "conflict",
        }
    }
}
