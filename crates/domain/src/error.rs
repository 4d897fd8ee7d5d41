//! Unified error types for the domain layer
//!
//! Every fallible constructor and ledger operation returns `DomainError`, so
//! hosts can surface a single error type without resorting to `String` or `anyhow`.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., negative activation delay, empty target set)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Creates a validation error for rejected construction arguments.
    ///
    /// Use this when an aura, reward, or settings value cannot be built:
    /// - Durations below the permanent sentinel (-1)
    /// - Negative activation delays
    /// - Empty target sets
    ///
    /// # Example
    /// ```ignore
    /// if ids.is_empty() {
    ///     return Err(DomainError::validation("Aura target set cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for AuraKind {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "LUCK" => Ok(Self::Luck),
    ///             _ => Err(DomainError::parse(format!("Unknown aura kind: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }
}
