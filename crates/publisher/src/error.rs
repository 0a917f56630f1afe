//! Error types for the publishing engine.
//!
//! Every variant here is fatal: it halts the run before any remote
//! mutation. Conditions the run survives (non-boolean `secure` flags,
//! names the store does not recognize) are logged as warnings at the
//! stage that observes them, never surfaced as errors. Failures during
//! the update phase are gathered per parameter in
//! [`crate::types::PublishOutcome`] instead of propagating here.

use thiserror::Error;

/// Result type alias for publisher operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Publisher error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The declaration list is empty or missing.
    #[error("No params defined")]
    NoParamsDefined,

    /// A declaration is missing its path or has neither value nor source.
    #[error("Path and Value are required fields for params (param '{path}')")]
    MissingRequiredFields { path: String },

    /// A declaration carries both a literal value and a source reference.
    #[error("Param '{path}' must set exactly one of value or source")]
    AmbiguousValueSource { path: String },

    /// A path violates the store's naming constraints.
    #[error("Param {path} name doesn't match AWS constraints")]
    InvalidName { path: String },

    /// A description exceeds the store's length limit.
    #[error("Param {path} description is too long")]
    DescriptionTooLong { path: String },

    /// Two declarations share the same path.
    #[error("Param '{path}' is declared more than once")]
    DuplicatePath { path: String },

    /// The enablement flag is neither a boolean nor "true"/"false".
    #[error("Ambiguous value for \"enabled\": '{value}'")]
    AmbiguousEnabled { value: String },

    /// A source reference names no known stack output.
    #[error("Param '{path}' references unknown stack output '{output}'")]
    UnresolvedSource { path: String, output: String },

    /// A collaborator call failed.
    #[error(transparent)]
    Store(#[from] ssm_store::Error),

    /// The publisher was assembled without a required collaborator.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Create a missing required fields error.
    pub fn missing_required_fields(path: impl Into<String>) -> Self {
        Self::MissingRequiredFields { path: path.into() }
    }

    /// Create an invalid name error.
    pub fn invalid_name(path: impl Into<String>) -> Self {
        Self::InvalidName { path: path.into() }
    }

    /// Create an unresolved source error.
    pub fn unresolved_source(path: impl Into<String>, output: impl Into<String>) -> Self {
        Self::UnresolvedSource {
            path: path.into(),
            output: output.into(),
        }
    }

    /// Create an invalid config error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
