//! Error types for the store crate.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Store error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A store API call failed.
    #[error("store operation '{operation}' failed: {reason}")]
    OperationFailed { operation: String, reason: String },

    /// A batched query exceeded the store's per-call limit.
    #[error("batch of {len} names exceeds the {max}-name query limit")]
    BatchTooLarge { len: usize, max: usize },

    /// Stack output lookup failed.
    #[error("describing stack outputs failed: {reason}")]
    OutputsFailed { reason: String },
}

impl Error {
    /// Create an operation failed error.
    pub fn operation_failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an outputs failed error.
    pub fn outputs_failed(reason: impl Into<String>) -> Self {
        Self::OutputsFailed {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::operation_failed("get_parameters", "throttled");
        assert!(err.to_string().contains("get_parameters"));
        assert!(err.to_string().contains("throttled"));
    }

    #[test]
    fn test_batch_too_large_display() {
        let err = Error::BatchTooLarge { len: 12, max: 10 };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("10"));
    }
}
