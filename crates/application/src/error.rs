//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::normalizer::NormalizeError;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A single upstream request failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Every endpoint candidate failed
    #[error("All {attempts} endpoint candidates exhausted: {last_error}")]
    ExhaustedCandidates {
        /// Number of requests made
        attempts: usize,
        /// Last underlying error
        last_error: String,
    },

    /// Response body was not in the expected shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Required setting or credential missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if the next poll cycle may succeed
    ///
    /// Nothing is retried immediately; this only tells the poller whether
    /// to keep going quietly or surface the error as persistent.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::ExhaustedCandidates { .. }
        )
    }
}

impl From<NormalizeError> for ApplicationError {
    fn from(err: NormalizeError) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}
