//! Metocean integration error types

use thiserror::Error;

/// Failure of a single HTTP request
///
/// Raised per candidate; the resolver recovers from it by moving on to the
/// next candidate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established or was interrupted
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The transport's timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL (without query string)
        url: String,
    },

    /// Body was not valid JSON
    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    /// The URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Terminal outcome of a failed candidate resolution
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The candidate list was empty; no request was made
    #[error("No endpoint candidates to try")]
    NoCandidates,

    /// Every candidate failed
    #[error("All {attempts} endpoint candidates exhausted, last error: {last_error}")]
    Exhausted {
        /// Number of requests made
        attempts: usize,
        /// Error of the last candidate tried
        last_error: TransportError,
    },
}

/// Errors surfaced by the metocean clients
#[derive(Debug, Error)]
pub enum MetoceanError {
    /// Candidate resolution failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A single direct request failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Body parsed as JSON but not into the expected shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Upstream reported an application-level error in its envelope
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A required setting or credential is missing
    #[error("Configuration error: {0}")]
    Configuration(String),
}
