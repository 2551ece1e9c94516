//! Multi-candidate endpoint resolution
//!
//! Backends in the field expose the same data under several historical
//! paths. The resolver tries an ordered list of candidate URLs, one at a
//! time, and returns the first response that is both a success status and
//! valid JSON.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{ResolveError, TransportError};
use crate::transport::{RequestOptions, Transport};

/// Join a base URL and a path with exactly one `/` between them
///
/// ```
/// use integration_metocean::resolver::join_url;
///
/// assert_eq!(join_url("http://h/", "/a/b"), "http://h/a/b");
/// assert_eq!(join_url("http://h", "a"), "http://h/a");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Substitute `{name}` placeholders in a path template
pub fn render_path(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

/// One (base URL, path) pair to try
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointCandidate {
    base_url: String,
    path: String,
}

impl EndpointCandidate {
    /// Create a candidate
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
        }
    }

    /// Base URL of the candidate
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path (already rendered) of the candidate
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Full URL
    pub fn url(&self) -> String {
        join_url(&self.base_url, &self.path)
    }

    /// Build the base-major priority list for several bases
    ///
    /// Empty bases are ignored. A candidate whose full URL was already
    /// produced by an earlier base is skipped.
    pub fn expand<B, P>(bases: &[B], paths: &[P]) -> Vec<Self>
    where
        B: AsRef<str>,
        P: AsRef<str>,
    {
        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::with_capacity(bases.len() * paths.len());
        for base in bases.iter().map(AsRef::as_ref).filter(|b| !b.is_empty()) {
            for path in paths {
                let candidate = Self::new(base, path.as_ref());
                let url = candidate.url();
                if seen.contains(&url) {
                    continue;
                }
                seen.push(url);
                out.push(candidate);
            }
        }
        out
    }
}

/// Successful resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// URL that answered
    pub url: String,
    /// Parsed body
    pub payload: Value,
}

/// Outcome of one resolution run
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A candidate answered
    Success {
        /// URL that answered
        resolved_url: String,
        /// Parsed body
        payload: Value,
        /// Requests made, including the successful one
        attempts: usize,
    },
    /// No candidate answered
    Failure {
        /// Error of the last candidate, `None` when nothing was tried
        last_error: Option<TransportError>,
        /// Requests made
        attempts: usize,
    },
}

impl Resolution {
    /// Number of requests made
    pub const fn attempts(&self) -> usize {
        match self {
            Self::Success { attempts, .. } | Self::Failure { attempts, .. } => *attempts,
        }
    }

    /// Whether a candidate answered
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Convert into a `Result`
    pub fn into_result(self) -> Result<Resolved, ResolveError> {
        match self {
            Self::Success {
                resolved_url,
                payload,
                ..
            } => Ok(Resolved {
                url: resolved_url,
                payload,
            }),
            Self::Failure {
                last_error: None, ..
            } => Err(ResolveError::NoCandidates),
            Self::Failure {
                last_error: Some(last_error),
                attempts,
            } => Err(ResolveError::Exhausted {
                attempts,
                last_error,
            }),
        }
    }
}

/// Tries candidate endpoints in order through a [`Transport`]
#[derive(Debug, Clone)]
pub struct EndpointResolver<T> {
    transport: T,
    default_base_url: String,
}

impl<T: Transport> EndpointResolver<T> {
    /// Create a resolver with the base used when callers pass an empty one
    pub fn new(transport: T, default_base_url: impl Into<String>) -> Self {
        Self {
            transport,
            default_base_url: default_base_url.into(),
        }
    }

    /// Default base URL
    pub fn default_base_url(&self) -> &str {
        &self.default_base_url
    }

    /// Underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Try each path on one base
    ///
    /// An empty `base_url` means the resolver's default base.
    pub async fn resolve<P: AsRef<str>>(
        &self,
        base_url: &str,
        paths: &[P],
        options: &RequestOptions,
    ) -> Resolution {
        let base = if base_url.is_empty() {
            self.default_base_url.as_str()
        } else {
            base_url
        };
        let candidates = EndpointCandidate::expand(&[base], paths);
        self.resolve_candidates(&candidates, options).await
    }

    /// Try each path on each base, base-major
    ///
    /// Empty bases are skipped; if every base is empty the default base is
    /// used.
    pub async fn resolve_across<B, P>(
        &self,
        bases: &[B],
        paths: &[P],
        options: &RequestOptions,
    ) -> Resolution
    where
        B: AsRef<str>,
        P: AsRef<str>,
    {
        let mut candidates = EndpointCandidate::expand(bases, paths);
        if candidates.is_empty() && !paths.is_empty() {
            candidates = EndpointCandidate::expand(&[self.default_base_url.as_str()], paths);
        }
        self.resolve_candidates(&candidates, options).await
    }

    /// Try an explicit candidate list
    #[instrument(skip(self, candidates, options), fields(candidates = candidates.len()))]
    pub async fn resolve_candidates(
        &self,
        candidates: &[EndpointCandidate],
        options: &RequestOptions,
    ) -> Resolution {
        let mut attempts = 0;
        let mut last_error = None;

        for candidate in candidates {
            let url = candidate.url();
            attempts += 1;
            debug!(url = %url, attempt = attempts, "Trying endpoint candidate");

            match self.transport.fetch_json(&url, options).await {
                Ok(payload) => {
                    debug!(url = %url, attempts, "Endpoint candidate resolved");
                    return Resolution::Success {
                        resolved_url: url,
                        payload,
                        attempts,
                    };
                },
                Err(e) => {
                    debug!(url = %url, error = %e, "Endpoint candidate failed");
                    last_error = Some(e);
                },
            }
        }

        if let Some(error) = &last_error {
            warn!(attempts, last_error = %error, "All endpoint candidates exhausted");
        }

        Resolution::Failure {
            last_error,
            attempts,
        }
    }
}
