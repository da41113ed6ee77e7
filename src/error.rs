use thiserror::Error;

/// Failure of a single source lookup.
///
/// The transport layer distinguishes exactly one condition — the backend
/// throttling the caller — because it changes how the whole attempt is
/// presented. Everything else is an opaque cause carried for logging.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Backend rejected the lookup with its rate-limit status (HTTP 429).
    /// The message is whatever the backend sent, which may be empty.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other lookup failure. Recovered by dropping the source's
    /// contribution; the attempt still completes with partial results.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SourceError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SourceError::RateLimited(_))
    }

    /// The backend-provided throttle message, if this is a rate-limit
    /// failure with a non-empty one.
    pub fn rate_limit_message(&self) -> Option<&str> {
        match self {
            SourceError::RateLimited(msg) if !msg.trim().is_empty() => Some(msg.trim()),
            _ => None,
        }
    }
}
