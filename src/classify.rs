use crate::types::SourceOutcome;

/// Shown when a source was throttled but the backend sent no usable text.
pub const GENERIC_RATE_LIMIT_MESSAGE: &str =
    "Too many search requests. Please wait a moment and try again.";

/// Verdict over one attempt's settled outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// When true the attempt must present `message` instead of results.
    pub blocking: bool,
    pub message: Option<String>,
}

impl Classification {
    fn pass() -> Self {
        Self {
            blocking: false,
            message: None,
        }
    }
}

/// Decide whether the attempt's failures block presentation.
///
/// Rate limiting anywhere blocks the whole attempt, even when other
/// sources succeeded: showing partial results while silently swallowing a
/// throttle condition would hide a user-facing problem. The message is the
/// first specific one a throttled source provided, else a generic one.
/// Generic failures never block; the attempt degrades to partial results.
pub fn classify(outcomes: &[SourceOutcome]) -> Classification {
    let rate_limited: Vec<&SourceOutcome> =
        outcomes.iter().filter(|o| o.is_rate_limited()).collect();
    if rate_limited.is_empty() {
        return Classification::pass();
    }

    let message = rate_limited
        .iter()
        .filter_map(|o| match &o.result {
            Err(e) => e.rate_limit_message(),
            Ok(_) => None,
        })
        .next()
        .unwrap_or(GENERIC_RATE_LIMIT_MESSAGE)
        .to_string();

    Classification {
        blocking: true,
        message: Some(message),
    }
}
