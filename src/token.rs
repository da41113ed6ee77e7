use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque marker identifying one search attempt.
///
/// Compared by value against the manager's current generation; a token is
/// an integer rather than a flag so that any number of supersessions stays
/// unambiguous — an attempt two generations stale looks no different from
/// one generation stale, and neither can ever read as current again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptToken(u64);

/// Issues and invalidates attempt tokens.
///
/// A single generation counter is the only shared mutable state in the
/// coordinator. `begin` bumps it and hands out the new generation;
/// everything async re-checks `is_current` before touching search state,
/// which makes stale network responses inert without transport-level
/// aborts.
#[derive(Debug, Default)]
pub struct AttemptTokens {
    current: AtomicU64,
}

impl AttemptTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new attempt: invalidates every previously issued token and
    /// returns the token for the new one.
    pub fn begin(&self) -> AttemptToken {
        AttemptToken(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Invalidate all outstanding tokens without starting a new attempt.
    /// Used when the query is cleared: in-flight work must become stale,
    /// but nothing new is dispatched.
    pub fn cancel_previous(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    /// Whether `token` belongs to the most recently begun attempt.
    pub fn is_current(&self, token: AttemptToken) -> bool {
        self.current.load(Ordering::Acquire) == token.0
    }
}
