use std::time::Duration;

/// Quiet period after the last keystroke before a search attempt starts.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Maximum results each source contributes to the aggregate list.
pub const DEFAULT_PER_SOURCE_CAP: usize = 3;

/// Tunables for the header-search coordinator.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Debounce interval for keystroke input.
    pub debounce: Duration,
    /// Per-source result cap applied during aggregation.
    pub per_source_cap: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            per_source_cap: DEFAULT_PER_SOURCE_CAP,
        }
    }
}
