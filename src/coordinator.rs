use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::aggregate::aggregate;
use crate::classify::{classify, GENERIC_RATE_LIMIT_MESSAGE};
use crate::config::SearchConfig;
use crate::debounce::Debouncer;
use crate::dispatch::dispatch;
use crate::registry::SourceRegistry;
use crate::token::AttemptTokens;
use crate::types::{NavigationTarget, ResultItem, Role, SearchState};

/// Composition root for the header search.
///
/// Wires debounce, cancellation, fan-out, aggregation and classification
/// into the per-keystroke entry point, and publishes the current
/// `SearchState` through a watch channel the presentation layer can poll
/// or subscribe to. State is only ever written on behalf of the current
/// attempt; superseded attempts find their token stale and write nothing.
pub struct SearchCoordinator {
    registry: SourceRegistry,
    role: Role,
    config: SearchConfig,
    tokens: AttemptTokens,
    debouncer: Debouncer,
    state: watch::Sender<SearchState>,
}

impl SearchCoordinator {
    /// Build a coordinator for one signed-in user. Returned in an `Arc`
    /// because debounced attempts run on spawned tasks that outlive the
    /// call that scheduled them.
    pub fn new(registry: SourceRegistry, role: Role, config: SearchConfig) -> Arc<Self> {
        let (state, _) = watch::channel(SearchState::Idle);
        Arc::new(Self {
            debouncer: Debouncer::new(config.debounce),
            registry,
            role,
            config,
            tokens: AttemptTokens::new(),
            state,
        })
    }

    /// Per-keystroke entry point.
    ///
    /// Whitespace-only input resets to `Idle` immediately: the pending
    /// debounce timer is dropped and every in-flight token is invalidated,
    /// with no new attempt made. Anything else (re)starts the debounce
    /// window with the trimmed text.
    pub async fn on_query_change(self: &Arc<Self>, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.debouncer.cancel().await;
            self.tokens.cancel_previous();
            self.state.send_replace(SearchState::Idle);
            return;
        }

        let this = Arc::clone(self);
        let query = trimmed.to_string();
        self.debouncer
            .schedule(async move {
                this.run_attempt(&query).await;
            })
            .await;
    }

    /// Run one search attempt to a terminal state.
    ///
    /// Public so a UI shell can also trigger an immediate search (submit
    /// on Enter) without waiting out the debounce window.
    pub async fn run_attempt(&self, query: &str) {
        let token = self.tokens.begin();
        self.state.send_replace(SearchState::Searching);

        let sources = self.registry.sources_for(&self.role);
        debug!(%query, sources = sources.len(), "search attempt started");

        let outcomes = dispatch(query, token, &self.tokens, &sources).await;
        if !self.tokens.is_current(token) {
            debug!(%query, "attempt superseded; result discarded");
            return;
        }

        let verdict = classify(&outcomes);
        if verdict.blocking {
            let message = verdict
                .message
                .unwrap_or_else(|| GENERIC_RATE_LIMIT_MESSAGE.to_string());
            warn!(%query, %message, "search attempt blocked by rate limiting");
            self.state.send_replace(SearchState::Error(message));
        } else {
            let items = aggregate(&outcomes, self.config.per_source_cap);
            debug!(%query, results = items.len(), "search attempt completed");
            self.state.send_replace(SearchState::Results(items));
        }
    }

    /// Snapshot of the current state for polling renderers.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Live state stream for subscribing renderers.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// A result was chosen: clear query-related work and state, and hand
    /// the destination back for the external router.
    pub async fn on_result_select(&self, item: &ResultItem) -> NavigationTarget {
        self.debouncer.cancel().await;
        self.tokens.cancel_previous();
        self.state.send_replace(SearchState::Idle);
        item.target.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::SourceError;
    use crate::registry::SearchSource;
    use crate::types::{RawRecord, SourceKind};

    /// Source that answers after `delay` with a single record naming the
    /// query it saw, and counts its invocations.
    struct EchoSource {
        kind: SourceKind,
        delay: Duration,
        calls: Arc<AtomicUsize>,
        queries: Arc<tokio::sync::Mutex<Vec<String>>>,
    }

    impl EchoSource {
        fn new(kind: SourceKind, delay: Duration) -> Self {
            Self {
                kind,
                delay,
                calls: Arc::new(AtomicUsize::new(0)),
                queries: Arc::new(tokio::sync::Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl SearchSource for EchoSource {
        fn kind(&self) -> SourceKind {
            self.kind
        }

        async fn lookup(&self, query: &str) -> Result<Vec<RawRecord>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().await.push(query.to_string());
            tokio::time::sleep(self.delay).await;
            Ok(vec![json!({"id": 1, "name": query})])
        }
    }

    fn coordinator_with(source: EchoSource) -> (Arc<SearchCoordinator>, Arc<AtomicUsize>, Arc<tokio::sync::Mutex<Vec<String>>>) {
        let calls = Arc::clone(&source.calls);
        let queries = Arc::clone(&source.queries);
        let mut registry = SourceRegistry::with_default_capabilities();
        registry.register(Arc::new(source));
        let coordinator = SearchCoordinator::new(registry, Role::Admin, SearchConfig::default());
        (coordinator, calls, queries)
    }

    /// Let spawned debounce/attempt tasks reach their next await point.
    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_collapses_burst_to_last_query() {
        let (coordinator, calls, queries) =
            coordinator_with(EchoSource::new(SourceKind::Clients, Duration::from_millis(10)));

        for text in ["a", "al", "ali"] {
            coordinator.on_query_change(text).await;
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*queries.lock().await, vec!["ali".to_string()]);
        match coordinator.state() {
            SearchState::Results(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].title, "ali");
            }
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn empty_query_short_circuits_without_dispatch() {
        let (coordinator, calls, _) =
            coordinator_with(EchoSource::new(SourceKind::Clients, Duration::from_millis(10)));

        coordinator.on_query_change("ali").await;
        tokio::time::advance(Duration::from_millis(100)).await;
        // Cleared before the debounce window elapsed.
        coordinator.on_query_change("   ").await;
        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(coordinator.state().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_mid_flight_discards_the_attempt() {
        let (coordinator, calls, _) =
            coordinator_with(EchoSource::new(SourceKind::Clients, Duration::from_millis(200)));

        coordinator.on_query_change("ali").await;
        tokio::time::advance(Duration::from_millis(600)).await;
        settle().await;
        // Attempt is in flight now.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.state(), SearchState::Searching);

        coordinator.on_query_change("").await;
        assert!(coordinator.state().is_idle());

        // The stale lookup resolves but must not resurrect any state.
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert!(coordinator.state().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_newest_attempt_reaches_state() {
        let (coordinator, _, _) =
            coordinator_with(EchoSource::new(SourceKind::Clients, Duration::from_millis(100)));

        // Drive attempts directly: the first is still in flight when the
        // second begins, so its outcome must be discarded on arrival.
        let first = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.run_attempt("first").await })
        };
        tokio::time::advance(Duration::from_millis(10)).await;
        let second = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.run_attempt("second").await })
        };

        tokio::time::advance(Duration::from_millis(500)).await;
        first.await.unwrap();
        second.await.unwrap();

        match coordinator.state() {
            SearchState::Results(items) => assert_eq!(items[0].title, "second"),
            other => panic!("expected results from the second attempt, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn result_select_resets_and_returns_target() {
        let (coordinator, _, _) =
            coordinator_with(EchoSource::new(SourceKind::Clients, Duration::from_millis(1)));

        coordinator.run_attempt("ali").await;
        let item = match coordinator.state() {
            SearchState::Results(items) => items[0].clone(),
            other => panic!("expected results, got {other:?}"),
        };

        let target = coordinator.on_result_select(&item).await;
        assert_eq!(target.as_str(), "/clients/1");
        assert!(coordinator.state().is_idle());
    }
}
