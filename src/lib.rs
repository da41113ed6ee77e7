//! Debounced, cancellable fan-out coordinator for the global header search.
//!
//! The factory management app searches several backend entities (clients,
//! orders, invoices, materials, purchases, users) from one input box. This
//! crate owns the concurrency around that: collapsing keystroke bursts,
//! invalidating stale in-flight attempts, running the per-entity lookups
//! concurrently, and folding their successes and failures into a single
//! `SearchState` for the UI shell to render. The REST client, auth layer
//! and router stay outside; they plug in through [`SearchSource`], the
//! capability predicate and [`NavigationTarget`].

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod token;
pub mod types;

pub use classify::{classify, Classification, GENERIC_RATE_LIMIT_MESSAGE};
pub use config::SearchConfig;
pub use coordinator::SearchCoordinator;
pub use debounce::Debouncer;
pub use error::SourceError;
pub use registry::{default_capabilities, CapabilityFn, SearchSource, SourceRegistry};
pub use token::{AttemptToken, AttemptTokens};
pub use types::{
    NavigationTarget, RawRecord, ResultItem, Role, SearchState, SourceKind, SourceOutcome,
};
