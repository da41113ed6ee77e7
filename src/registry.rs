use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::types::{RawRecord, Role, SourceKind};

/// One searchable backend entity (clients, orders, ...).
///
/// Implementations wrap the REST client for their entity's list endpoint.
/// A throttled backend must surface as `SourceError::RateLimited`; any
/// other failure is generic and only degrades the attempt.
#[async_trait]
pub trait SearchSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn lookup(&self, query: &str) -> Result<Vec<RawRecord>, SourceError>;
}

/// Decides whether a role may search a given entity.
/// Supplied by the auth collaborator; closes over whatever state it needs.
pub type CapabilityFn = Arc<dyn Fn(SourceKind, &Role) -> bool + Send + Sync>;

/// The full source list plus the role gate applied per attempt.
///
/// Filtering is a pure, stateless step: sources a role may not search are
/// silently omitted rather than dispatched-and-failed.
pub struct SourceRegistry {
    sources: Vec<Arc<dyn SearchSource>>,
    allowed: CapabilityFn,
}

impl SourceRegistry {
    pub fn new(allowed: CapabilityFn) -> Self {
        Self {
            sources: Vec::new(),
            allowed,
        }
    }

    /// Registry gating every source through the application's default
    /// role table. Convenient for wiring and tests.
    pub fn with_default_capabilities() -> Self {
        Self::new(Arc::new(default_capabilities))
    }

    pub fn register(&mut self, source: Arc<dyn SearchSource>) -> &mut Self {
        self.sources.push(source);
        self
    }

    /// Sources the given role may search, in fixed priority order.
    pub fn sources_for(&self, role: &Role) -> Vec<Arc<dyn SearchSource>> {
        let mut allowed: Vec<Arc<dyn SearchSource>> = self
            .sources
            .iter()
            .filter(|s| (self.allowed)(s.kind(), role))
            .cloned()
            .collect();
        allowed.sort_by_key(|s| s.kind().priority());
        allowed
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// The application's role table for header search.
///
/// Admins and managers search everything; accountants see the commercial
/// entities; storekeepers see stock-side entities plus the orders they
/// fulfil. Only admins may search users.
pub fn default_capabilities(kind: SourceKind, role: &Role) -> bool {
    match role {
        Role::Admin => true,
        Role::Manager => kind != SourceKind::Users,
        Role::Accountant => matches!(
            kind,
            SourceKind::Clients | SourceKind::Orders | SourceKind::Invoices | SourceKind::Purchases
        ),
        Role::Storekeeper => matches!(
            kind,
            SourceKind::Materials | SourceKind::Purchases | SourceKind::Orders
        ),
    }
}
