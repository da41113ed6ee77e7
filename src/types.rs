use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Raw record as returned by a backend lookup, before normalization.
/// Kept as loose JSON because each entity endpoint has its own shape.
pub type RawRecord = serde_json::Value;

/// The entities searchable from the global header, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Clients,
    Orders,
    Invoices,
    Materials,
    Purchases,
    Users,
}

impl SourceKind {
    /// All kinds in priority order (clients first, users last).
    pub const ALL: [SourceKind; 6] = [
        SourceKind::Clients,
        SourceKind::Orders,
        SourceKind::Invoices,
        SourceKind::Materials,
        SourceKind::Purchases,
        SourceKind::Users,
    ];

    /// Position in the fixed aggregation order. Lower sorts first.
    pub fn priority(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or(usize::MAX)
    }

    /// Route prefix for navigation targets, e.g. `/clients`.
    pub fn route_prefix(self) -> &'static str {
        match self {
            SourceKind::Clients => "/clients",
            SourceKind::Orders => "/orders",
            SourceKind::Invoices => "/invoices",
            SourceKind::Materials => "/materials",
            SourceKind::Purchases => "/purchases",
            SourceKind::Users => "/users",
        }
    }

    /// Human-readable label shown in grouped result lists.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Clients => "Clients",
            SourceKind::Orders => "Orders",
            SourceKind::Invoices => "Invoices",
            SourceKind::Materials => "Materials",
            SourceKind::Purchases => "Purchases",
            SourceKind::Users => "Users",
        }
    }
}

/// Application user roles, as reported by the auth collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Accountant,
    Storekeeper,
}

/// Destination the presentation layer routes to when a result is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget(pub String);

impl NavigationTarget {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A normalized, presentation-ready search hit. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: String,
    pub source: SourceKind,
    pub title: String,
    pub subtitle: String,
    pub target: NavigationTarget,
}

/// Externally visible search state. Replaced whole on every transition,
/// never patched, so observers always see a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SearchState {
    Idle,
    Searching,
    Results(Vec<ResultItem>),
    Error(String),
}

impl SearchState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SearchState::Idle)
    }
}

/// The settled result of one source lookup within a search attempt.
/// Tagged with its kind so aggregation and classification stay order-free.
#[derive(Debug)]
pub struct SourceOutcome {
    pub kind: SourceKind,
    pub result: Result<Vec<RawRecord>, SourceError>,
}

impl SourceOutcome {
    pub fn is_rate_limited(&self) -> bool {
        matches!(&self.result, Err(e) if e.is_rate_limited())
    }
}
