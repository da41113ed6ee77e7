use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use crate::registry::SearchSource;
use crate::token::{AttemptToken, AttemptTokens};
use crate::types::SourceOutcome;

/// Fan out one query to every allowed source and wait for all outcomes.
///
/// Each source's failure is folded into its own tagged outcome before
/// joining, so a rejection (rate limit included) never short-circuits the
/// other lookups. The token is checked before dispatch and again after the
/// join: when the attempt was superseded mid-flight the outcomes are
/// dropped here rather than handed to aggregation.
pub async fn dispatch(
    query: &str,
    token: AttemptToken,
    tokens: &AttemptTokens,
    sources: &[Arc<dyn SearchSource>],
) -> Vec<SourceOutcome> {
    if !tokens.is_current(token) {
        return Vec::new();
    }

    let lookups = sources.iter().map(|source| {
        let source = Arc::clone(source);
        async move {
            let result = source.lookup(query).await;
            if let Err(e) = &result {
                debug!(kind = ?source.kind(), error = %e, "source lookup failed");
            }
            SourceOutcome {
                kind: source.kind(),
                result,
            }
        }
    });
    let outcomes = join_all(lookups).await;

    if !tokens.is_current(token) {
        debug!(%query, "attempt superseded in flight; dropping outcomes");
        return Vec::new();
    }
    outcomes
}
