use crate::normalize::normalize_record;
use crate::types::{ResultItem, SourceOutcome};

/// Merge settled outcomes into the ordered result list.
///
/// Successful sources contribute up to `per_source_cap` items each, in the
/// source's own order, concatenated in fixed source-priority order so
/// identical queries always render identically. Failed sources contribute
/// nothing here; the classifier decides what their failures mean.
pub fn aggregate(outcomes: &[SourceOutcome], per_source_cap: usize) -> Vec<ResultItem> {
    let mut settled: Vec<&SourceOutcome> = outcomes.iter().collect();
    settled.sort_by_key(|o| o.kind.priority());

    settled
        .into_iter()
        .filter_map(|outcome| outcome.result.as_ref().ok().map(|records| (outcome.kind, records)))
        .flat_map(|(kind, records)| {
            records
                .iter()
                .filter_map(move |record| normalize_record(kind, record))
                .take(per_source_cap)
        })
        .collect()
}
