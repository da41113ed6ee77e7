use crate::types::{NavigationTarget, RawRecord, ResultItem, SourceKind};

/// Map one raw backend record to a presentation-ready item.
///
/// Each entity endpoint has its own field names, so normalization is a
/// per-kind rule. Ids arrive as JSON numbers or strings depending on the
/// endpoint; both are accepted. Records without a usable id are dropped —
/// a malformed row must not sink the rest of the source's results.
pub fn normalize_record(kind: SourceKind, record: &RawRecord) -> Option<ResultItem> {
    let id = field_string(record, &["id"])?;
    let (title, subtitle) = match kind {
        SourceKind::Clients => (
            field_string(record, &["name", "full_name"])?,
            field_string(record, &["phone", "company"]),
        ),
        SourceKind::Orders => (
            format!("Order #{}", field_string(record, &["number", "order_number"]).unwrap_or_else(|| id.clone())),
            field_string(record, &["client_name", "status"]),
        ),
        SourceKind::Invoices => (
            format!("Invoice #{}", field_string(record, &["number", "invoice_number"]).unwrap_or_else(|| id.clone())),
            field_string(record, &["client_name", "total"]),
        ),
        SourceKind::Materials => (
            field_string(record, &["name"])?,
            field_string(record, &["code", "unit"]),
        ),
        SourceKind::Purchases => (
            format!("Purchase #{}", field_string(record, &["number", "purchase_number"]).unwrap_or_else(|| id.clone())),
            field_string(record, &["supplier_name", "supplier"]),
        ),
        SourceKind::Users => (
            field_string(record, &["name", "username"])?,
            field_string(record, &["role", "email"]),
        ),
    };

    Some(ResultItem {
        target: NavigationTarget(format!("{}/{}", kind.route_prefix(), id)),
        subtitle: subtitle.unwrap_or_else(|| kind.label().to_string()),
        id,
        source: kind,
        title,
    })
}

/// First of `keys` present on the record, as text. Numbers are rendered
/// so numeric ids and totals normalize like their string counterparts.
fn field_string(record: &RawRecord, keys: &[&str]) -> Option<String> {
    for key in keys {
        match record.get(key) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                return Some(s.trim().to_string());
            }
            Some(serde_json::Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}
