use serde_json::Value;
use tracing::debug;

use super::store::CatalogEntry;

/// Keyword-substring retrieval over the catalog.
///
/// Case-insensitive: an entry matches when any of its keywords, lowercased,
/// appears as a substring of the lowercased query. Each entry contributes its
/// payload at most once (first matching keyword wins), and duplicate payloads
/// across entries are collapsed by value equality.
pub fn retrieve(query: &str, entries: &[CatalogEntry]) -> Vec<Value> {
    let query = query.to_lowercase();
    let mut results: Vec<Value> = Vec::new();

    for entry in entries {
        for keyword in &entry.keywords {
            if query.contains(&keyword.to_lowercase()) {
                if !results.contains(&entry.data) {
                    results.push(entry.data.clone());
                }
                break;
            }
        }
    }

    debug!("Retrieval matched {} payload(s) for query", results.len());
    results
}
