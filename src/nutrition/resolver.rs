use super::foods::{FoodReferenceEntry, FoodTable};

pub const DEFAULT_SUGGESTIONS: usize = 5;

/// Substring search over the reference table.
///
/// Results keep table order rather than relevance order. An empty query
/// yields nothing instead of browsing the whole table.
pub fn search<'a>(
    table: &'a FoodTable,
    query: &str,
    max_results: usize,
) -> Vec<&'a FoodReferenceEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    table
        .entries()
        .iter()
        .filter(|entry| entry.name.contains(&needle))
        .take(max_results)
        .collect()
}
