//! Order-preserving deduplication of names by normalized key.

use crate::types::Query;
use std::collections::HashSet;

/// Turn names into queries, keeping only first occurrences when `enabled`.
///
/// Identity is the trimmed, case-folded key; the first-seen original string
/// is retained. With `enabled == false` every name is kept as-is.
pub fn dedupe<S: AsRef<str>>(names: &[S], enabled: bool) -> Vec<Query> {
    let queries = names.iter().map(|n| Query::new(n.as_ref()));
    if !enabled {
        return queries.collect();
    }

    let mut seen = HashSet::new();
    queries.filter(|q| seen.insert(q.key.clone())).collect()
}
