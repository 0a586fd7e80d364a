//! Pure predicate evaluation over entry sequences.
//!
//! Works on anything implementing [`NewsItem`], so fetched and persisted
//! entries go through the same clauses. Order-preserving and side-effect
//! free; an empty input yields an empty output, never an error.

use crate::traits::NewsItem;
use crate::types::FilterCriteria;

/// Keep the entries that pass every clause of `criteria`, in input order.
pub fn apply<T: NewsItem + Clone>(entries: &[T], criteria: &FilterCriteria) -> Vec<T> {
    entries
        .iter()
        .filter(|entry| passes(*entry, criteria))
        .cloned()
        .collect()
}

/// An entry passes iff all four clauses hold: inclusive date bounds,
/// keyword substring, source match, status match.
///
/// Date comparison is lexicographic, which is correct for ISO `YYYY-MM-DD`
/// strings; format normalization is the caller's contract.
pub fn passes<T: NewsItem>(entry: &T, criteria: &FilterCriteria) -> bool {
    let date = entry.published_date();
    if date < criteria.start_date.as_str() || date > criteria.end_date.as_str() {
        return false;
    }

    if !criteria.keyword.is_empty() {
        let keyword = criteria.keyword.to_lowercase();
        let in_title = entry.title().to_lowercase().contains(&keyword);
        let in_description = entry.description().to_lowercase().contains(&keyword);
        if !in_title && !in_description {
            return false;
        }
    }

    if !criteria.source_filter.matches(entry.source()) {
        return false;
    }

    criteria.status_filter.matches(entry.status())
}
