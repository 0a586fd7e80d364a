//! Stable title ordering for the displayed sequence.

use crate::traits::NewsItem;
use crate::types::SortDirection;

/// Sort entries by case-folded title. The sort is stable, so entries whose
/// folded titles compare equal keep their relative input order in either
/// direction. Descending reverses the ascending comparator rather than
/// defining its own, which keeps tie-breaking symmetric.
pub fn sort_by_title<T: NewsItem>(mut entries: Vec<T>, direction: SortDirection) -> Vec<T> {
    entries.sort_by(|a, b| {
        let ordering = a.title().to_lowercase().cmp(&b.title().to_lowercase());
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    entries
}
