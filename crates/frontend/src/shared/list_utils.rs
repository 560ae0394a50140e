//! List helpers: case-insensitive search over table rows

/// Minimum filter length before a search narrows the list
pub const MIN_FILTER_LEN: usize = 3;

/// Trait for rows that support text search
pub trait Searchable {
    /// Values the search looks into
    fn search_fields(&self) -> Vec<&str>;

    /// Checks whether any field contains the (already lowercased) filter
    fn matches_filter(&self, filter_lower: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|value| value.to_lowercase().contains(filter_lower))
    }
}

pub fn is_filter_active(filter: &str) -> bool {
    filter.trim().chars().count() >= MIN_FILTER_LEN
}

/// Filters the list by a search query; short queries return the list unchanged
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    if !is_filter_active(filter) {
        return items.to_vec();
    }

    let filter_lower = filter.trim().to_lowercase();
    items
        .iter()
        .filter(|item| item.matches_filter(&filter_lower))
        .cloned()
        .collect()
}
