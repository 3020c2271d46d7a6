//! Shared listing contract: filter, sort, paginate.
//!
//! Every listing surface - companies, roles, employees, requests - shapes
//! its rows the same way, so the contract is stated once here. Application
//! order is always filter -> sort -> paginate: filtering before sorting is
//! equivalent (the sort is stable and the filter preserves order), but
//! pagination must come last or page boundaries land on the wrong rows.

use std::num::NonZeroUsize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Case-insensitive substring filter.
///
/// Keeps the items whose extracted text contains `query`, preserving input
/// order. An empty query keeps everything. Applying the same filter twice is
/// a no-op.
pub fn filter<T, F>(items: Vec<T>, query: &str, extract: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    if query.is_empty() {
        return items;
    }

    let needle = query.to_lowercase();
    items
        .into_iter()
        .filter(|item| extract(item).to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort by an extracted key.
///
/// Equal keys keep their input order in both directions; string keys compare
/// case-sensitively by code point, matching the backend's native ordering.
pub fn sort_by_key<T, K, F>(items: &mut [T], key: F, direction: SortDirection)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    match direction {
        SortDirection::Ascending => items.sort_by(|a, b| key(a).cmp(&key(b))),
        // Comparing (b, a) flips order but, via Equal, still leaves ties in
        // input order - unlike sort + reverse, which would not be stable.
        SortDirection::Descending => items.sort_by(|a, b| key(b).cmp(&key(a))),
    }
}

/// One page of a listing, with the controls state derived from a single
/// total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    page_index: usize,
    total_pages: usize,
    total_items: usize,
}

impl<T> Page<T> {
    /// Rows on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, yielding its rows.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 0-based index of this page.
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Total number of pages (`ceil(total_items / page_size)`).
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Whether a "Previous" control should be enabled.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Whether a "Next" control should be enabled. Derived from the same
    /// total as [`Self::has_previous`].
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }
}

/// Slice out the 0-based page `[index * size, index * size + size)`.
///
/// An index at or past the last page yields an empty page with the controls
/// still consistent with the total.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page_index: usize, page_size: NonZeroUsize) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size.get());
    let start = page_index.saturating_mul(page_size.get());

    let items = items
        .into_iter()
        .skip(start)
        .take(page_size.get())
        .collect();

    Page {
        items,
        page_index,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let items = vec!["Team offsite", "client visit", "Conference"];
        let kept = filter(items, "VISIT", |s| *s);
        assert_eq!(kept, vec!["client visit"]);
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let items = vec!["a", "b", "c"];
        assert_eq!(filter(items.clone(), "", |s| *s), items);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = vec!["alpha", "beta", "alphabet"];
        let once = filter(items, "alpha", |s| *s);
        let twice = filter(once.clone(), "alpha", |s| *s);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_string_keys_by_code_point() {
        // Code-point order is case-sensitive: uppercase sorts before
        // lowercase.
        let mut items = vec!["banana", "Apple", "apple"];
        sort_by_key(&mut items, |s| (*s).to_owned(), SortDirection::Ascending);
        assert_eq!(items, vec!["Apple", "apple", "banana"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        // Same key, distinct payloads: relative order must survive the sort
        // in both directions.
        let mut items = vec![("b", 1), ("a", 2), ("b", 3), ("a", 4)];
        sort_by_key(&mut items, |(k, _)| *k, SortDirection::Ascending);
        assert_eq!(items, vec![("a", 2), ("a", 4), ("b", 1), ("b", 3)]);

        let mut items = vec![("b", 1), ("a", 2), ("b", 3), ("a", 4)];
        sort_by_key(&mut items, |(k, _)| *k, SortDirection::Descending);
        assert_eq!(items, vec![("b", 1), ("b", 3), ("a", 2), ("a", 4)]);
    }

    #[test]
    fn test_paginate_twelve_items_page_two_of_five() {
        let items: Vec<i32> = (1..=12).collect();
        let page = paginate(items, 2, size(5));
        assert_eq!(page.items(), &[11, 12]);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_pages_reconstruct_input_exactly() {
        let items: Vec<i32> = (0..23).collect();
        let total_pages = paginate(items.clone(), 0, size(4)).total_pages();

        let mut reassembled = Vec::new();
        for index in 0..total_pages {
            let page = paginate(items.clone(), index, size(4));
            assert!(!page.items().is_empty());
            assert!(page.items().len() <= 4);
            reassembled.extend_from_slice(page.items());
        }
        assert_eq!(reassembled, items);
    }

    #[test]
    fn test_first_page_disables_previous() {
        let page = paginate(vec![1, 2, 3], 0, size(2));
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_empty_input_disables_both_controls() {
        let page = paginate(Vec::<i32>::new(), 0, size(5));
        assert_eq!(page.total_pages(), 0);
        assert!(page.items().is_empty());
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let page = paginate(vec![1, 2, 3], 7, size(2));
        assert!(page.items().is_empty());
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_next());
    }

    #[test]
    fn test_filter_sort_paginate_compose_in_contract_order() {
        let items = vec![
            "pear", "Plum", "peach", "apple", "plum", "pecan", "papaya",
        ];
        let filtered = filter(items, "p", |s| *s);
        let mut sorted = filtered;
        sort_by_key(&mut sorted, |s| (*s).to_owned(), SortDirection::Ascending);
        let page = paginate(sorted, 1, size(3));

        // All seven contain "p"; code-point order puts "Plum" first, so the
        // full order is Plum, apple, papaya, peach, pear, pecan, plum.
        assert_eq!(page.items(), &["peach", "pear", "pecan"]);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous());
        assert!(page.has_next());
    }
}
