//! Client-side pagination over a fully fetched collection.
//!
//! Used where the server returns every matching record in one response. The
//! pager keeps the unfiltered base set, a filtered view derived from it, and
//! the page currently shown.

use std::fmt;

use crate::PageSize;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// In-memory pager with an optional item predicate.
///
/// ## Invariants
/// - The filtered view is an order-preserving subset of the base set.
/// - `current_page` lies in `1..=max(total_pages, 1)`.
///
/// # Examples
/// ```
/// use pagination::{OffsetPager, PageSize};
///
/// let mut pager = OffsetPager::new(PageSize::new(10).expect("size"));
/// pager.load_all((0..23).collect::<Vec<u32>>());
/// assert_eq!(pager.total_pages(), 3);
/// assert_eq!(pager.page(3), &[20, 21, 22]);
/// assert!(pager.page(4).is_empty());
/// ```
pub struct OffsetPager<T> {
    base: Vec<T>,
    filtered: Vec<T>,
    predicate: Option<Predicate<T>>,
    page_size: PageSize,
    current_page: usize,
}

impl<T: Clone> OffsetPager<T> {
    /// An empty pager showing page 1.
    #[must_use]
    pub fn new(page_size: PageSize) -> Self {
        Self {
            base: Vec::new(),
            filtered: Vec::new(),
            predicate: None,
            page_size,
            current_page: 1,
        }
    }

    /// Replace the base set and re-apply the active predicate.
    ///
    /// The current page is kept where possible and clamped otherwise, so a
    /// refresh after an edit does not jump back to page 1.
    pub fn load_all(&mut self, items: Vec<T>) {
        self.base = items;
        self.refilter();
        self.current_page = self.clamp(self.current_page);
    }

    /// Filter the base set with `predicate` and return to page 1.
    pub fn apply_filter<P>(&mut self, predicate: P)
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self.refilter();
        self.current_page = 1;
    }

    /// Drop the predicate so every base item is visible, returning to page 1.
    pub fn clear_filter(&mut self) {
        self.predicate = None;
        self.refilter();
        self.current_page = 1;
    }

    fn refilter(&mut self) {
        self.filtered = match &self.predicate {
            Some(predicate) => self
                .base
                .iter()
                .filter(|item| predicate(item))
                .cloned()
                .collect(),
            None => self.base.clone(),
        };
    }
}

impl<T> OffsetPager<T> {
    /// Items `[(n-1)*size, n*size)` of the filtered view; empty outside `1..=total_pages`.
    pub fn page(&self, number: usize) -> &[T] {
        let Some(index) = number.checked_sub(1) else {
            return &[];
        };
        let size = self.page_size.get();
        let start = index.saturating_mul(size);
        let end = start.saturating_add(size).min(self.filtered.len());
        self.filtered.get(start..end).unwrap_or(&[])
    }

    /// Items on the page currently shown.
    pub fn current_items(&self) -> &[T] {
        self.page(self.current_page)
    }

    /// 1-based page currently shown.
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Move to page `number`, clamped to the valid range; returns the page shown.
    pub fn set_page(&mut self, number: usize) -> usize {
        self.current_page = self.clamp(number);
        self.current_page
    }

    /// Advance one page; `false` when already on the last page.
    pub fn next_page(&mut self) -> bool {
        let before = self.current_page;
        self.set_page(before.saturating_add(1)) != before
    }

    /// Go back one page; `false` when already on the first page.
    pub fn previous_page(&mut self) -> bool {
        let before = self.current_page;
        self.set_page(before.saturating_sub(1)) != before
    }

    /// Change the page size, recomputing the page count and clamping the current page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = self.clamp(self.current_page);
    }

    /// Active page size.
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// `ceil(filtered / page_size)`; zero when nothing matches.
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size.get())
    }

    /// Unfiltered collection as loaded.
    pub fn base(&self) -> &[T] {
        &self.base
    }

    /// Filtered view in base order.
    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    fn clamp(&self, number: usize) -> usize {
        number.clamp(1, self.total_pages().max(1))
    }
}

impl<T: fmt::Debug> fmt::Debug for OffsetPager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffsetPager")
            .field("base_len", &self.base.len())
            .field("filtered_len", &self.filtered.len())
            .field("filtered", &self.predicate.is_some())
            .field("page_size", &self.page_size)
            .field("current_page", &self.current_page)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for client-side slicing.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn pager() -> OffsetPager<usize> {
        let mut pager = OffsetPager::new(PageSize::new(10).expect("size"));
        pager.load_all((0..23).collect());
        pager
    }

    #[rstest]
    #[case(1, 0..10)]
    #[case(2, 10..20)]
    #[case(3, 20..23)]
    #[case(4, 0..0)]
    #[case(0, 0..0)]
    fn slices_pages(pager: OffsetPager<usize>, #[case] number: usize, #[case] expected: std::ops::Range<usize>) {
        assert_eq!(pager.page(number), expected.collect::<Vec<_>>().as_slice());
        assert_eq!(pager.total_pages(), 3);
    }

    #[rstest]
    fn filter_resets_to_first_page_and_preserves_order(mut pager: OffsetPager<usize>) {
        pager.set_page(3);
        pager.apply_filter(|n| n % 2 == 1);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.page(2), &[21]);
        assert!(pager.filtered().windows(2).all(|w| w[0] < w[1]));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(2, 2)]
    #[case(99, 3)]
    fn navigation_clamps(mut pager: OffsetPager<usize>, #[case] requested: usize, #[case] shown: usize) {
        assert_eq!(pager.set_page(requested), shown);
    }

    #[rstest]
    fn page_size_change_clamps_current_page(mut pager: OffsetPager<usize>) {
        pager.set_page(3);
        pager.set_page_size(PageSize::new(20).expect("size"));
        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.current_page(), 2);
        assert_eq!(pager.current_items(), &[20, 21, 22]);
    }

    #[rstest]
    fn reload_keeps_filter_and_page(mut pager: OffsetPager<usize>) {
        pager.apply_filter(|n| *n >= 5);
        pager.set_page(2);
        pager.load_all((0..30).collect());
        assert_eq!(pager.current_page(), 2);
        assert_eq!(pager.current_items().first(), Some(&15));
    }

    #[rstest]
    fn empty_collection_has_zero_pages(mut pager: OffsetPager<usize>) {
        pager.apply_filter(|_| false);
        assert_eq!(pager.total_pages(), 0);
        assert_eq!(pager.current_page(), 1);
        assert!(pager.current_items().is_empty());
        assert!(!pager.next_page());
        assert!(!pager.previous_page());
    }

    #[rstest]
    fn stepping_moves_one_page(mut pager: OffsetPager<usize>) {
        assert!(pager.next_page());
        assert!(pager.next_page());
        assert!(!pager.next_page());
        assert!(pager.previous_page());
        assert_eq!(pager.current_page(), 2);
    }
}
