//! Page envelope returned by list endpoints.

use crate::Cursor;

/// One page of a server-paginated collection.
///
/// `total` counts every item matching the active filters across all pages;
/// `next_cursor` is `None` once the collection is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page in server order.
    pub items: Vec<T>,
    /// Number of matching items across all pages.
    pub total: u64,
    /// Continuation token for the following page.
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Build a page from its parts.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, next_cursor: Option<Cursor>) -> Self {
        Self {
            items,
            total,
            next_cursor,
        }
    }

    /// Whether another page can be requested.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Transform every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            next_cursor: self.next_cursor,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::new(Vec::new(), 0, None)
    }
}
