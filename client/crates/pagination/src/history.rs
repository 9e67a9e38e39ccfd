//! Back-navigation stack for cursor pagination.

use crate::Cursor;

/// Stack of cursors that produced the pages visited so far.
///
/// The bottom entry is always `None`, the cursor of the first page, and the
/// top entry produced the page currently shown.
///
/// ## Invariants
/// - The stack is never empty.
/// - `len() == 1 + pushes - pops` since the last [`CursorHistory::reset`].
///
/// # Examples
/// ```
/// use pagination::{Cursor, CursorHistory};
///
/// let mut history = CursorHistory::new();
/// history.push(Some(Cursor::new("10").expect("cursor")));
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.previous(), Some(&None));
/// history.pop();
/// assert!(history.is_at_start());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorHistory {
    entries: Vec<Option<Cursor>>,
}

impl CursorHistory {
    /// A history positioned on the first page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![None],
        }
    }

    /// Forget every visited page, returning to `[None]`.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(None);
    }

    /// Record the cursor that produced a newly shown page.
    pub fn push(&mut self, cursor: Option<Cursor>) {
        self.entries.push(cursor);
    }

    /// Drop the current page's cursor. The first-page sentinel is never popped.
    pub fn pop(&mut self) -> Option<Option<Cursor>> {
        if self.entries.len() > 1 {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Cursor that produced the page before the current one, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&Option<Cursor>> {
        let index = self.entries.len().checked_sub(2)?;
        self.entries.get(index)
    }

    /// Cursor that produced the current page.
    #[must_use]
    pub fn current(&self) -> Option<&Cursor> {
        self.entries.last().and_then(Option::as_ref)
    }

    /// Number of entries, which is also the 1-based number of the current page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the current page is the first one.
    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Borrow the stack, bottom first.
    #[must_use]
    pub fn entries(&self) -> &[Option<Cursor>] {
        &self.entries
    }
}

impl Default for CursorHistory {
    fn default() -> Self {
        Self::new()
    }
}
