//! Forward/backward traversal of a server-driven cursor-paginated collection.
//!
//! The pager never performs I/O. Each navigation call returns a
//! [`PageRequest`] stamped with a fresh [`Generation`]; the caller fetches the
//! page and hands the outcome back through [`CursorPager::resolve`]. Only the
//! most recently issued request may change the pager, so a slow response for
//! an old filter set can never overwrite a newer one.

use url::Url;

use crate::{Cursor, CursorHistory, Page, PageSize};

/// Monotonic token identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    const fn successor(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value, useful for log correlation.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Navigation step that produced a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// First page of the current configuration.
    Initial,
    /// Page following the current one.
    Next,
    /// Page preceding the current one.
    Previous,
}

/// Description of a page fetch issued by [`CursorPager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<F> {
    /// Token compared against the pager when the response arrives.
    pub generation: Generation,
    /// Navigation step being performed.
    pub direction: Direction,
    /// Cursor to send, `None` for the first page.
    pub cursor: Option<Cursor>,
    /// Requested number of items.
    pub page_size: PageSize,
    /// Filter configuration the cursor belongs to.
    pub filters: F,
}

impl<F> PageRequest<F> {
    /// Append `per_page` and, when present, `cursor` to `url`'s query string.
    ///
    /// # Examples
    /// ```
    /// use pagination::{CursorPager, PageSize};
    /// use url::Url;
    ///
    /// let mut pager: CursorPager<u32, ()> = CursorPager::new((), PageSize::DEFAULT);
    /// let request = pager.load_initial();
    /// let mut url = Url::parse("https://api.example/payments").expect("url");
    /// request.append_query(&mut url);
    /// assert_eq!(url.query(), Some("per_page=10"));
    /// ```
    pub fn append_query(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("per_page", &self.page_size.get().to_string());
        if let Some(cursor) = &self.cursor {
            pairs.append_pair("cursor", cursor.as_str());
        }
    }
}

/// Outcome of [`CursorPager::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<E> {
    /// The page replaced the pager's current result.
    Applied,
    /// A newer request superseded this one; the response was discarded.
    Stale,
    /// The fetch failed; navigation state is unchanged so the step can be retried.
    Failed(E),
}

impl<E> Resolution<E> {
    /// Whether the response was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Cursor pager state machine.
///
/// ## Invariants
/// - `history` always starts with the first-page sentinel.
/// - Only a response whose generation equals the latest issued one mutates
///   the pager.
/// - Failed responses leave history and the next cursor untouched.
/// - Items shown always belong to the active filters and page size.
///
/// # Examples
/// ```
/// use pagination::{Cursor, CursorPager, Page, PageSize, Resolution};
///
/// let mut pager: CursorPager<&str, ()> = CursorPager::new((), PageSize::DEFAULT);
/// let first = pager.load_initial();
/// let page = Page::new(vec!["a"], 2, Some(Cursor::new("1").expect("cursor")));
/// assert!(pager.resolve::<()>(&first, Ok(page)).is_applied());
///
/// let next = pager.load_next().expect("more pages");
/// assert_eq!(next.cursor.as_ref().map(Cursor::as_str), Some("1"));
/// ```
#[derive(Debug, Clone)]
pub struct CursorPager<T, F> {
    filters: F,
    page_size: PageSize,
    history: CursorHistory,
    next_cursor: Option<Cursor>,
    last_result: Option<Page<T>>,
    issued: Generation,
    in_flight: Option<Generation>,
}

impl<T, F: Clone> CursorPager<T, F> {
    /// Create an idle pager; call [`CursorPager::load_initial`] to fetch.
    #[must_use]
    pub fn new(filters: F, page_size: PageSize) -> Self {
        Self {
            filters,
            page_size,
            history: CursorHistory::new(),
            next_cursor: None,
            last_result: None,
            issued: Generation::default(),
            in_flight: None,
        }
    }

    /// Reset navigation and request the first page.
    ///
    /// Cursors and results belong to one filter configuration, so history
    /// and the shown page are cleared as soon as the request is issued rather
    /// than when it completes.
    pub fn load_initial(&mut self) -> PageRequest<F> {
        self.history.reset();
        self.next_cursor = None;
        self.last_result = None;
        self.issue(Direction::Initial, None)
    }

    /// Request the page after the current one, or `None` when exhausted.
    pub fn load_next(&mut self) -> Option<PageRequest<F>> {
        let cursor = self.next_cursor.clone()?;
        Some(self.issue(Direction::Next, Some(cursor)))
    }

    /// Request the page before the current one, or `None` on the first page.
    pub fn load_previous(&mut self) -> Option<PageRequest<F>> {
        let cursor = self.history.previous()?.clone();
        Some(self.issue(Direction::Previous, cursor))
    }

    /// Replace the filter configuration and restart from the first page.
    pub fn set_filters(&mut self, filters: F) -> PageRequest<F> {
        self.filters = filters;
        self.load_initial()
    }

    /// Replace the page size and restart from the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) -> PageRequest<F> {
        self.page_size = page_size;
        self.load_initial()
    }

    /// Apply the outcome of a previously issued request.
    pub fn resolve<E>(
        &mut self,
        request: &PageRequest<F>,
        outcome: Result<Page<T>, E>,
    ) -> Resolution<E> {
        if request.generation != self.issued {
            return Resolution::Stale;
        }
        self.in_flight = None;

        let page = match outcome {
            Ok(page) => page,
            Err(error) => return Resolution::Failed(error),
        };

        match request.direction {
            Direction::Initial => self.history.reset(),
            Direction::Next => self.history.push(request.cursor.clone()),
            Direction::Previous => {
                self.history.pop();
            }
        }
        self.next_cursor = page.next_cursor.clone();
        self.last_result = Some(page);
        Resolution::Applied
    }

    fn issue(&mut self, direction: Direction, cursor: Option<Cursor>) -> PageRequest<F> {
        self.issued = self.issued.successor();
        self.in_flight = Some(self.issued);
        PageRequest {
            generation: self.issued,
            direction,
            cursor,
            page_size: self.page_size,
            filters: self.filters.clone(),
        }
    }
}

impl<T, F> CursorPager<T, F> {
    /// Active filter configuration.
    pub const fn filters(&self) -> &F {
        &self.filters
    }

    /// Active page size.
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Cursor of the following page, `None` when exhausted.
    pub const fn next_cursor(&self) -> Option<&Cursor> {
        self.next_cursor.as_ref()
    }

    /// Whether [`CursorPager::load_next`] would issue a request.
    pub const fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Whether [`CursorPager::load_previous`] would issue a request.
    pub fn has_previous(&self) -> bool {
        !self.history.is_at_start()
    }

    /// Cursor history, bottom first.
    pub const fn history(&self) -> &CursorHistory {
        &self.history
    }

    /// 1-based number of the page currently shown.
    pub fn page_number(&self) -> usize {
        self.history.len()
    }

    /// Most recently applied page.
    pub const fn last_result(&self) -> Option<&Page<T>> {
        self.last_result.as_ref()
    }

    /// Items of the most recently applied page.
    pub fn items(&self) -> &[T] {
        self.last_result
            .as_ref()
            .map_or(&[], |page| page.items.as_slice())
    }

    /// Total matching items reported with the most recent page.
    pub fn total(&self) -> u64 {
        self.last_result.as_ref().map_or(0, |page| page.total)
    }

    /// Whether a request is awaiting resolution.
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }
}
