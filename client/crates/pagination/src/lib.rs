//! Pagination primitives shared by the LocalPay list screens.
//!
//! The crate performs no I/O. Pagers hand out [`PageRequest`]
//! values describing what to fetch and accept the outcome later through
//! [`CursorPager::resolve`], so callers may use any transport and tests can
//! resolve requests in any order.
//!
//! - [`Cursor`] is the opaque continuation token issued by the server.
//! - [`CursorHistory`] is the back-navigation stack used by [`CursorPager`].
//! - [`OffsetPager`] slices a fully fetched collection client-side.

mod cursor;
mod cursor_pager;
mod envelope;
mod history;
mod offset_pager;
mod page_size;

pub use cursor::{Cursor, CursorError};
pub use cursor_pager::{CursorPager, Direction, Generation, PageRequest, Resolution};
pub use envelope::Page;
pub use history::CursorHistory;
pub use offset_pager::OffsetPager;
pub use page_size::{PageSize, PageSizeError};
