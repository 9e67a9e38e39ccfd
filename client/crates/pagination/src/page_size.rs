//! Validated page size.

use std::fmt;

/// Error returned when a page size of zero is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("page size must be at least 1")]
pub struct PageSizeError;

/// Number of items requested per page.
///
/// ## Invariants
/// - Always at least 1, so page arithmetic never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(usize);

impl PageSize {
    /// Page size used when a screen opens.
    pub const DEFAULT: Self = Self(10);

    /// Validate a raw page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError`] when `value` is zero.
    pub const fn new(value: usize) -> Result<Self, PageSizeError> {
        if value == 0 {
            Err(PageSizeError)
        } else {
            Ok(Self(value))
        }
    }

    /// The raw item count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
