//! Filter configurations sent with list queries.
//!
//! Each type renders its own query pairs so adapters stay free of field
//! naming rules. Blank text fields are dropped rather than sent empty.

use std::fmt;

use super::DateRange;

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Filters of the operator payments list (`GET /payments`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilters {
    pub range: DateRange,
    pub ls_abon: Option<String>,
    pub name: Option<String>,
}

impl PaymentFilters {
    /// Build filters from raw text inputs.
    pub fn new(range: DateRange, ls_abon: &str, name: &str) -> Self {
        Self {
            range,
            ls_abon: non_blank(ls_abon),
            name: non_blank(name),
        }
    }

    /// Query pairs in wire naming.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.range.query_pairs();
        if let Some(account) = &self.ls_abon {
            pairs.push(("ls_abon", account.clone()));
        }
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        pairs
    }
}

/// Filters of a single user's payment history (`GET /payments_by_user`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFilters {
    pub login: String,
    pub range: DateRange,
}

impl ProfileFilters {
    /// Query pairs in wire naming; `login` is always present.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("login", self.login.clone())];
        pairs.extend(self.range.query_pairs());
        pairs
    }
}

/// Server-side balance bounds of the users list (`GET /users`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Form input rejected by [`BalanceRange::from_inputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceRangeError {
    /// A non-blank bound is not a whole number.
    NotANumber { bound: &'static str, input: String },
    /// The lower bound exceeds the upper bound.
    Reversed { min: i64, max: i64 },
}

impl fmt::Display for BalanceRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber { bound, input } => {
                write!(f, "{bound} balance `{input}` is not a whole number")
            }
            Self::Reversed { min, max } => {
                write!(f, "minimum balance {min} is above maximum balance {max}")
            }
        }
    }
}

impl std::error::Error for BalanceRangeError {}

fn parse_bound(bound: &'static str, input: &str) -> Result<Option<i64>, BalanceRangeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| BalanceRangeError::NotANumber {
            bound,
            input: input.to_owned(),
        })
}

impl BalanceRange {
    /// Parse optional numeric inputs; blank input leaves that side unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceRangeError`] for non-numeric input or a minimum above
    /// the maximum.
    pub fn from_inputs(min: &str, max: &str) -> Result<Self, BalanceRangeError> {
        let range = Self {
            min: parse_bound("minimum", min)?,
            max: parse_bound("maximum", max)?,
        };
        match (range.min, range.max) {
            (Some(min), Some(max)) if min > max => Err(BalanceRangeError::Reversed { min, max }),
            _ => Ok(range),
        }
    }

    /// Query pairs in wire naming.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(min) = self.min {
            pairs.push(("min_balance", min.to_string()));
        }
        if let Some(max) = self.max {
            pairs.push(("max_balance", max.to_string()));
        }
        pairs
    }
}
