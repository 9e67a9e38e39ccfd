//! Opaque continuation token returned by cursor-paginated endpoints.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors raised when constructing a [`Cursor`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The token was empty once trimmed.
    #[error("cursor must not be empty")]
    Empty,
}

/// Opaque "continue after this position" token.
///
/// The server may encode cursors as JSON strings or numbers; both are kept in
/// their textual form and echoed back verbatim.
///
/// ## Invariants
/// - The token is never empty.
///
/// # Examples
/// ```
/// use pagination::Cursor;
///
/// let cursor = Cursor::new("42").expect("non-empty cursor");
/// assert_eq!(cursor.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Cursor(String);

impl Cursor {
    /// Validate and wrap a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Empty`] for blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self, CursorError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CursorError::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Deserialize an optional cursor, treating `null` and `""` as exhausted.
    ///
    /// Intended for `#[serde(deserialize_with = ...)]` on response envelopes.
    ///
    /// # Errors
    ///
    /// Propagates decoder errors for values that are neither strings, numbers
    /// nor `null`.
    pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<WireCursor>::deserialize(deserializer)?;
        Ok(raw.and_then(|value| Self::new(value.into_text()).ok()))
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Cursor> for String {
    fn from(value: Cursor) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = WireCursor::deserialize(deserializer)?;
        Self::new(raw.into_text()).map_err(serde::de::Error::custom)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireCursor {
    Text(String),
    Number(serde_json::Number),
}

impl WireCursor {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for cursor parsing.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Envelope {
        #[serde(default, deserialize_with = "Cursor::deserialize_optional")]
        next_cursor: Option<Cursor>,
    }

    #[rstest]
    #[case(json!({ "next_cursor": 17 }), Some("17"))]
    #[case(json!({ "next_cursor": "abc" }), Some("abc"))]
    #[case(json!({ "next_cursor": null }), None)]
    #[case(json!({ "next_cursor": "" }), None)]
    #[case(json!({}), None)]
    fn optional_cursor_accepts_strings_numbers_and_null(
        #[case] body: serde_json::Value,
        #[case] expected: Option<&str>,
    ) {
        let envelope: Envelope = serde_json::from_value(body).expect("envelope decodes");
        assert_eq!(envelope.next_cursor.as_ref().map(Cursor::as_str), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_cursors_are_rejected(#[case] raw: &str) {
        assert_eq!(Cursor::new(raw), Err(CursorError::Empty));
    }

    #[test]
    fn serializes_as_plain_string() {
        let cursor = Cursor::new("99").expect("cursor");
        assert_eq!(serde_json::to_value(&cursor).expect("encode"), json!("99"));
    }
}
