//! Calendar dates as typed in forms and as sent to the API.
//!
//! Forms use ISO `yyyy-mm-dd`; the API expects `dd/mm/yyyy` in query strings.

use std::fmt;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use mockable::Clock;
use serde::{Deserialize, Deserializer};

const UI_FORMAT: &str = "%Y-%m-%d";
const WIRE_FORMAT: &str = "%d/%m/%Y";

/// Validation errors for date inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input is not a calendar date in the expected format.
    Invalid { input: String },
    /// End date lies after tomorrow.
    EndInFuture { end: NaiveDate, latest: NaiveDate },
    /// Start date lies after the end date.
    Reversed { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { input } => write!(f, "`{input}` is not a valid date"),
            Self::EndInFuture { end, latest } => {
                write!(f, "end date {end} is after the latest allowed {latest}")
            }
            Self::Reversed { start, end } => {
                write!(f, "start date {start} is after end date {end}")
            }
        }
    }
}

impl std::error::Error for DateError {}

/// Parse a form date (`yyyy-mm-dd`).
pub fn parse_ui_date(input: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(input.trim(), UI_FORMAT).map_err(|_| DateError::Invalid {
        input: input.to_owned(),
    })
}

/// Parse a wire date (`dd/mm/yyyy`).
pub fn parse_wire_date(input: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(input.trim(), WIRE_FORMAT).map_err(|_| DateError::Invalid {
        input: input.to_owned(),
    })
}

/// Render a date for a form field.
pub fn to_ui_date(date: NaiveDate) -> String {
    date.format(UI_FORMAT).to_string()
}

/// Render a date for an API query string.
///
/// # Examples
/// ```
/// use localpay_client::domain::date::{parse_ui_date, to_wire_date};
///
/// let date = parse_ui_date("2024-03-05").expect("valid date");
/// assert_eq!(to_wire_date(date), "05/03/2024");
/// ```
pub fn to_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_FORMAT).to_string()
}

/// Today's date on the local calendar.
pub fn today(clock: &dyn Clock) -> NaiveDate {
    clock.local().date_naive()
}

/// Optional inclusive date range used by payment filters and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range, refusing end dates after tomorrow and reversed bounds.
    pub fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, DateError> {
        if let Some(end) = end {
            let latest = today.checked_add_days(Days::new(1)).unwrap_or(today);
            if end > latest {
                return Err(DateError::EndInFuture { end, latest });
            }
        }
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(DateError::Reversed { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// Parse optional form inputs; blank inputs mean "unbounded".
    pub fn from_ui(start: &str, end: &str, today: NaiveDate) -> Result<Self, DateError> {
        let parse = |raw: &str| {
            if raw.trim().is_empty() {
                Ok(None)
            } else {
                parse_ui_date(raw).map(Some)
            }
        };
        Self::new(parse(start)?, parse(end)?, today)
    }

    /// Lower bound.
    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Upper bound.
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// `(start_date, end_date)` query pairs in wire format.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(start) = self.start {
            pairs.push(("start_date", to_wire_date(start)));
        }
        if let Some(end) = self.end {
            pairs.push(("end_date", to_wire_date(end)));
        }
        pairs
    }
}

/// Accept RFC 3339 timestamps or naive ISO timestamps as served by the API.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.naive_utc())
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok())
}

pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
}

pub(crate) fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`"))),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for date conversion and range rules.
    use super::*;
    use chrono::Datelike;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("calendar date")
    }

    #[rstest]
    fn converts_between_ui_and_wire() {
        let parsed = parse_ui_date("2024-03-05").expect("ui date");
        assert_eq!(to_wire_date(parsed), "05/03/2024");
        assert_eq!(parse_wire_date("05/03/2024"), Ok(parsed));
    }

    #[rstest]
    fn every_day_of_a_leap_year_round_trips() {
        let mut day = date(2024, 1, 1);
        while day.year() == 2024 {
            let wire = to_wire_date(parse_ui_date(&to_ui_date(day)).expect("ui"));
            assert_eq!(parse_wire_date(&wire).expect("wire"), day);
            day = day.succ_opt().expect("next day");
        }
    }

    #[rstest]
    #[case("2023-02-29")]
    #[case("2024-13-01")]
    #[case("05/03/2024")]
    #[case("")]
    fn invalid_ui_dates_are_rejected(#[case] input: &str) {
        assert!(matches!(parse_ui_date(input), Err(DateError::Invalid { .. })));
    }

    #[rstest]
    #[case(date(2024, 6, 11), true)]
    #[case(date(2024, 6, 12), true)]
    #[case(date(2024, 6, 13), false)]
    fn end_date_may_be_at_most_tomorrow(#[case] end: NaiveDate, #[case] accepted: bool) {
        let today = date(2024, 6, 11);
        let result = DateRange::new(None, Some(end), today);
        assert_eq!(result.is_ok(), accepted, "{result:?}");
    }

    #[rstest]
    fn reversed_range_is_refused() {
        let err = DateRange::new(Some(date(2024, 6, 10)), Some(date(2024, 6, 1)), date(2024, 6, 11))
            .expect_err("reversed");
        assert!(matches!(err, DateError::Reversed { .. }));
    }

    #[rstest]
    fn blank_inputs_are_unbounded_and_emit_no_pairs() {
        let range = DateRange::from_ui("", "  ", date(2024, 6, 11)).expect("range");
        assert!(range.query_pairs().is_empty());

        let range = DateRange::from_ui("2024-06-01", "2024-06-10", date(2024, 6, 11)).expect("range");
        assert_eq!(
            range.query_pairs(),
            vec![
                ("start_date", "01/06/2024".to_owned()),
                ("end_date", "10/06/2024".to_owned()),
            ]
        );
    }

    #[rstest]
    #[case("2024-03-05T10:15:00")]
    #[case("2024-03-05T10:15:00.123456")]
    #[case("2024-03-05T10:15:00Z")]
    #[case("2024-03-05T16:15:00+06:00")]
    fn timestamps_accept_naive_and_offset_forms(#[case] raw: &str) {
        let parsed = parse_timestamp(raw).expect("timestamp");
        assert_eq!(parsed.date(), date(2024, 3, 5));
    }
}
