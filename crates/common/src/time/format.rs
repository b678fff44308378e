//! Calendar date formatting for wire payloads
//!
//! Remote APIs exchange dates as zero-padded `YYYY-MM-DD` strings.

use chrono::NaiveDate;

use crate::validation::{ValidationError, ValidationResult};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as zero-padded `YYYY-MM-DD`
///
/// No calendar validation is performed; the components are rendered as given.
///
/// # Examples
///
/// ```
/// use eka_common::time::format_date;
///
/// assert_eq!(format_date(1990, 4, 7), "1990-04-07");
/// ```
pub fn format_date(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// Parse a `YYYY-MM-DD` string into a calendar date
///
/// # Errors
///
/// Returns a [`ValidationError`] on the `date` field when the input is not a
/// real calendar date in that format.
pub fn parse_date(value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| {
        ValidationError::field("date", format!("expected YYYY-MM-DD, got {value:?}: {err}"))
    })
}
