//! Duration parsing from strings
//!
//! Accepts compound unit strings such as `"1m 30s"` or `"250ms"`, and bare
//! numbers interpreted as whole seconds.

use std::time::Duration;

use thiserror::Error;

/// Error type for duration parsing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DurationParseError {
    #[error("Invalid duration format: {0}")]
    InvalidFormat(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Empty duration string")]
    EmptyString,
}

/// Parse a duration string into a Duration
///
/// Supported units: `ms`, `s`, `m`, `h`. A string made only of digits is
/// taken as seconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use eka_common::time::parse_duration;
///
/// assert_eq!(parse_duration("30").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("1m 30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, DurationParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DurationParseError::EmptyString);
    }

    if s.chars().all(|ch| ch.is_ascii_digit()) {
        let secs: u64 = s.parse().map_err(|_| DurationParseError::InvalidNumber(s.to_string()))?;
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut current_number = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_ascii_digit() || ch == '.' {
            current_number.push(ch);
            continue;
        }
        if ch.is_whitespace() {
            continue;
        }

        if current_number.is_empty() {
            return Err(DurationParseError::InvalidFormat(
                "Expected number before unit".to_string(),
            ));
        }

        let value: f64 = current_number
            .parse()
            .map_err(|_| DurationParseError::InvalidNumber(current_number.clone()))?;

        let seconds = match ch {
            'm' if chars.peek() == Some(&'s') => {
                chars.next();
                value / 1000.0
            }
            's' => value,
            'm' => value * 60.0,
            'h' => value * 3600.0,
            other => return Err(DurationParseError::UnknownUnit(other.to_string())),
        };

        total += Duration::try_from_secs_f64(seconds)
            .map_err(|_| DurationParseError::InvalidNumber(current_number.clone()))?;
        current_number.clear();
    }

    if !current_number.is_empty() {
        return Err(DurationParseError::InvalidFormat("Missing unit after number".to_string()));
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates `parse_duration` behavior for the supported unit scenarios.
    ///
    /// Assertions:
    /// - Confirms bare numbers, single units and compound strings parse.
    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("45").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("1s 500ms").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
    }

    /// Validates `parse_duration` behavior for the malformed input scenario.
    ///
    /// Assertions:
    /// - Ensures empty, unit-less fractional and unknown-unit strings fail.
    #[test]
    fn test_parse_duration_rejects_malformed() {
        assert_eq!(parse_duration("  "), Err(DurationParseError::EmptyString));
        assert!(matches!(parse_duration("1.5"), Err(DurationParseError::InvalidFormat(_))));
        assert!(matches!(parse_duration("3d"), Err(DurationParseError::UnknownUnit(_))));
        assert!(matches!(parse_duration("s"), Err(DurationParseError::InvalidFormat(_))));
    }
}
