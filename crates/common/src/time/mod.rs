//! Time utilities and abstractions
//!
//! - **[`clock`]**: real and mock wall clocks for expiry checks (runtime tier)
//! - **[`duration`]**: duration parsing for configuration values
//! - **[`format`]**: `YYYY-MM-DD` date formatting and parsing

#[cfg(feature = "runtime")]
pub mod clock;
pub mod duration;
pub mod format;

#[cfg(feature = "runtime")]
pub use clock::{Clock, MockClock, SystemClock};
pub use duration::{parse_duration, DurationParseError};
pub use format::{format_date, parse_date, DATE_FORMAT};
