//! Time abstraction for testability
//!
//! Provides a trait-based approach to time operations so expiry logic can be
//! exercised deterministically without relying on actual time passage.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use eka_common::time::{Clock, MockClock};
//!
//! let mock = MockClock::new();
//! let start = mock.utc_now();
//! mock.advance(Duration::from_secs(5));
//! assert_eq!((mock.utc_now() - start).num_seconds(), 5);
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Trait for time operations to enable testing
pub trait Clock: Send + Sync {
    /// Get current instant (monotonic time)
    fn now(&self) -> Instant;

    /// Get current system time (wall clock)
    fn system_time(&self) -> SystemTime;

    /// Current wall clock time as a UTC timestamp
    fn utc_now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.system_time())
    }

    /// Get milliseconds since UNIX epoch
    fn millis_since_epoch(&self) -> u64 {
        self.system_time().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }
}

/// Real system clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn system_time(&self) -> SystemTime {
        (**self).system_time()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        (**self).utc_now()
    }
}

/// Mock clock for deterministic testing
///
/// Clones share the same elapsed offset, so a clock handed to a component can
/// be advanced from the test body.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    base_system_time: SystemTime,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    /// Create a new mock clock starting at the current real time
    pub fn new() -> Self {
        Self::at(SystemTime::now())
    }

    /// Create a mock clock whose wall time starts at `base`
    pub fn at(base: SystemTime) -> Self {
        Self { start: Instant::now(), base_system_time: base, elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Create a mock clock whose wall time starts at a UTC timestamp
    pub fn at_utc(base: DateTime<Utc>) -> Self {
        Self::at(SystemTime::from(base))
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
    }

    /// Set the total elapsed time since the clock's start
    pub fn set_elapsed(&self, duration: Duration) {
        *self.elapsed.lock() = duration;
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    fn system_time(&self) -> SystemTime {
        self.base_system_time + self.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    /// Validates `MockClock::advance` behavior for the mock clock advance
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms monotonic and wall time both move by the advanced amount.
    #[test]
    fn test_mock_clock_advance() {
        let clock = MockClock::new();
        let instant = clock.now();
        let wall = clock.utc_now();

        clock.advance(Duration::from_secs(90));

        assert_eq!(clock.now().duration_since(instant), Duration::from_secs(90));
        assert_eq!((clock.utc_now() - wall).num_seconds(), 90);
    }

    /// Validates `MockClock::at_utc` behavior for the fixed start scenario.
    ///
    /// Assertions:
    /// - Confirms the clock reports the configured start time.
    /// - Confirms clones share the elapsed offset.
    #[test]
    fn test_mock_clock_fixed_start_and_shared_clones() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = MockClock::at_utc(start);
        let handle = clock.clone();

        assert_eq!(clock.utc_now(), start);
        handle.set_elapsed(Duration::from_secs(60));
        assert_eq!((clock.utc_now() - start).num_seconds(), 60);
    }

    /// Validates `Clock` for `Arc<dyn Clock>` behavior.
    ///
    /// Assertions:
    /// - Confirms trait objects behind `Arc` delegate to the inner clock.
    #[test]
    fn test_arc_dyn_clock_delegates() {
        let mock = MockClock::new();
        let clock: Arc<dyn Clock> = Arc::new(mock.clone());
        let before = clock.utc_now();

        mock.advance(Duration::from_secs(5));

        assert_eq!((clock.utc_now() - before).num_seconds(), 5);
        assert!(SystemClock.millis_since_epoch() > 0);
    }
}
