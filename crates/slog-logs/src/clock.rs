//! Time source for elapsed-time tags

use slog_core::Result;
use std::time::{Duration, Instant};

/// Source of timestamps with microsecond resolution.
///
/// Only differences between readings are ever written, so the origin is
/// up to the implementation.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<Duration>;
}

/// Monotonic clock anchored when it is created.
///
/// Readings do not follow wall-clock adjustments, so elapsed tags stay
/// independent of the time of day.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Result<Duration> {
        Ok(truncate_to_micros(self.origin.elapsed()))
    }
}

/// Drop sub-microsecond precision
pub fn truncate_to_micros(d: Duration) -> Duration {
    Duration::new(d.as_secs(), d.subsec_micros() * 1_000)
}

/// Render an elapsed time as `<secs>.<micros>` (micros are not zero-padded)
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{}.{}", elapsed.as_secs(), elapsed.subsec_micros())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        let a = clock.now().unwrap();
        // Anchored at creation, not at the epoch
        assert!(a < Duration::from_secs(1));
        std::thread::sleep(Duration::from_millis(2));
        let b = clock.now().unwrap();
        assert!(b > a);
        assert_eq!(a.subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_format_elapsed_unpadded() {
        assert_eq!(format_elapsed(Duration::ZERO), "0.0");
        assert_eq!(format_elapsed(Duration::from_micros(5)), "0.5");
        assert_eq!(format_elapsed(Duration::from_micros(3_000_042)), "3.42");
        assert_eq!(format_elapsed(Duration::new(12, 999_999_000)), "12.999999");
    }

    #[test]
    fn test_truncate_to_micros() {
        let d = Duration::new(1, 123_456_789);
        assert_eq!(truncate_to_micros(d), Duration::new(1, 123_456_000));
    }
}
