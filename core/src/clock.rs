//! Clock capability for deterministic time handling.
//!
//! Every component that compares timestamps takes a clock at construction
//! instead of reading system time, so expiry, rotation, and window-reset
//! behavior can be driven through time-travel tests.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Source of the current instant.
///
/// Object-safe so components can hold `Arc<dyn Clock>`.
pub trait Clock: Send + Sync {
    /// Current instant according to this clock
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests and simulations.
///
/// `now()` returns the last set instant, never system time. Only moves
/// forward; advancing by a negative duration is a caller bug and panics.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Create a clock frozen at the current wall time
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Move the clock forward by a delta
    pub fn advance(&self, delta: Duration) {
        assert!(
            delta >= Duration::zero(),
            "ManualClock: delta must be non-negative"
        );
        let mut current = self.current.lock().unwrap();
        *current = *current + delta;
    }

    /// Jump the clock to a later instant
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut current = self.current.lock().unwrap();
        assert!(
            instant >= *current,
            "ManualClock: cannot go backward from {} to {}",
            *current,
            instant
        );
        *current = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_manual_clock_advance() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now(), start + Duration::seconds(90));

        clock.set(start + Duration::hours(1));
        assert_eq!(clock.now(), start + Duration::hours(1));
    }

    #[test]
    #[should_panic(expected = "cannot go backward")]
    fn test_manual_clock_backward_panics() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        clock.set(start - Duration::seconds(1));
    }
}
