//! # Clock
//!
//! The injectable time source.
//!
//! The core never reads the wall clock: expiry checks and future-date
//! validation receive "now"/"today" as arguments, and the service resolves
//! them through this seam. Tests pin a [`FixedClock`] and every
//! time-dependent path becomes deterministic.

use chrono::{DateTime, NaiveDate, Utc};

/// A source of "current time".
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date (UTC), for expiry checks.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Production clock: reads the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock: always returns the instant it was pinned to.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_is_deterministic() {
        let instant = Utc.with_ymd_and_hms(2026, 8, 29, 10, 0, 0).unwrap();
        let clock = FixedClock(instant);

        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
        );
    }
}
