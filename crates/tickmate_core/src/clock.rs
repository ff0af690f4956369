//! Injected clock collaborator.
//!
//! # Responsibility
//! - Supply the reference instant for day-offset computation.
//! - Supply epoch-millisecond stamps for tick mutations.
//!
//! # Invariants
//! - The engine never reads wall-clock time through a global; every caller
//!   owns which clock a service instance uses.

use chrono::{Local, NaiveDateTime};

/// Source of "now" for offset computation and `modified` stamps.
pub trait Clock {
    /// Current local wall-clock instant.
    fn now(&self) -> NaiveDateTime;

    /// Current instant as epoch milliseconds, for `Tick::modified`.
    fn now_epoch_ms(&self) -> i64 {
        self.now().and_utc().timestamp_millis()
    }
}

/// Production clock reading the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Deterministic clock pinned to one instant, for tests and replay.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }

    /// Moves the pinned instant, e.g. to simulate day rollover in tests.
    pub fn set(&mut self, instant: NaiveDateTime) {
        self.instant = instant;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use chrono::NaiveDate;

    #[test]
    fn fixed_clock_reports_pinned_instant() {
        let instant = NaiveDate::from_ymd_opt(2024, 5, 20)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let mut clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);

        let later = instant + chrono::Duration::hours(5);
        clock.set(later);
        assert_eq!(clock.now(), later);
    }

    #[test]
    fn epoch_ms_matches_instant() {
        let instant = NaiveDate::from_ymd_opt(2024, 5, 20)
            .unwrap()
            .and_hms_opt(0, 0, 1)
            .unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now_epoch_ms(), instant.and_utc().timestamp_millis());
    }
}
