//! Time source abstraction.
//!
//! Every "now" comparison in the core (check-in validation, cancellation
//! cut-off, current/past partitioning, room deletion guard) goes through an
//! injected [`Clock`], so tests can pin the calendar.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date. All booking-date comparisons are date-only.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed time, for deterministic tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }

    /// Fix the clock to midnight UTC on the given date.
    pub fn at(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
