//! Source of "now" for every temporal rule in the booking core.
//!
//! Services hold an `Arc<dyn Clock>` instead of reading the wall clock
//! directly, so tests can pin time to a fixed instant.

use chrono::{Local, NaiveDateTime, Timelike};

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time, truncated to whole seconds to match stored timestamps
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// A clock that always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
