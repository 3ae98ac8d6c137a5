//! Injected wall clock.
//!
//! Date-range presets ("last 24 hours", "last 7 days", ...) depend on the
//! current date; routing that through a trait keeps the preset arithmetic
//! testable against a fixed date.

use chrono::{Local, NaiveDate};

/// Source of "today" for date-range presets and form defaults.
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

/// Production clock reading the local system date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Clock pinned to a fixed date.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock(pub NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }
}
