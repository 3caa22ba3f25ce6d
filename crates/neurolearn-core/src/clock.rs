//! Calendar date source.
//!
//! Streak continuity and "today" statistics are date based. The date comes
//! from an injected [`Clock`] so multi-day scenarios can be replayed
//! without waiting for midnight.

use std::sync::{Arc, Mutex};

use chrono::{Days, Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Current date in the user's local time zone.
    fn today(&self) -> NaiveDate;
}

/// Reads the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to. Clones share the same date.
#[derive(Debug, Clone)]
pub struct ManualClock {
    date: Arc<Mutex<NaiveDate>>,
}

impl ManualClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Arc::new(Mutex::new(date)),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        match self.date.lock() {
            Ok(mut guard) => *guard = date,
            Err(poisoned) => *poisoned.into_inner() = date,
        }
    }

    pub fn advance_days(&self, days: u64) {
        let next = self.today() + Days::new(days);
        self.set(next);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        match self.date.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_across_month_end() {
        let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        let shared = clock.clone();
        clock.advance_days(2);
        assert_eq!(shared.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
