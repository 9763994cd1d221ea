//! Calendar clock
//!
//! Streaks and quest periods are computed from dates supplied by a clock, so
//! tests can pin "today" instead of reading the system time.

use chrono::{Duration, Local, NaiveDate};
use std::cell::Cell;

/// Source of the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today: Cell::new(today) }
    }

    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Move forward by whole days
    pub fn advance_days(&self, days: i64) {
        self.today.set(self.today.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_shared_clock() {
        let clock = Rc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()));
        let shared: Box<dyn Clock> = Box::new(Rc::clone(&clock));
        clock.advance_days(2);
        assert_eq!(shared.today(), NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
    }
}
