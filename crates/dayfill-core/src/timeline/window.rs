//! Workday window: where a day's nominal scheduling bounds lie.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Configured start time and capacity of a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkdayWindow {
    /// Local time the workday starts
    pub start: NaiveTime,
    /// Length of the workday (minutes)
    pub minutes: i64,
}

impl WorkdayWindow {
    pub fn new(start: NaiveTime, minutes: i64) -> Self {
        Self { start, minutes }
    }

    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start)
    }

    /// Nominal end of the workday. May fall on the next calendar day.
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        self.start_on(date) + Duration::minutes(self.minutes)
    }

    pub fn bounds(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (self.start_on(date), self.end_on(date))
    }
}

impl Default for WorkdayWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            minutes: 720,
        }
    }
}
