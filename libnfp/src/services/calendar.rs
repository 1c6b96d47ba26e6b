// libnfp/src/services/calendar.rs

use chrono::Datelike;
use parking_lot::Mutex;

use crate::types::CalendarDate;

/// Console calendar: "what day is it".
pub trait Calendar: Send + Sync {
    /// Current local date.
    fn today(&self) -> CalendarDate;
}

/// Host local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCalendar;

impl Calendar for SystemCalendar {
    fn today(&self) -> CalendarDate {
        let now = chrono::Local::now();
        match u16::try_from(now.year()) {
            Ok(year) => CalendarDate::new(year, now.month() as u8, now.day() as u8),
            Err(_) => CalendarDate::default(),
        }
    }
}

/// Calendar pinned to a settable day.
#[derive(Debug)]
pub struct FixedCalendar {
    date: Mutex<CalendarDate>,
}

impl FixedCalendar {
    /// Calendar stuck on `date`.
    pub fn new(date: CalendarDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    /// Move to another day.
    pub fn set(&self, date: CalendarDate) {
        *self.date.lock() = date;
    }
}

impl Calendar for FixedCalendar {
    fn today(&self) -> CalendarDate {
        *self.date.lock()
    }
}
