//! Open/closed status evaluation for the guide desk.
//!
//! The evaluator is a pure function over a point in time: callers decide
//! when to re-evaluate (the service refreshes a cached status on a fixed
//! period) and how to render the result.

mod calendar;

pub use calendar::HolidayCalendar;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Half-open `[open, close)` window in minutes of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursWindow {
    pub open: u16,
    pub close: u16,
}

impl HoursWindow {
    pub const fn from_hours(open: u16, close: u16) -> Self {
        Self {
            open: open * 60,
            close: close * 60,
        }
    }

    pub fn contains(self, minute_of_day: u16) -> bool {
        minute_of_day >= self.open && minute_of_day < self.close
    }

    fn open_hour(self) -> u16 {
        self.open / 60
    }

    fn close_hour(self) -> u16 {
        self.close / 60
    }
}

/// Operating windows per day category. Wednesday is a fixed closure day
/// independent of either window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursTable {
    pub weekday: HoursWindow,
    pub weekend: HoursWindow,
}

impl HoursTable {
    pub const fn standard() -> Self {
        Self {
            weekday: HoursWindow::from_hours(9, 18),
            weekend: HoursWindow::from_hours(10, 16),
        }
    }
}

/// Snapshot of the desk's state, recomputed fresh on every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessStatus {
    pub is_open: bool,
    pub headline: String,
    pub detail: String,
}

impl BusinessStatus {
    fn closed(detail: impl Into<String>) -> Self {
        Self {
            is_open: false,
            headline: "closed today".to_string(),
            detail: detail.into(),
        }
    }

    fn outside_hours(detail: impl Into<String>) -> Self {
        Self {
            is_open: false,
            headline: "outside hours".to_string(),
            detail: detail.into(),
        }
    }
}

/// Applies the hours table and holiday calendar to a point in time.
pub struct BusinessHoursEvaluator {
    table: HoursTable,
    calendar: HolidayCalendar,
}

impl BusinessHoursEvaluator {
    pub fn new(table: HoursTable, calendar: HolidayCalendar) -> Self {
        Self { table, calendar }
    }

    pub fn standard() -> Self {
        Self::new(HoursTable::standard(), HolidayCalendar::japan_2025())
    }

    pub fn evaluate(&self, now: NaiveDateTime) -> BusinessStatus {
        // 0 = Sunday .. 6 = Saturday
        let day = now.weekday().num_days_from_sunday();
        let minute_of_day = (now.hour() * 60 + now.minute()) as u16;

        let is_weekend = day == 0 || day == 6;
        let window = if is_weekend {
            self.table.weekend
        } else {
            self.table.weekday
        };

        let on_holiday = self.calendar.contains(now.date());
        if day == 3 || on_holiday {
            // Holiday wording wins when a holiday lands on a Wednesday.
            return if on_holiday {
                BusinessStatus::closed("holiday closure")
            } else {
                BusinessStatus::closed("Wednesday closure")
            };
        }

        if window.contains(minute_of_day) {
            return BusinessStatus {
                is_open: true,
                headline: "open".to_string(),
                detail: format!("open until {}:00", window.close_hour()),
            };
        }

        if minute_of_day < window.open {
            return BusinessStatus::outside_hours(format!(
                "opens today at {}:00",
                window.open_hour()
            ));
        }

        // Past closing. Wednesday never appears as a "next" day because it
        // is always closed; Monday and Thursday keep the generic wording.
        let detail = match day {
            6 => "next: Sunday 10:00",
            0 => "next: Monday 9:00",
            2 => "next: Thursday 9:00",
            5 => "next: Saturday 10:00",
            _ => "closed for today",
        };
        BusinessStatus::outside_hours(detail)
    }
}
