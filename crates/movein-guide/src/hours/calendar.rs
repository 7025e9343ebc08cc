use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Fixed set of non-business dates for one calendar year.
///
/// The calendar is supplied once at construction and never changes; a date
/// listed here closes the desk for the whole day regardless of the hours
/// table.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Japanese public holidays observed in 2025, substitute holidays
    /// included.
    pub fn japan_2025() -> Self {
        const MONTH_DAYS: [(u32, u32); 19] = [
            (1, 1),   // New Year's Day
            (1, 13),  // Coming of Age Day
            (2, 11),  // National Foundation Day
            (2, 23),  // Emperor's Birthday
            (2, 24),  // substitute
            (3, 20),  // Vernal Equinox Day
            (4, 29),  // Showa Day
            (5, 3),   // Constitution Memorial Day
            (5, 4),   // Greenery Day
            (5, 5),   // Children's Day
            (5, 6),   // substitute
            (7, 21),  // Marine Day
            (8, 11),  // Mountain Day
            (9, 15),  // Respect for the Aged Day
            (9, 23),  // Autumnal Equinox Day
            (10, 13), // Sports Day
            (11, 3),  // Culture Day
            (11, 23), // Labor Thanksgiving Day
            (11, 24), // substitute
        ];

        Self::new(MONTH_DAYS.iter().map(|&(month, day)| {
            NaiveDate::from_ymd_opt(2025, month, day).expect("valid 2025 holiday date")
        }))
    }
}
