use crate::calendar::month_table::{CALENDAR_YEAR, MONTHS, descriptor_for};
use crate::error::MoodError;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Identifies one day of the calendar year. Textual form is `{year}-{month}-{day}`
/// with unpadded month and day, e.g. `2026-3-7`; that string is the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    year: i32,
    month: u32,
    day: u32,
}

impl DateKey {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, MoodError> {
        let valid = year == CALENDAR_YEAR
            && (1..=12).contains(&month)
            && day >= 1
            && day <= descriptor_for(month as usize - 1).days;
        if valid {
            Ok(DateKey { year, month, day })
        } else {
            Err(MoodError::InvalidDateKey(format!("{year}-{month}-{day}")))
        }
    }

    /// Key for day `day` of zero-based month `month_index`.
    pub fn from_month_index(month_index: usize, day: u32) -> Result<Self, MoodError> {
        Self::new(CALENDAR_YEAR, month_index as u32 + 1, day)
    }

    pub fn first() -> Self {
        DateKey {
            year: CALENDAR_YEAR,
            month: 1,
            day: 1,
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month_index(&self) -> usize {
        self.month as usize - 1
    }

    pub fn to_naive_date(&self) -> NaiveDate {
        // Construction is validated against the month table, which agrees with
        // the Gregorian calendar for CALENDAR_YEAR.
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or_default()
    }

    /// Moves by `days` (may be negative). Returns None past either end of the year.
    pub fn offset(&self, days: i64) -> Option<Self> {
        let moved = self
            .to_naive_date()
            .checked_add_signed(chrono::Duration::days(days))?;
        Self::new(moved.year(), moved.month(), moved.day()).ok()
    }

    /// "March 7, 2026"
    pub fn long_label(&self) -> String {
        self.to_naive_date().format("%B %-d, %Y").to_string()
    }

    /// "3/7/2026"
    pub fn short_label(&self) -> String {
        self.to_naive_date().format("%-m/%-d/%Y").to_string()
    }

    /// Every key of the year, in calendar order.
    pub fn all() -> impl Iterator<Item = DateKey> {
        MONTHS.iter().enumerate().flat_map(|(i, m)| {
            (1..=m.days).map(move |day| DateKey {
                year: CALENDAR_YEAR,
                month: i as u32 + 1,
                day,
            })
        })
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

impl FromStr for DateKey {
    type Err = MoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoodError::InvalidDateKey(s.to_string());
        let mut parts = s.split('-');
        let (Some(y), Some(m), Some(d), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let year = y.parse::<i32>().map_err(|_| invalid())?;
        let month = m.parse::<u32>().map_err(|_| invalid())?;
        let day = d.parse::<u32>().map_err(|_| invalid())?;
        let key = Self::new(year, month, day).map_err(|_| invalid())?;
        // Only the canonical unpadded form is a valid storage key.
        if key.to_string() != s {
            return Err(invalid());
        }
        Ok(key)
    }
}
