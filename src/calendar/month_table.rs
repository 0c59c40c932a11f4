/// The single year the calendar tracks.
pub const CALENDAR_YEAR: i32 = 2026;

/// Column headers, Monday first. Column `n` of a grid row is `WEEKDAY_LABELS[n]`.
pub const WEEKDAY_LABELS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDescriptor {
    pub name: &'static str,
    pub days: u32,
    /// Weekday of the 1st, 0 = Monday .. 6 = Sunday.
    pub start_day: u32,
}

const fn month(name: &'static str, days: u32, start_day: u32) -> MonthDescriptor {
    MonthDescriptor {
        name,
        days,
        start_day,
    }
}

/// Precomputed table for `CALENDAR_YEAR`.
pub const MONTHS: [MonthDescriptor; 12] = [
    month("JANUARY", 31, 3),
    month("FEBRUARY", 28, 6),
    month("MARCH", 31, 6),
    month("APRIL", 30, 2),
    month("MAY", 31, 4),
    month("JUNE", 30, 0),
    month("JULY", 31, 2),
    month("AUGUST", 31, 5),
    month("SEPTEMBER", 30, 1),
    month("OCTOBER", 31, 3),
    month("NOVEMBER", 30, 6),
    month("DECEMBER", 31, 1),
];

/// Looks up a month by zero-based index.
///
/// Panics if `month_index > 11`; every caller derives the index from the
/// table itself or from a validated `DateKey`.
pub fn descriptor_for(month_index: usize) -> &'static MonthDescriptor {
    &MONTHS[month_index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn test_offsets_chain_across_months() {
        for m in 0..11 {
            let cur = descriptor_for(m);
            let next = descriptor_for(m + 1);
            assert_eq!(
                next.start_day,
                (cur.start_day + cur.days) % 7,
                "{} -> {} offset mismatch",
                cur.name,
                next.name
            );
        }
    }

    #[test]
    fn test_table_matches_real_calendar() {
        for (i, m) in MONTHS.iter().enumerate() {
            let first = NaiveDate::from_ymd_opt(CALENDAR_YEAR, i as u32 + 1, 1).unwrap();
            assert_eq!(m.start_day, first.weekday().num_days_from_monday(), "{}", m.name);

            let last = NaiveDate::from_ymd_opt(CALENDAR_YEAR, i as u32 + 1, m.days).unwrap();
            assert!(last.succ_opt().unwrap().month() != last.month(), "{}", m.name);
        }
    }

    #[test]
    fn test_year_has_365_days() {
        let total: u32 = MONTHS.iter().map(|m| m.days).sum();
        assert_eq!(total, 365);
    }

    #[test]
    #[should_panic]
    fn test_descriptor_for_out_of_range_panics() {
        descriptor_for(12);
    }
}
