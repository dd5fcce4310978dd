//! civil-calendar helpers for period boundary and due-date math
//!
//! period boundaries are always whole calendar months: a period that starts
//! mid-month still ends on the last day of its target month.

use chrono::{Datelike, NaiveDate};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// last calendar day of the given month
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    date_clamped(year, month, days_in_month(year, month))
}

/// date with the day-of-month clamped to the month length
///
/// a due day of 31 in April resolves to April 30, of 30 in February to
/// February 28/29
pub fn date_clamped(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.max(1).min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("day clamped to month length")
}

/// shift a (year, month) pair forward by whole months
pub fn add_months(year: i32, month: u32, months: u32) -> (i32, u32) {
    let zero_based = (month - 1) + months;
    (year + (zero_based / 12) as i32, zero_based % 12 + 1)
}

/// first month of the calendar quarter containing `date` (Jan/Apr/Jul/Oct)
pub fn quarter_first_month(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 * 3 + 1
}

/// first month of the half-year containing `date` (Jan or Jul)
pub fn half_year_first_month(date: NaiveDate) -> u32 {
    if date.month() <= 6 {
        1
    } else {
        7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(1900));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2025, 1), d(2025, 1, 31));
        assert_eq!(last_day_of_month(2025, 4), d(2025, 4, 30));
        assert_eq!(last_day_of_month(2024, 2), d(2024, 2, 29));
        assert_eq!(last_day_of_month(2025, 2), d(2025, 2, 28));
    }

    #[test]
    fn test_date_clamped() {
        assert_eq!(date_clamped(2025, 4, 31), d(2025, 4, 30));
        assert_eq!(date_clamped(2025, 2, 30), d(2025, 2, 28));
        assert_eq!(date_clamped(2025, 7, 15), d(2025, 7, 15));
        assert_eq!(date_clamped(2025, 7, 0), d(2025, 7, 1));
    }

    #[test]
    fn test_add_months() {
        assert_eq!(add_months(2025, 11, 3), (2026, 2));
        assert_eq!(add_months(2025, 1, 0), (2025, 1));
        assert_eq!(add_months(2025, 12, 1), (2026, 1));
        assert_eq!(add_months(2025, 6, 24), (2027, 6));
    }

    #[test]
    fn test_quarter_and_half_year() {
        assert_eq!(quarter_first_month(d(2025, 2, 15)), 1);
        assert_eq!(quarter_first_month(d(2025, 5, 1)), 4);
        assert_eq!(quarter_first_month(d(2025, 12, 31)), 10);
        assert_eq!(half_year_first_month(d(2025, 6, 30)), 1);
        assert_eq!(half_year_first_month(d(2025, 7, 1)), 7);
    }
}
