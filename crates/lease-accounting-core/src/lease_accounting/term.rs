use chrono::{Datelike, Months, NaiveDate};

use crate::error::LeaseAccountingError;
use crate::LeaseResult;

/// Whole-month difference between two dates, ignoring the day of month.
///
/// Same-month leases resolve to 0 and reversed dates go negative; rejecting
/// those is left to the stages that need a positive term.
pub fn term_in_months(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}

/// Date of a 1-based schedule month: the start date advanced by `month - 1`
/// calendar months. Days past the end of a shorter month clamp to its last day.
pub fn schedule_date(start: NaiveDate, month: u32) -> LeaseResult<NaiveDate> {
    start
        .checked_add_months(Months::new(month.saturating_sub(1)))
        .ok_or_else(|| {
            LeaseAccountingError::DateError(format!(
                "Schedule month {month} from {start} is outside the supported calendar"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_term_ignores_day_of_month() {
        assert_eq!(term_in_months(date(2024, 1, 1), date(2026, 12, 31)), 35);
        assert_eq!(term_in_months(date(2024, 1, 31), date(2024, 2, 1)), 1);
    }

    #[test]
    fn test_term_whole_years() {
        assert_eq!(term_in_months(date(2024, 3, 15), date(2027, 3, 15)), 36);
    }

    #[test]
    fn test_term_same_month_is_zero() {
        assert_eq!(term_in_months(date(2024, 5, 1), date(2024, 5, 31)), 0);
    }

    #[test]
    fn test_term_reversed_dates_negative() {
        assert_eq!(term_in_months(date(2025, 1, 1), date(2024, 11, 1)), -2);
    }

    #[test]
    fn test_schedule_date_first_month_is_start() {
        assert_eq!(schedule_date(date(2024, 1, 15), 1).unwrap(), date(2024, 1, 15));
        assert_eq!(schedule_date(date(2024, 1, 15), 13).unwrap(), date(2025, 1, 15));
    }

    #[test]
    fn test_schedule_date_clamps_to_month_end() {
        assert_eq!(schedule_date(date(2024, 1, 31), 2).unwrap(), date(2024, 2, 29));
        assert_eq!(schedule_date(date(2024, 1, 31), 3).unwrap(), date(2024, 3, 31));
    }
}
