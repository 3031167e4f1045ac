//! Workday classification.
//!
//! This module decides whether a date is a workday given a [`HolidayCalendar`].
//! The rule is evaluated on every call; nothing is cached, so calendar
//! mutations take effect immediately.

use chrono::{Datelike, NaiveDate, Weekday};

use super::HolidayCalendar;

/// Determines whether a date is a workday.
///
/// A date is a workday when it is Monday to Friday and not a legal holiday,
/// or when it is a makeup workday. A makeup entry wins over a holiday entry
/// for the same date.
///
/// # Example
///
/// ```
/// use worktime_engine::calendar::{HolidayCalendar, is_workday};
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::new();
/// // 2025-10-11 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2025, 10, 11).unwrap();
/// assert!(!is_workday(saturday, &calendar));
///
/// calendar.add_makeup_workday(saturday);
/// assert!(is_workday(saturday, &calendar));
/// ```
pub fn is_workday(date: NaiveDate, calendar: &HolidayCalendar) -> bool {
    let weekday = !matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
    (weekday && !calendar.is_holiday(date)) || calendar.is_makeup_workday(date)
}

/// Localized weekday name (星期一 .. 星期日).
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "星期一",
        Weekday::Tue => "星期二",
        Weekday::Wed => "星期三",
        Weekday::Thu => "星期四",
        Weekday::Fri => "星期五",
        Weekday::Sat => "星期六",
        Weekday::Sun => "星期日",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_plain_weekdays_are_workdays() {
        let calendar = HolidayCalendar::new();
        // 2025-03-03 is a Monday
        for offset in 0..5 {
            let date = make_date("2025-03-03") + chrono::Duration::days(offset);
            assert!(is_workday(date, &calendar), "{} should be a workday", date);
        }
    }

    #[test]
    fn test_weekends_are_not_workdays() {
        let calendar = HolidayCalendar::new();
        assert!(!is_workday(make_date("2025-03-08"), &calendar));
        assert!(!is_workday(make_date("2025-03-09"), &calendar));
    }

    #[test]
    fn test_saturday_makeup_workday_is_workday() {
        let calendar = HolidayCalendar::new();
        let saturday = make_date("2025-10-11");
        calendar.add_makeup_workday(saturday);
        assert!(is_workday(saturday, &calendar));
    }

    #[test]
    fn test_tuesday_holiday_is_not_workday() {
        let calendar = HolidayCalendar::new();
        let tuesday = make_date("2025-09-30");
        calendar.add_holiday(tuesday);
        assert!(!is_workday(tuesday, &calendar));
    }

    #[test]
    fn test_makeup_wins_over_holiday() {
        let calendar = HolidayCalendar::new();
        let sunday = make_date("2025-09-28");
        calendar.add_holiday(sunday);
        calendar.add_makeup_workday(sunday);
        assert!(is_workday(sunday, &calendar));
    }

    #[test]
    fn test_reflects_calendar_mutation_immediately() {
        let calendar = HolidayCalendar::new();
        let date = make_date("2025-03-05");
        assert!(is_workday(date, &calendar));
        calendar.add_holiday(date);
        assert!(!is_workday(date, &calendar));
        calendar.remove_holiday(date);
        assert!(is_workday(date, &calendar));
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Mon), "星期一");
        assert_eq!(weekday_name(Weekday::Sun), "星期日");
    }
}
