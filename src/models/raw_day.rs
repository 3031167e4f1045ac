//! Normalized per-day input rows as delivered by an attendance source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parses a row date written as `yyyy-MM-dd` or `yyyy/MM/dd`.
///
/// # Example
///
/// ```
/// use worktime_engine::models::parse_row_date;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// assert_eq!(parse_row_date("2025-03-04"), Some(date));
/// assert_eq!(parse_row_date(" 2025/03/04 "), Some(date));
/// assert_eq!(parse_row_date("March 4th"), None);
/// ```
pub fn parse_row_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// One row of attendance input, every field still in string form.
///
/// Field order is the column contract with CSV sources:
/// `date, weekday, clock_in, clock_out, leave_type, leave_start, leave_end, remark`.
/// Missing columns deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDay {
    /// Date in `yyyy-MM-dd` form.
    pub date: String,
    /// Weekday label; informational only, recomputed from `date`.
    pub weekday: String,
    /// Clock-in punch (`H:mm`).
    pub clock_in: String,
    /// Clock-out punch (`H:mm`, optionally with a next-day marker).
    pub clock_out: String,
    /// Free-text leave annotation.
    pub leave_type: String,
    /// Explicit leave start (`H:mm`).
    pub leave_start: String,
    /// Explicit leave end (`H:mm`).
    pub leave_end: String,
    /// Free-text remark.
    pub remark: String,
}

impl RawDay {
    /// A row with only the date filled in.
    pub fn for_date(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    /// The row's date, if it parses.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_row_date(&self.date)
    }

    /// Sets the clock punches.
    pub fn with_clock(mut self, clock_in: &str, clock_out: &str) -> Self {
        self.clock_in = clock_in.to_string();
        self.clock_out = clock_out.to_string();
        self
    }

    /// Sets the leave annotation.
    pub fn with_leave(mut self, annotation: &str) -> Self {
        self.leave_type = annotation.to_string();
        self
    }

    /// Sets an explicit leave range.
    pub fn with_leave_range(mut self, start: &str, end: &str) -> Self {
        self.leave_start = start.to_string();
        self.leave_end = end.to_string();
        self
    }

    /// Sets the remark.
    pub fn with_remark(mut self, remark: &str) -> Self {
        self.remark = remark.to_string();
        self
    }
}
