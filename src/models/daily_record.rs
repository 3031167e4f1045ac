//! Per-day attendance record model.
//!
//! A [`DailyRecord`] is the normalized result of building one [`RawDay`](super::RawDay):
//! calendar flags, parsed punches, leave classification and the derived hour
//! figures. Records are rebuilt from source input on every calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ClockTime, LeaveType};

/// Category of a non-fatal problem found while building a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// A field could not be parsed and was treated as absent.
    FieldParseDegraded,
    /// A custom leave range ended at or before its start.
    DegenerateLeaveRange,
    /// Clock-out preceded clock-in without a next-day marker.
    DegenerateClockRange,
}

/// A warning attached to a record that was still emitted.
///
/// # Example
///
/// ```
/// use worktime_engine::models::{RecordWarning, WarningCode};
///
/// let warning = RecordWarning::new(WarningCode::FieldParseDegraded, "clock_in", "unrecognised clock time 'abc'");
/// assert_eq!(warning.field, "clock_in");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordWarning {
    /// What kind of problem occurred.
    pub code: WarningCode,
    /// The input field concerned.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl RecordWarning {
    /// Creates a warning.
    pub fn new(code: WarningCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// One calendar date of attendance with its derived figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// The calendar date.
    pub date: NaiveDate,
    /// Localized weekday name.
    pub weekday: String,
    /// Clock-in punch, if present and parseable.
    pub clock_in: Option<ClockTime>,
    /// Clock-out punch, if present and parseable.
    pub clock_out: Option<ClockTime>,
    /// Whether attendance is expected on this date.
    pub is_workday: bool,
    /// Whether the date is a legal holiday.
    pub is_holiday: bool,
    /// Whether the date is a makeup workday.
    pub is_makeup_workday: bool,
    /// Classified leave.
    pub leave_type: LeaveType,
    /// Leave start, only kept for [`LeaveType::Custom`].
    pub leave_start: Option<ClockTime>,
    /// Leave end, only kept for [`LeaveType::Custom`].
    pub leave_end: Option<ClockTime>,
    /// Leave hours for the day (never negative).
    pub leave_hours: Decimal,
    /// Hours worked after meal deductions (never negative).
    pub worked_hours: Decimal,
    /// Meal time deducted from the raw span.
    pub meal_deduction: Decimal,
    /// Set when the leave hours come from an unannotated missed workday.
    pub implicit_absence: bool,
    /// Minutes late past the standard start, when the day counts as late.
    pub late_minutes: Option<i64>,
    /// Free-text remark.
    pub remark: String,
    /// Problems found while building the record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RecordWarning>,
}

impl DailyRecord {
    /// Whether either punch is present.
    pub fn has_clock_event(&self) -> bool {
        self.clock_in.is_some() || self.clock_out.is_some()
    }

    /// Whether the day carries any leave hours.
    pub fn is_leave(&self) -> bool {
        self.leave_hours > Decimal::ZERO
    }

    /// Whether any hours were worked.
    pub fn is_attended(&self) -> bool {
        self.worked_hours > Decimal::ZERO
    }

    /// Whether the day counts as late.
    pub fn is_late(&self) -> bool {
        self.late_minutes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_record() -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            weekday: "星期一".to_string(),
            clock_in: None,
            clock_out: None,
            is_workday: true,
            is_holiday: false,
            is_makeup_workday: false,
            leave_type: LeaveType::None,
            leave_start: None,
            leave_end: None,
            leave_hours: Decimal::ZERO,
            worked_hours: Decimal::ZERO,
            meal_deduction: Decimal::ZERO,
            implicit_absence: false,
            late_minutes: None,
            remark: String::new(),
            warnings: vec![],
        }
    }

    #[test]
    fn test_flags_on_blank_record() {
        let record = blank_record();
        assert!(!record.has_clock_event());
        assert!(!record.is_leave());
        assert!(!record.is_attended());
        assert!(!record.is_late());
    }

    #[test]
    fn test_single_punch_counts_as_clock_event() {
        let mut record = blank_record();
        record.clock_out = ClockTime::at(18, 0);
        assert!(record.has_clock_event());
    }

    #[test]
    fn test_serialization_skips_empty_warnings() {
        let record = blank_record();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("warnings").is_none());
        assert_eq!(json["leave_type"], "none");
        assert_eq!(json["date"], "2025-03-03");
    }

    #[test]
    fn test_warning_code_serialization() {
        let warning = RecordWarning::new(WarningCode::DegenerateLeaveRange, "leave_end", "ends before start");
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["code"], "DEGENERATE_LEAVE_RANGE");
    }
}
