//! Request types for the Worktime Engine API.
//!
//! This module defines the query and JSON body structures accepted by the
//! `/api/workhours` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::WorkHoursConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{ClockTime, LeaveType, YearMonth};
use crate::source::AttendanceSubmission;

/// Query string selecting a month.
///
/// Accepts both `yearMonth` and `year_month`. When absent the current month
/// is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthQuery {
    /// Month in `YYYY-MM` form.
    #[serde(default, rename = "yearMonth", alias = "year_month")]
    pub year_month: Option<String>,
}

impl MonthQuery {
    /// Resolves the requested month, falling back to the month of `today`.
    pub fn resolve(&self, today: NaiveDate) -> EngineResult<YearMonth> {
        match self.year_month.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.parse(),
            _ => Ok(YearMonth::of(today)),
        }
    }
}

/// Request body for `POST /attendance/submit`.
///
/// Only fields that are present and non-blank change the stored row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSubmitRequest {
    /// The day to update (`yyyy-MM-dd`).
    pub date: NaiveDate,
    /// Clock-in punch (`HH:mm`).
    #[serde(default, alias = "clockIn")]
    pub start_time: Option<String>,
    /// Clock-out punch (`HH:mm`, optionally with a next-day marker).
    #[serde(default, alias = "clockOut")]
    pub end_time: Option<String>,
    /// Leave classification.
    #[serde(default)]
    pub leave_type: Option<LeaveType>,
    /// Custom leave start (`HH:mm`).
    #[serde(default, alias = "leaveStart")]
    pub leave_start_time: Option<String>,
    /// Custom leave end (`HH:mm`).
    #[serde(default, alias = "leaveEnd")]
    pub leave_end_time: Option<String>,
    /// Free-text remark.
    #[serde(default)]
    pub remark: Option<String>,
}

impl AttendanceSubmitRequest {
    /// Checks that every supplied punch parses as a clock time.
    pub fn validate(&self) -> EngineResult<()> {
        let times = [
            ("startTime", &self.start_time),
            ("endTime", &self.end_time),
            ("leaveStartTime", &self.leave_start_time),
            ("leaveEndTime", &self.leave_end_time),
        ];
        for (field, value) in times {
            let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };
            if let Err(e) = value.parse::<ClockTime>() {
                return Err(EngineError::InvalidRequest {
                    field: field.to_string(),
                    message: e.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl From<AttendanceSubmitRequest> for AttendanceSubmission {
    fn from(req: AttendanceSubmitRequest) -> Self {
        AttendanceSubmission {
            date: req.date,
            clock_in: req.start_time,
            clock_out: req.end_time,
            leave_type: req.leave_type,
            leave_start: req.leave_start_time,
            leave_end: req.leave_end_time,
            remark: req.remark,
        }
    }
}

/// Request body for `PUT /config`.
///
/// Keys match `workhours.yaml`. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigUpdateRequest {
    /// Monthly target in hours.
    #[serde(default)]
    pub expected_total_hours: Option<Decimal>,
    /// Standard start hour.
    #[serde(default)]
    pub standard_start_hour: Option<u32>,
    /// Standard end hour.
    #[serde(default)]
    pub standard_end_hour: Option<u32>,
    /// Lunch deduction threshold hour.
    #[serde(default)]
    pub lunch_threshold_hour: Option<u32>,
    /// Dinner deduction threshold hour.
    #[serde(default)]
    pub dinner_break_threshold_hour: Option<u32>,
    /// Lunch break length in hours.
    #[serde(default)]
    pub lunch_break_hours: Option<Decimal>,
    /// Dinner break length in hours.
    #[serde(default)]
    pub dinner_break_hours: Option<Decimal>,
    /// Late-night clock-out hour.
    #[serde(default)]
    pub late_night_hour: Option<u32>,
    /// Lateness cutoff hour.
    #[serde(default)]
    pub late_cutoff_hour: Option<u32>,
    /// Half-day leave hours.
    #[serde(default)]
    pub half_day_leave_hours: Option<Decimal>,
    /// Full-day leave hours.
    #[serde(default)]
    pub full_day_leave_hours: Option<Decimal>,
    /// Implicit absence switch.
    #[serde(default)]
    pub implicit_absence_enabled: Option<bool>,
}

impl ConfigUpdateRequest {
    /// Returns `current` with the supplied fields replaced, validated.
    pub fn apply(&self, current: &WorkHoursConfig) -> EngineResult<WorkHoursConfig> {
        let mut updated = current.clone();

        if let Some(value) = self.expected_total_hours {
            updated.expected_total_hours = value;
        }
        if let Some(value) = self.standard_start_hour {
            updated.standard_start_hour = value;
        }
        if let Some(value) = self.standard_end_hour {
            updated.standard_end_hour = value;
        }
        if let Some(value) = self.lunch_threshold_hour {
            updated.lunch_threshold_hour = value;
        }
        if let Some(value) = self.dinner_break_threshold_hour {
            updated.dinner_break_threshold_hour = value;
        }
        if let Some(value) = self.lunch_break_hours {
            updated.lunch_break_hours = value;
        }
        if let Some(value) = self.dinner_break_hours {
            updated.dinner_break_hours = value;
        }
        if let Some(value) = self.late_night_hour {
            updated.late_night_hour = value;
        }
        if let Some(value) = self.late_cutoff_hour {
            updated.late_cutoff_hour = value;
        }
        if let Some(value) = self.half_day_leave_hours {
            updated.half_day_leave_hours = value;
        }
        if let Some(value) = self.full_day_leave_hours {
            updated.full_day_leave_hours = value;
        }
        if let Some(value) = self.implicit_absence_enabled {
            updated.implicit_absence_enabled = value;
        }

        updated.validate()?;
        Ok(updated)
    }
}

/// Request body for `POST /holidays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayRequest {
    /// The date to add.
    pub date: NaiveDate,
    /// Add as a makeup workday instead of a holiday.
    #[serde(default)]
    pub makeup_workday: bool,
}
