//! Configuration types for work-hour calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::LeaveLabel;

/// Tunable parameters of the work-hour rules.
///
/// Every field has a default, so a partial `workhours.yaml` is valid.
///
/// # Example
///
/// ```
/// use worktime_engine::config::WorkHoursConfig;
/// use rust_decimal::Decimal;
///
/// let config: WorkHoursConfig = serde_yaml::from_str("expected_total_hours: 200").unwrap();
/// assert_eq!(config.expected_total_hours, Decimal::from(200));
/// assert_eq!(config.dinner_break_threshold_hour, 19);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkHoursConfig {
    /// Directory holding the monthly attendance files.
    pub data_directory: String,
    /// Monthly target in hours.
    pub expected_total_hours: Decimal,
    /// Standard start of the working day (hour).
    pub standard_start_hour: u32,
    /// Standard end of the working day (hour).
    pub standard_end_hour: u32,
    /// Clock-outs at or after this hour deduct lunch.
    pub lunch_threshold_hour: u32,
    /// Clock-outs at or after this hour also deduct dinner.
    pub dinner_break_threshold_hour: u32,
    /// Hours deducted for lunch.
    pub lunch_break_hours: Decimal,
    /// Hours deducted for dinner.
    pub dinner_break_hours: Decimal,
    /// Clock-outs strictly after this hour count as late-night.
    pub late_night_hour: u32,
    /// Clock-ins at or after this hour are not counted as late.
    pub late_cutoff_hour: u32,
    /// Leave hours for a morning or afternoon off.
    pub half_day_leave_hours: Decimal,
    /// Leave hours for a full day off.
    pub full_day_leave_hours: Decimal,
    /// Whether past workdays with no punches and no leave count as full-day absence.
    pub implicit_absence_enabled: bool,
}

impl Default for WorkHoursConfig {
    fn default() -> Self {
        Self {
            data_directory: "data".to_string(),
            expected_total_hours: Decimal::from(220),
            standard_start_hour: 9,
            standard_end_hour: 18,
            lunch_threshold_hour: 12,
            dinner_break_threshold_hour: 19,
            lunch_break_hours: Decimal::ONE,
            dinner_break_hours: Decimal::new(5, 1),
            late_night_hour: 21,
            late_cutoff_hour: 12,
            half_day_leave_hours: Decimal::from(4),
            full_day_leave_hours: Decimal::from(8),
            implicit_absence_enabled: false,
        }
    }
}

impl WorkHoursConfig {
    /// Checks hour ranges and threshold ordering.
    pub fn validate(&self) -> EngineResult<()> {
        let hours = [
            ("standard_start_hour", self.standard_start_hour),
            ("standard_end_hour", self.standard_end_hour),
            ("lunch_threshold_hour", self.lunch_threshold_hour),
            ("dinner_break_threshold_hour", self.dinner_break_threshold_hour),
            ("late_night_hour", self.late_night_hour),
            ("late_cutoff_hour", self.late_cutoff_hour),
        ];
        for (field, value) in hours {
            if value > 23 {
                return Err(invalid(field, "must be between 0 and 23"));
            }
        }

        if self.lunch_threshold_hour >= self.dinner_break_threshold_hour {
            return Err(invalid(
                "lunch_threshold_hour",
                "must be earlier than dinner_break_threshold_hour",
            ));
        }
        if self.standard_start_hour >= self.standard_end_hour {
            return Err(invalid(
                "standard_start_hour",
                "must be earlier than standard_end_hour",
            ));
        }

        let amounts = [
            ("expected_total_hours", self.expected_total_hours),
            ("lunch_break_hours", self.lunch_break_hours),
            ("dinner_break_hours", self.dinner_break_hours),
            ("half_day_leave_hours", self.half_day_leave_hours),
            ("full_day_leave_hours", self.full_day_leave_hours),
        ];
        for (field, value) in amounts {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(invalid(field, "must not be negative"));
            }
        }

        Ok(())
    }

    /// Standard start of the working day.
    pub fn standard_start(&self) -> NaiveTime {
        hour_to_time(self.standard_start_hour)
    }

    /// Lunch deduction threshold.
    pub fn lunch_threshold(&self) -> NaiveTime {
        hour_to_time(self.lunch_threshold_hour)
    }

    /// Dinner deduction threshold.
    pub fn dinner_threshold(&self) -> NaiveTime {
        hour_to_time(self.dinner_break_threshold_hour)
    }

    /// Late-night clock-out threshold.
    pub fn late_night_threshold(&self) -> NaiveTime {
        hour_to_time(self.late_night_hour)
    }

    /// Lateness cutoff.
    pub fn late_cutoff(&self) -> NaiveTime {
        hour_to_time(self.late_cutoff_hour)
    }
}

fn hour_to_time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN)
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// A named run of holiday dates (e.g. the Spring Festival break).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayPeriod {
    /// Name of the holiday.
    pub name: String,
    /// Dates off.
    pub dates: Vec<NaiveDate>,
}

/// One year's holiday schedule, as published in a `holidays/*.yaml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaySchedule {
    /// The year the schedule was published for.
    pub year: i32,
    /// Holiday periods.
    #[serde(default)]
    pub holidays: Vec<HolidayPeriod>,
    /// Weekend dates designated as workdays.
    #[serde(default)]
    pub makeup_workdays: Vec<NaiveDate>,
}

impl HolidaySchedule {
    /// Every holiday date in the schedule.
    pub fn holiday_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.holidays.iter().flat_map(|p| p.dates.iter().copied())
    }
}

/// Leave label table file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveLabelsConfig {
    /// Ordered classification table.
    pub labels: Vec<LeaveLabel>,
}
