//! Core data models for the Worktime Engine.
//!
//! This module contains the domain models used throughout the engine.

mod clock;
mod daily_record;
mod leave;
mod raw_day;
mod statistics;
mod year_month;

pub use clock::{ClockParseError, ClockTime};
pub use daily_record::{DailyRecord, RecordWarning, WarningCode};
pub use leave::{LeaveClassifier, LeaveLabel, LeaveType};
pub use raw_day::{RawDay, parse_row_date};
pub use statistics::MonthStatistics;
pub use year_month::YearMonth;
