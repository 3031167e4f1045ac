//! The attendance source abstraction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{LeaveType, RawDay, YearMonth};

/// Where monthly attendance rows come from and where edits go.
///
/// Implementations deliver already-normalized string rows; parsing and
/// classification happen in the record builder. A month that cannot be
/// located or read is an `EngineError::SourceUnavailable`.
pub trait AttendanceSource: Send + Sync {
    /// Loads every row stored for `year_month`, in stored order.
    fn load_month(&self, year_month: YearMonth) -> EngineResult<Vec<RawDay>>;

    /// Updates the row for `submission.date` with the fields it carries.
    fn submit(&self, submission: &AttendanceSubmission) -> EngineResult<()>;

    /// Ensures a row exists for every date of `year_month`, keeping rows
    /// that already exist.
    fn generate_template(&self, year_month: YearMonth) -> EngineResult<TemplateOutcome>;
}

/// A partial update to one day's attendance row.
///
/// Only fields that are present and non-blank overwrite the stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSubmission {
    /// The day to update.
    pub date: NaiveDate,
    /// New clock-in punch.
    pub clock_in: Option<String>,
    /// New clock-out punch.
    pub clock_out: Option<String>,
    /// New leave classification, stored as its label.
    pub leave_type: Option<LeaveType>,
    /// New custom leave start.
    pub leave_start: Option<String>,
    /// New custom leave end.
    pub leave_end: Option<String>,
    /// New remark.
    pub remark: Option<String>,
}

impl AttendanceSubmission {
    /// A submission for `date` that changes nothing yet.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            clock_in: None,
            clock_out: None,
            leave_type: None,
            leave_start: None,
            leave_end: None,
            remark: None,
        }
    }

    /// Writes the carried fields into `row`.
    pub fn apply_to(&self, row: &mut RawDay) {
        overwrite(&mut row.clock_in, self.clock_in.as_deref());
        overwrite(&mut row.clock_out, self.clock_out.as_deref());
        if let Some(leave_type) = self.leave_type {
            row.leave_type = leave_type.label().to_string();
        }
        overwrite(&mut row.leave_start, self.leave_start.as_deref());
        overwrite(&mut row.leave_end, self.leave_end.as_deref());
        overwrite(&mut row.remark, self.remark.as_deref());
    }
}

fn overwrite(field: &mut String, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        *field = value.to_string();
    }
}

/// What a template generation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateOutcome {
    /// Where the month's rows live (a file path for file-backed sources).
    pub location: String,
    /// Rows the month holds after generation.
    pub total_rows: usize,
    /// Rows that were newly added.
    pub added_rows: usize,
}
