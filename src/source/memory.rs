//! In-memory attendance source.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{RawDay, YearMonth};

use super::attendance_source::{AttendanceSource, AttendanceSubmission, TemplateOutcome};
use super::template::complete_month_rows;

/// Attendance rows held in memory, keyed by month.
///
/// Useful for tests and for embedding the engine where rows arrive from
/// elsewhere.
///
/// # Example
///
/// ```
/// use worktime_engine::models::RawDay;
/// use worktime_engine::source::{AttendanceSource, MemoryAttendanceSource};
///
/// let source = MemoryAttendanceSource::new();
/// let march = "2025-03".parse().unwrap();
/// source.insert_month(march, vec![RawDay::for_date("2025-03-03").with_clock("9:00", "18:00")]);
///
/// assert_eq!(source.load_month(march).unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryAttendanceSource {
    months: RwLock<HashMap<YearMonth, Vec<RawDay>>>,
}

impl MemoryAttendanceSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rows stored for `year_month`.
    pub fn insert_month(&self, year_month: YearMonth, rows: Vec<RawDay>) {
        self.write().insert(year_month, rows);
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<YearMonth, Vec<RawDay>>> {
        self.months.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<YearMonth, Vec<RawDay>>> {
        self.months.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl AttendanceSource for MemoryAttendanceSource {
    fn load_month(&self, year_month: YearMonth) -> EngineResult<Vec<RawDay>> {
        self.read()
            .get(&year_month)
            .cloned()
            .ok_or_else(|| EngineError::SourceUnavailable {
                year_month: year_month.to_string(),
                path: "memory".to_string(),
                reason: "no rows stored for this month".to_string(),
            })
    }

    fn submit(&self, submission: &AttendanceSubmission) -> EngineResult<()> {
        let year_month = YearMonth::of(submission.date);
        let mut months = self.write();
        let rows = months
            .get_mut(&year_month)
            .ok_or_else(|| EngineError::SourceUnavailable {
                year_month: year_month.to_string(),
                path: "memory".to_string(),
                reason: "no rows stored for this month".to_string(),
            })?;

        let row = rows
            .iter_mut()
            .find(|row| row.parsed_date() == Some(submission.date))
            .ok_or(EngineError::RecordNotFound {
                date: submission.date,
            })?;
        submission.apply_to(row);

        info!(date = %submission.date, "Attendance row updated");
        Ok(())
    }

    fn generate_template(&self, year_month: YearMonth) -> EngineResult<TemplateOutcome> {
        let mut months = self.write();
        let existing = months.remove(&year_month).unwrap_or_default();
        let (rows, added_rows) = complete_month_rows(year_month, existing);
        let total_rows = rows.len();
        months.insert(year_month, rows);

        info!(%year_month, total_rows, added_rows, "Attendance template generated");
        Ok(TemplateOutcome {
            location: "memory".to_string(),
            total_rows,
            added_rows,
        })
    }
}
