//! CSV file attendance source.
//!
//! Each month lives in `attendance_{YYYY-MM}.csv` under a data directory,
//! with the header row
//! `date,weekday,clock_in,clock_out,leave_type,leave_start,leave_end,remark`.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{RawDay, YearMonth};

use super::attendance_source::{AttendanceSource, AttendanceSubmission, TemplateOutcome};
use super::template::complete_month_rows;

/// Attendance rows stored as one CSV file per month.
///
/// Short rows are accepted; missing trailing columns read as empty. A row
/// that fails to decode is logged and skipped, while an I/O failure makes
/// the whole month unavailable. Writes go to a temporary file that replaces
/// the month file once complete.
///
/// # Example
///
/// ```no_run
/// use worktime_engine::source::{AttendanceSource, CsvAttendanceSource};
///
/// let source = CsvAttendanceSource::new("data");
/// let rows = source.load_month("2025-03".parse().unwrap()).unwrap();
/// println!("{} rows", rows.len());
/// ```
#[derive(Debug, Clone)]
pub struct CsvAttendanceSource {
    data_directory: PathBuf,
}

impl CsvAttendanceSource {
    /// Creates a source reading from `data_directory`.
    pub fn new(data_directory: impl Into<PathBuf>) -> Self {
        Self {
            data_directory: data_directory.into(),
        }
    }

    /// The directory holding the month files.
    pub fn data_directory(&self) -> &Path {
        &self.data_directory
    }

    /// The file holding `year_month`.
    pub fn month_path(&self, year_month: YearMonth) -> PathBuf {
        self.data_directory
            .join(format!("attendance_{}.csv", year_month))
    }

    fn read_rows(&self, year_month: YearMonth, path: &Path) -> EngineResult<Vec<RawDay>> {
        let unavailable = |reason: String| EngineError::SourceUnavailable {
            year_month: year_month.to_string(),
            path: path.display().to_string(),
            reason,
        };

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| unavailable(e.to_string()))?;

        let mut rows = Vec::new();
        for (index, result) in reader.deserialize::<RawDay>().enumerate() {
            match result {
                Ok(row) => rows.push(row),
                Err(e) if e.is_io_error() => return Err(unavailable(e.to_string())),
                Err(e) => {
                    // Header is line 1
                    warn!(path = %path.display(), line = index + 2, error = %e, "Skipping undecodable row");
                }
            }
        }
        Ok(rows)
    }

    fn write_rows(&self, path: &Path, rows: &[RawDay]) -> EngineResult<()> {
        let write_error = |message: String| EngineError::SourceWriteError {
            path: path.display().to_string(),
            message,
        };

        fs::create_dir_all(&self.data_directory).map_err(|e| write_error(e.to_string()))?;

        let temp_path = path.with_extension("csv.tmp");
        let mut writer = WriterBuilder::new()
            .from_path(&temp_path)
            .map_err(|e| write_error(e.to_string()))?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| write_error(e.to_string()))?;
        }
        writer.flush().map_err(|e| write_error(e.to_string()))?;
        drop(writer);

        fs::rename(&temp_path, path).map_err(|e| write_error(e.to_string()))
    }
}

impl AttendanceSource for CsvAttendanceSource {
    fn load_month(&self, year_month: YearMonth) -> EngineResult<Vec<RawDay>> {
        let path = self.month_path(year_month);
        if !path.exists() {
            return Err(EngineError::SourceUnavailable {
                year_month: year_month.to_string(),
                path: path.display().to_string(),
                reason: "file does not exist, generate a template first".to_string(),
            });
        }

        let rows = self.read_rows(year_month, &path)?;
        info!(%year_month, path = %path.display(), rows = rows.len(), "Loaded attendance file");
        Ok(rows)
    }

    fn submit(&self, submission: &AttendanceSubmission) -> EngineResult<()> {
        let year_month = YearMonth::of(submission.date);
        let path = self.month_path(year_month);
        let mut rows = self.load_month(year_month)?;

        let row = rows
            .iter_mut()
            .find(|row| row.parsed_date() == Some(submission.date))
            .ok_or(EngineError::RecordNotFound {
                date: submission.date,
            })?;
        submission.apply_to(row);

        self.write_rows(&path, &rows)?;
        info!(date = %submission.date, path = %path.display(), "Attendance row updated");
        Ok(())
    }

    fn generate_template(&self, year_month: YearMonth) -> EngineResult<TemplateOutcome> {
        let path = self.month_path(year_month);
        let existing = if path.exists() {
            self.read_rows(year_month, &path)?
        } else {
            Vec::new()
        };

        let (rows, added_rows) = complete_month_rows(year_month, existing);
        if added_rows > 0 || !path.exists() {
            self.write_rows(&path, &rows)?;
        }

        info!(
            %year_month,
            path = %path.display(),
            total_rows = rows.len(),
            added_rows,
            "Attendance template generated"
        );
        Ok(TemplateOutcome {
            location: path.display().to_string(),
            total_rows: rows.len(),
            added_rows,
        })
    }
}
