//! Attendance sources.
//!
//! A source delivers the raw rows of a month and accepts edits. The CSV
//! source stores one file per month; the in-memory source backs tests and
//! embedding.

mod attendance_source;
mod csv_source;
mod memory;
mod template;

pub use attendance_source::{AttendanceSource, AttendanceSubmission, TemplateOutcome};
pub use csv_source::CsvAttendanceSource;
pub use memory::MemoryAttendanceSource;
pub use template::{blank_row, complete_month_rows};
