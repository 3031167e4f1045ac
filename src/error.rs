//! Error types for the Worktime Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only month-level failures surface here: per-day parse problems degrade the
//! affected field and are recorded as [`RecordWarning`](crate::models::RecordWarning)s
//! instead.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Worktime Engine.
///
/// # Example
///
/// ```
/// use worktime_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/workhours.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/workhours.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The attendance data for a month could not be located or read.
    #[error("Attendance data for {year_month} is unavailable at '{path}': {reason}")]
    SourceUnavailable {
        /// The requested month (`YYYY-MM`).
        year_month: String,
        /// Where the source looked for the data.
        path: String,
        /// Why the data could not be read.
        reason: String,
    },

    /// The attendance source could not be written.
    #[error("Failed to write attendance data '{path}': {message}")]
    SourceWriteError {
        /// The location being written.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// No attendance row exists for the given date.
    #[error("No attendance record found for date {date}")]
    RecordNotFound {
        /// The date that was looked up.
        date: NaiveDate,
    },

    /// A year-month string was not in `YYYY-MM` form.
    #[error("Invalid year-month '{value}', expected YYYY-MM")]
    InvalidYearMonth {
        /// The rejected input.
        value: String,
    },

    /// A request field was invalid.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration values were parsed but are inconsistent.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
