//! Response types for the Worktime Engine API.
//!
//! This module defines the success envelopes, the error response structure
//! and the mapping from [`EngineError`] to HTTP status codes.

use std::collections::BTreeSet;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::WorkHoursConfig;
use crate::error::EngineError;
use crate::models::{DailyRecord, MonthStatistics, YearMonth};
use crate::source::TemplateOutcome;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    #[serde(flatten)]
    error: ApiError,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope {
            success: false,
            error: self.error,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::SourceUnavailable { path, .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "SOURCE_UNAVAILABLE",
                    message,
                    format!("Generate the month template first; expected data at {}", path),
                ),
            },
            EngineError::RecordNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("RECORD_NOT_FOUND", message),
            },
            EngineError::InvalidYearMonth { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_YEAR_MONTH",
                    message,
                    "The yearMonth parameter must look like 2025-03",
                ),
            },
            EngineError::InvalidRequest { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("Field '{}' was rejected", field),
                ),
            },
            EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_CONFIG", message),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::SourceWriteError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("SOURCE_WRITE_ERROR", message),
            },
        }
    }
}

/// Body of `GET /calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable status.
    pub message: String,
    /// The month statistics.
    pub statistics: MonthStatistics,
}

/// Headline figures returned alongside the daily records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsSummary {
    /// Total worked hours.
    pub total_worked_hours: Decimal,
    /// Days with worked hours.
    pub attendance_days: u32,
    /// Average worked hours per attended day.
    pub average_worked_hours: Decimal,
}

impl From<&MonthStatistics> for RecordsSummary {
    fn from(statistics: &MonthStatistics) -> Self {
        Self {
            total_worked_hours: statistics.total_worked_hours,
            attendance_days: statistics.attendance_days,
            average_worked_hours: statistics.average_worked_hours_per_attendance_day,
        }
    }
}

/// Body of `GET /daily-records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecordsResponse {
    /// Always `true`.
    pub success: bool,
    /// The month listed.
    pub year_month: YearMonth,
    /// Every record of the month.
    pub daily_records: Vec<DailyRecord>,
    /// Headline figures.
    pub summary: RecordsSummary,
}

/// Body of `POST /template/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable status.
    pub message: String,
    /// The month generated.
    pub year_month: YearMonth,
    /// What the generation did.
    pub template: TemplateOutcome,
}

/// Body of `GET /config` and `PUT /config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    /// Always `true`.
    pub success: bool,
    /// The parameters in effect.
    pub config: WorkHoursConfig,
}

/// Body of the holiday endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidaysResponse {
    /// Always `true`.
    pub success: bool,
    /// Legal holidays in date order.
    pub holidays: BTreeSet<NaiveDate>,
    /// Makeup workdays in date order.
    pub makeup_workdays: BTreeSet<NaiveDate>,
}

/// Body of a plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable status.
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `UP` while the service is serving.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
}
