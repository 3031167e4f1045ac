//! HTTP request handlers for the Worktime Engine API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! route lives under [`API_PREFIX`].

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::WorkHoursConfig;
use crate::engine::WorktimeEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::MonthStatistics;
use crate::report::render_report;
use crate::source::AttendanceSubmission;

use super::request::{AttendanceSubmitRequest, ConfigUpdateRequest, HolidayRequest, MonthQuery};
use super::response::{
    ApiError, ApiErrorResponse, CalculateResponse, ConfigResponse, DailyRecordsResponse,
    HealthResponse, HolidaysResponse, MessageResponse, RecordsSummary, TemplateResponse,
};
use super::state::AppState;

/// Path prefix shared by every endpoint.
pub const API_PREFIX: &str = "/api/workhours";

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/calculate", get(calculate_handler))
        .route("/report", get(report_handler))
        .route("/daily-records", get(daily_records_handler))
        .route("/attendance/submit", post(submit_handler))
        .route("/template/generate", post(template_handler))
        .route("/config", get(get_config_handler).put(update_config_handler))
        .route("/holidays", get(list_holidays_handler).post(add_holiday_handler))
        .route("/holidays/:date", delete(remove_holiday_handler))
        .route("/health", get(health_handler));

    Router::new().nest(API_PREFIX, api).with_state(state)
}

/// Computes the statistics of the requested month along with the
/// parameters used.
fn month_statistics(
    state: &AppState,
    query: &MonthQuery,
) -> EngineResult<(MonthStatistics, WorkHoursConfig)> {
    let today = state.today();
    let year_month = query.resolve(today)?;
    let config = state.config();
    let engine = WorktimeEngine::new(state.source(), state.calendar(), &config, state.classifier());
    let statistics = engine.calculate_month(year_month, today)?;
    Ok((statistics, config))
}

fn failure(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    error.into()
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_failure(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Handler for GET /calculate.
async fn calculate_handler(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<CalculateResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, year_month = ?query.year_month, "Processing calculation request");

    let start_time = Instant::now();
    let (statistics, _) =
        month_statistics(&state, &query).map_err(|e| failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        year_month = %statistics.year_month,
        total_worked_hours = %statistics.total_worked_hours,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );
    Ok(Json(CalculateResponse {
        success: true,
        message: "Work hours calculated".to_string(),
        statistics,
    }))
}

/// Handler for GET /report.
async fn report_handler(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, year_month = ?query.year_month, "Processing report request");

    let (statistics, config) =
        month_statistics(&state, &query).map_err(|e| failure(correlation_id, e))?;
    let report = render_report(&statistics, &config);

    info!(
        correlation_id = %correlation_id,
        year_month = %statistics.year_month,
        "Report generated"
    );
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report,
    )
        .into_response())
}

/// Handler for GET /daily-records.
async fn daily_records_handler(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<DailyRecordsResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, year_month = ?query.year_month, "Processing daily records request");

    let (statistics, _) =
        month_statistics(&state, &query).map_err(|e| failure(correlation_id, e))?;
    let summary = RecordsSummary::from(&statistics);

    Ok(Json(DailyRecordsResponse {
        success: true,
        year_month: statistics.year_month,
        daily_records: statistics.daily_records,
        summary,
    }))
}

/// Handler for POST /attendance/submit.
async fn submit_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceSubmitRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance submission");

    let Json(request) = payload.map_err(|r| rejection_failure(correlation_id, r))?;
    request
        .validate()
        .map_err(|e| failure(correlation_id, e))?;

    let date = request.date;
    let submission: AttendanceSubmission = request.into();
    state
        .source()
        .submit(&submission)
        .map_err(|e| failure(correlation_id, e))?;

    info!(correlation_id = %correlation_id, %date, "Attendance submitted");
    Ok(Json(MessageResponse {
        success: true,
        message: format!("Attendance for {} saved", date),
    }))
}

/// Handler for POST /template/generate.
async fn template_handler(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<TemplateResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, year_month = ?query.year_month, "Processing template request");

    let year_month = query
        .resolve(state.today())
        .map_err(|e| failure(correlation_id, e))?;
    let template = state
        .source()
        .generate_template(year_month)
        .map_err(|e| failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        %year_month,
        added_rows = template.added_rows,
        "Template generated"
    );
    Ok(Json(TemplateResponse {
        success: true,
        message: "Template generated".to_string(),
        year_month,
        template,
    }))
}

/// Handler for GET /config.
async fn get_config_handler(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        success: true,
        config: state.config(),
    })
}

/// Handler for PUT /config.
async fn update_config_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConfigUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<ConfigResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing configuration update");

    let Json(request) = payload.map_err(|r| rejection_failure(correlation_id, r))?;
    let updated = state
        .update_config(|current| request.apply(current))
        .map_err(|e| failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        expected_total_hours = %updated.expected_total_hours,
        "Configuration updated"
    );
    Ok(Json(ConfigResponse {
        success: true,
        config: updated,
    }))
}

fn holidays_snapshot(state: &AppState) -> HolidaysResponse {
    HolidaysResponse {
        success: true,
        holidays: state.calendar().all_holidays(),
        makeup_workdays: state.calendar().all_makeup_workdays(),
    }
}

/// Handler for GET /holidays.
async fn list_holidays_handler(State(state): State<AppState>) -> Json<HolidaysResponse> {
    Json(holidays_snapshot(&state))
}

/// Handler for POST /holidays.
async fn add_holiday_handler(
    State(state): State<AppState>,
    payload: Result<Json<HolidayRequest>, JsonRejection>,
) -> ApiResult<Json<HolidaysResponse>> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| rejection_failure(correlation_id, r))?;

    let inserted = if request.makeup_workday {
        state.calendar().add_makeup_workday(request.date)
    } else {
        state.calendar().add_holiday(request.date)
    };
    info!(
        correlation_id = %correlation_id,
        date = %request.date,
        makeup_workday = request.makeup_workday,
        inserted,
        "Calendar entry added"
    );
    Ok(Json(holidays_snapshot(&state)))
}

/// Handler for DELETE /holidays/:date.
///
/// Removes the date from the holidays, or from the makeup workdays when it
/// is not a holiday. Removing an absent date is not an error.
async fn remove_holiday_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<HolidaysResponse>> {
    let correlation_id = Uuid::new_v4();
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
        failure(
            correlation_id,
            EngineError::InvalidRequest {
                field: "date".to_string(),
                message: e.to_string(),
            },
        )
    })?;

    let removed =
        state.calendar().remove_holiday(date) || state.calendar().remove_makeup_workday(date);
    info!(correlation_id = %correlation_id, %date, removed, "Calendar entry removed");
    Ok(Json(holidays_snapshot(&state)))
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        service: "worktime-engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
