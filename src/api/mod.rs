//! HTTP API module for the Worktime Engine.
//!
//! This module provides the REST endpoints for computing monthly work-hour
//! statistics, editing attendance and managing the holiday calendar.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{API_PREFIX, create_router};
pub use request::{AttendanceSubmitRequest, ConfigUpdateRequest, HolidayRequest, MonthQuery};
pub use response::{
    ApiError, ApiErrorResponse, CalculateResponse, ConfigResponse, DailyRecordsResponse,
    HealthResponse, HolidaysResponse, MessageResponse, RecordsSummary, TemplateResponse,
};
pub use state::AppState;
