//! Application state for the Worktime Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, RwLock};

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::calendar::HolidayCalendar;
use crate::config::{ConfigLoader, WorkHoursConfig};
use crate::error::EngineResult;
use crate::models::LeaveClassifier;
use crate::source::{AttendanceSource, CsvAttendanceSource};

/// Shared application state.
///
/// The rule parameters sit behind a lock so `PUT /config` can replace them;
/// handlers take a snapshot per request. The calendar guards its own sets.
#[derive(Clone)]
pub struct AppState {
    config: Arc<RwLock<WorkHoursConfig>>,
    calendar: Arc<HolidayCalendar>,
    classifier: Arc<LeaveClassifier>,
    source: Arc<dyn AttendanceSource>,
    reference_date: Option<NaiveDate>,
}

impl AppState {
    /// Creates a new application state from its parts.
    pub fn new(
        config: WorkHoursConfig,
        calendar: HolidayCalendar,
        classifier: LeaveClassifier,
        source: Arc<dyn AttendanceSource>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            calendar: Arc::new(calendar),
            classifier: Arc::new(classifier),
            source,
            reference_date: None,
        }
    }

    /// Creates the state for a loaded configuration directory, reading
    /// attendance from CSV files under the configured data directory.
    pub fn from_loader(loader: &ConfigLoader) -> Self {
        let config = loader.work_hours().clone();
        let source = CsvAttendanceSource::new(&config.data_directory);
        info!(data_directory = %config.data_directory, "Using CSV attendance source");
        Self::new(
            config,
            loader.holiday_calendar(),
            loader.leave_classifier(),
            Arc::new(source),
        )
    }

    /// Pins "today" to a fixed date instead of the local clock.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// The date used as "today".
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// A snapshot of the current rule parameters.
    pub fn config(&self) -> WorkHoursConfig {
        self.config
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replaces the rule parameters with the result of `update`.
    ///
    /// `update` runs under the write lock, so concurrent updates apply one
    /// after another. On error the parameters are left unchanged.
    pub fn update_config<F>(&self, update: F) -> EngineResult<WorkHoursConfig>
    where
        F: FnOnce(&WorkHoursConfig) -> EngineResult<WorkHoursConfig>,
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let updated = update(&config)?;
        *config = updated.clone();
        Ok(updated)
    }

    /// The holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// The leave classifier.
    pub fn classifier(&self) -> &LeaveClassifier {
        &self.classifier
    }

    /// The attendance source.
    pub fn source(&self) -> &dyn AttendanceSource {
        self.source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::source::MemoryAttendanceSource;
    use rust_decimal::Decimal;

    fn state() -> AppState {
        AppState::new(
            WorkHoursConfig::default(),
            HolidayCalendar::new(),
            LeaveClassifier::default(),
            Arc::new(MemoryAttendanceSource::new()),
        )
    }

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_update_config_is_shared_between_clones() {
        let state = state();
        let clone = state.clone();

        state
            .update_config(|current| {
                let mut config = current.clone();
                config.expected_total_hours = Decimal::from(180);
                Ok(config)
            })
            .unwrap();

        assert_eq!(clone.config().expected_total_hours, Decimal::from(180));
    }

    #[test]
    fn test_failed_update_leaves_config_unchanged() {
        let state = state();
        let result = state.update_config(|_| {
            Err(EngineError::InvalidConfig {
                field: "late_night_hour".to_string(),
                message: "must be between 0 and 23".to_string(),
            })
        });

        assert!(result.is_err());
        assert_eq!(state.config().late_night_hour, 21);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let state = state();
        let start = state.config().expected_total_hours;

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let state = state.clone();
                scope.spawn(move || {
                    for _ in 0..50 {
                        state
                            .update_config(|current| {
                                let mut config = current.clone();
                                config.expected_total_hours += Decimal::ONE;
                                Ok(config)
                            })
                            .unwrap();
                    }
                });
            }
        });

        assert_eq!(
            state.config().expected_total_hours,
            start + Decimal::from(400)
        );
    }

    #[test]
    fn test_pinned_reference_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let state = state().with_reference_date(date);
        assert_eq!(state.today(), date);
    }
}
