//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading work-hour
//! parameters, the leave label table and holiday schedules from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::calendar::HolidayCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveClassifier, LeaveLabel};

use super::types::{HolidaySchedule, LeaveLabelsConfig, WorkHoursConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── workhours.yaml      # Rule parameters (required)
/// ├── leave_labels.yaml   # Leave classification table (optional)
/// └── holidays/
///     └── 2025.yaml       # One schedule per year
/// ```
///
/// A missing `leave_labels.yaml` falls back to the built-in table. A missing
/// `holidays/` directory yields an empty calendar.
///
/// # Example
///
/// ```no_run
/// use worktime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Target: {} hours", loader.work_hours().expected_total_hours);
/// let calendar = loader.holiday_calendar();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    work_hours: WorkHoursConfig,
    leave_labels: Vec<LeaveLabel>,
    holiday_schedules: Vec<HolidaySchedule>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `workhours.yaml` is missing
    /// - Any present file contains invalid YAML
    /// - The parameters fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let work_hours = Self::load_yaml::<WorkHoursConfig>(&path.join("workhours.yaml"))?;
        work_hours.validate()?;

        let labels_path = path.join("leave_labels.yaml");
        let leave_labels = if labels_path.exists() {
            Self::load_yaml::<LeaveLabelsConfig>(&labels_path)?.labels
        } else {
            LeaveClassifier::default_labels()
        };

        let holiday_schedules = Self::load_holidays(&path.join("holidays"))?;

        info!(
            config_dir = %path.display(),
            leave_labels = leave_labels.len(),
            holiday_schedules = holiday_schedules.len(),
            "Loaded configuration"
        );

        Ok(Self {
            work_hours,
            leave_labels,
            holiday_schedules,
        })
    }

    /// Creates a loader from already-built parts.
    pub fn from_parts(
        work_hours: WorkHoursConfig,
        leave_labels: Vec<LeaveLabel>,
        holiday_schedules: Vec<HolidaySchedule>,
    ) -> Self {
        Self {
            work_hours,
            leave_labels,
            holiday_schedules,
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all schedule files from the holidays directory, oldest year first.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<Vec<HolidaySchedule>> {
        if !holidays_dir.exists() {
            return Ok(Vec::new());
        }

        let dir_str = holidays_dir.display().to_string();
        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut schedules = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                schedules.push(Self::load_yaml::<HolidaySchedule>(&path)?);
            }
        }

        schedules.sort_by_key(|s| s.year);
        Ok(schedules)
    }

    /// Returns the rule parameters.
    pub fn work_hours(&self) -> &WorkHoursConfig {
        &self.work_hours
    }

    /// Returns the leave label table.
    pub fn leave_labels(&self) -> &[LeaveLabel] {
        &self.leave_labels
    }

    /// Returns the loaded holiday schedules.
    pub fn holiday_schedules(&self) -> &[HolidaySchedule] {
        &self.holiday_schedules
    }

    /// Builds a classifier from the leave label table.
    pub fn leave_classifier(&self) -> LeaveClassifier {
        LeaveClassifier::new(self.leave_labels.clone())
    }

    /// Builds a fresh calendar from every loaded schedule.
    pub fn holiday_calendar(&self) -> HolidayCalendar {
        let calendar = HolidayCalendar::new();
        for schedule in &self.holiday_schedules {
            calendar.merge_schedule(schedule);
        }
        calendar
    }
}
