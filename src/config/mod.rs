//! Configuration loading and management for the Worktime Engine.
//!
//! This module loads the rule parameters, the leave label table and the
//! yearly holiday schedules from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use worktime_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Monthly target: {}", config.work_hours().expected_total_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HolidayPeriod, HolidaySchedule, LeaveLabelsConfig, WorkHoursConfig};
