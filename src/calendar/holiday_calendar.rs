//! Holiday and makeup-workday date sets.

use std::collections::BTreeSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::HolidaySchedule;
use crate::error::{EngineError, EngineResult};

const DEFAULT_SCHEDULE_YAML: &str = include_str!("../../config/holidays/2025.yaml");

#[derive(Debug, Default)]
struct CalendarSets {
    holidays: BTreeSet<NaiveDate>,
    makeup_workdays: BTreeSet<NaiveDate>,
}

/// The set of legal holidays and makeup workdays.
///
/// The calendar is an explicitly constructed value that callers share
/// (typically behind an `Arc`). Reads and writes go through an internal
/// reader-writer lock, so lookups can run concurrently with the occasional
/// `add_holiday`/`remove_holiday`. Accessors hand out copies, never views of
/// the internal sets.
///
/// # Example
///
/// ```
/// use worktime_engine::calendar::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::new();
/// let national_day = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
///
/// calendar.add_holiday(national_day);
/// assert!(calendar.is_holiday(national_day));
///
/// calendar.remove_holiday(national_day);
/// assert!(!calendar.is_holiday(national_day));
/// ```
#[derive(Debug, Default)]
pub struct HolidayCalendar {
    sets: RwLock<CalendarSets>,
}

impl HolidayCalendar {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calendar from one published schedule.
    pub fn from_schedule(schedule: &HolidaySchedule) -> Self {
        let calendar = Self::new();
        calendar.merge_schedule(schedule);
        calendar
    }

    /// Creates a calendar holding the bundled 2025 schedule.
    pub fn with_default_schedule() -> EngineResult<Self> {
        let schedule: HolidaySchedule =
            serde_yaml::from_str(DEFAULT_SCHEDULE_YAML).map_err(|e| {
                EngineError::ConfigParseError {
                    path: "config/holidays/2025.yaml (bundled)".to_string(),
                    message: e.to_string(),
                }
            })?;
        Ok(Self::from_schedule(&schedule))
    }

    /// Adds every date of `schedule` to this calendar.
    pub fn merge_schedule(&self, schedule: &HolidaySchedule) {
        let mut sets = self.write();
        sets.holidays.extend(schedule.holiday_dates());
        sets.makeup_workdays
            .extend(schedule.makeup_workdays.iter().copied());
        info!(
            year = schedule.year,
            holidays = sets.holidays.len(),
            makeup_workdays = sets.makeup_workdays.len(),
            "Merged holiday schedule"
        );
    }

    /// Whether `date` is a legal holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        let result = self.read().holidays.contains(&date);
        if result {
            debug!(%date, "Date is a legal holiday");
        }
        result
    }

    /// Whether `date` is a makeup workday.
    pub fn is_makeup_workday(&self, date: NaiveDate) -> bool {
        let result = self.read().makeup_workdays.contains(&date);
        if result {
            debug!(%date, "Date is a makeup workday");
        }
        result
    }

    /// Adds a holiday. Returns `true` if the date was not already a holiday.
    pub fn add_holiday(&self, date: NaiveDate) -> bool {
        let inserted = self.write().holidays.insert(date);
        info!(%date, inserted, "Added holiday");
        inserted
    }

    /// Removes a holiday. Returns `true` if the date was a holiday.
    pub fn remove_holiday(&self, date: NaiveDate) -> bool {
        let removed = self.write().holidays.remove(&date);
        info!(%date, removed, "Removed holiday");
        removed
    }

    /// Adds a makeup workday. Returns `true` if it was not already present.
    pub fn add_makeup_workday(&self, date: NaiveDate) -> bool {
        let inserted = self.write().makeup_workdays.insert(date);
        info!(%date, inserted, "Added makeup workday");
        inserted
    }

    /// Removes a makeup workday. Returns `true` if it was present.
    pub fn remove_makeup_workday(&self, date: NaiveDate) -> bool {
        let removed = self.write().makeup_workdays.remove(&date);
        info!(%date, removed, "Removed makeup workday");
        removed
    }

    /// A copy of every holiday, in date order.
    pub fn all_holidays(&self) -> BTreeSet<NaiveDate> {
        self.read().holidays.clone()
    }

    /// A copy of every makeup workday, in date order.
    pub fn all_makeup_workdays(&self) -> BTreeSet<NaiveDate> {
        self.read().makeup_workdays.clone()
    }

    // A poisoned lock still guards valid sets.
    fn read(&self) -> RwLockReadGuard<'_, CalendarSets> {
        self.sets.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CalendarSets> {
        self.sets.write().unwrap_or_else(|e| e.into_inner())
    }
}
