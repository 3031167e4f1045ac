//! Holiday calendar and workday classification.

mod holiday_calendar;
mod workday;

pub use holiday_calendar::HolidayCalendar;
pub use workday::{is_workday, weekday_name};
