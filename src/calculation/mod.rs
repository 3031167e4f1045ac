//! Calculation logic for the Worktime Engine.
//!
//! This module turns raw attendance rows into daily records and folds them
//! into month statistics: leave hours, meal deductions, worked hours,
//! lateness detection, record building and month aggregation.

mod daily_record_builder;
mod lateness;
mod leave_hours;
mod meal_deduction;
mod month_aggregator;
mod work_hours;

pub use daily_record_builder::{BuildContext, build_daily_record, build_daily_records};
pub use lateness::detect_lateness;
pub use leave_hours::{LeaveHoursResult, calculate_leave_hours};
pub use meal_deduction::{MealDeduction, calculate_meal_deduction};
pub use month_aggregator::{
    HOURS_DECIMAL_PLACES, aggregate_month, count_remaining_workdays, round_hours,
};
pub use work_hours::{WorkedHoursResult, calculate_worked_hours, hours_from_minutes};
