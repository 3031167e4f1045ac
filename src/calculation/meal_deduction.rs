//! Meal break deductions.
//!
//! Lunch and dinner are unpaid. Whether a break is deducted depends on the
//! clock-out time and on which half of the day was taken as leave.

use rust_decimal::Decimal;

use crate::config::WorkHoursConfig;
use crate::models::{ClockTime, LeaveType};

/// The meal time deducted from a day's raw span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealDeduction {
    /// Total hours deducted.
    pub hours: Decimal,
    /// Whether the lunch break was deducted.
    pub lunch: bool,
    /// Whether the dinner break was deducted.
    pub dinner: bool,
}

impl MealDeduction {
    /// No deduction.
    pub const NONE: Self = Self {
        hours: Decimal::ZERO,
        lunch: false,
        dinner: false,
    };
}

/// Calculates the meal deduction for a day.
///
/// - `FullDay` and `Afternoon` leave deduct nothing.
/// - `Morning` leave skips lunch and deducts dinner once clock-out reaches
///   the dinner threshold.
/// - Other days deduct lunch once clock-out reaches the lunch threshold and
///   dinner as well once it reaches the dinner threshold.
///
/// A clock-out carrying a next-day marker is past both thresholds.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::calculate_meal_deduction;
/// use worktime_engine::config::WorkHoursConfig;
/// use worktime_engine::models::{ClockTime, LeaveType};
/// use rust_decimal::Decimal;
///
/// let config = WorkHoursConfig::default();
/// let out = ClockTime::at(20, 0).unwrap();
///
/// let deduction = calculate_meal_deduction(out, LeaveType::None, &config);
/// assert_eq!(deduction.hours, Decimal::new(15, 1));
///
/// let deduction = calculate_meal_deduction(out, LeaveType::Afternoon, &config);
/// assert_eq!(deduction.hours, Decimal::ZERO);
/// ```
pub fn calculate_meal_deduction(
    clock_out: ClockTime,
    leave_type: LeaveType,
    config: &WorkHoursConfig,
) -> MealDeduction {
    let past_lunch = clock_out.is_at_or_after(config.lunch_threshold());
    let past_dinner = clock_out.is_at_or_after(config.dinner_threshold());

    let (lunch, dinner) = match leave_type {
        LeaveType::FullDay | LeaveType::Afternoon => (false, false),
        LeaveType::Morning => (false, past_dinner),
        LeaveType::None | LeaveType::Custom => (past_lunch, past_lunch && past_dinner),
    };

    let mut hours = Decimal::ZERO;
    if lunch {
        hours += config.lunch_break_hours;
    }
    if dinner {
        hours += config.dinner_break_hours;
    }

    MealDeduction {
        hours,
        lunch,
        dinner,
    }
}
