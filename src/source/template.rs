//! Month template completion shared by every source.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::calendar::weekday_name;
use crate::models::{RawDay, YearMonth};

/// Fills in a blank row for each date of the month missing from `existing`.
///
/// Rows that already exist are kept as they are, including rows whose date
/// does not parse. The result is ordered by date with unparseable rows
/// after the dated ones. Returns the rows and the number added.
pub fn complete_month_rows(year_month: YearMonth, existing: Vec<RawDay>) -> (Vec<RawDay>, usize) {
    let mut dated: BTreeMap<NaiveDate, RawDay> = BTreeMap::new();
    let mut undated = Vec::new();
    for row in existing {
        match row.parsed_date() {
            Some(date) if !dated.contains_key(&date) => {
                dated.insert(date, row);
            }
            _ => undated.push(row),
        }
    }

    let mut added = 0;
    for date in year_month.days() {
        dated.entry(date).or_insert_with(|| {
            added += 1;
            blank_row(date)
        });
    }

    let mut rows: Vec<RawDay> = dated.into_values().collect();
    rows.extend(undated);
    (rows, added)
}

/// A blank row carrying only the date and weekday.
pub fn blank_row(date: NaiveDate) -> RawDay {
    RawDay {
        weekday: weekday_name(date.weekday()).to_string(),
        ..RawDay::for_date(date.format("%Y-%m-%d").to_string())
    }
}
