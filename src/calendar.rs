//! Calendar helpers for deriving week numbers from dates.
//!
//! Upstream retail datasets usually carry observation dates; the annotation
//! routines work on integer week numbers. The year-end convention is fixed:
//! week 52 is the final week of the year, so the occasional ISO week 53 is
//! folded into week 52.

use crate::core::Column;
use chrono::{Datelike, NaiveDate};

/// The week number treated as the final week of the year.
pub const YEAR_END_WEEK: i64 = 52;

/// ISO week number of a date, folded into the 1..=52 range.
pub fn week_number(date: NaiveDate) -> i64 {
    (date.iso_week().week() as i64).min(YEAR_END_WEEK)
}

/// Build an integer `Week` column from observation dates.
pub fn week_column(dates: &[NaiveDate]) -> Column {
    Column::Int(dates.iter().map(|&d| week_number(d)).collect())
}
