//! Calendar facts the node dispatch needs, read off `chrono`.
//!
//! Weekdays are numbered from Monday = 0 to Sunday = 6 and months from 1.
//! Years are expected within `YEAR_MIN..=YEAR_MAX`; dates chrono cannot
//! represent count as zero-length months starting on a Monday.

use chrono::{Datelike, NaiveDate, Weekday};

fn first_of(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn is_leap_year(year: i32) -> bool {
    first_of(year, 1).is_some_and(|date| date.leap_year())
}

/// Number of days in `month` (1..=12).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let following = if month == 12 {
        first_of(year + 1, 1)
    } else {
        first_of(year, month + 1)
    };
    match (first_of(year, month), following) {
        (Some(start), Some(end)) => (end - start).num_days() as u32,
        _ => 0,
    }
}

/// Weekday of a date, Monday = 0.
pub fn weekday(year: i32, month: u32, day: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, day)
        .map_or(0, |date| date.weekday().num_days_from_monday())
}

/// Number of ISO weeks (52 or 53) in an ISO week-numbering year.
pub fn iso_weeks_in_year(year: i32) -> u32 {
    if NaiveDate::from_isoywd_opt(year, 53, Weekday::Mon).is_some() {
        53
    } else {
        52
    }
}

/// Number of Monday-first week rows a month spans (4, 5 or 6).
pub fn week_rows(year: i32, month: u32) -> u32 {
    (weekday(year, month, 1) + days_in_month(year, month)).div_ceil(7)
}
