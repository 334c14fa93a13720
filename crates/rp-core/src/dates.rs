//! Calendar helpers.
//!
//! Profiles are stored against whole days since a start date, and the text
//! readers normalize monthly/yearly reported volumes by the length of the
//! reporting period. These helpers keep that arithmetic in one place.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta};

use crate::{CoreError, CoreResult};

/// Start date used when a data set does not define one.
pub fn default_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Build a date, reporting impossible combinations as [`CoreError::InvalidDate`].
pub fn date(year: i32, month: u32, day: u32) -> CoreResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CoreError::InvalidDate { year, month, day })
}

/// Build a date and time of day.
pub fn datetime(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> CoreResult<NaiveDateTime> {
    date(year, month, day)?
        .and_hms_opt(hour, minute, second)
        .ok_or(CoreError::InvalidTime {
            hour,
            minute,
            second,
        })
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Whole days from `from` to `to` (negative if `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn add_days(d: NaiveDate, days: i64) -> NaiveDate {
    d.checked_add_signed(TimeDelta::days(days)).unwrap_or(d)
}

/// Add calendar months, clamping the day to the end of the target month.
pub fn add_months_clamped(d: NaiveDate, months: u32) -> NaiveDate {
    d.checked_add_months(Months::new(months)).unwrap_or(d)
}

/// Add calendar years; 29 February maps to 28 February in non-leap years.
pub fn add_years_clamped(d: NaiveDate, years: u32) -> NaiveDate {
    add_months_clamped(d, years.saturating_mul(12))
}

/// Day/month/year triple as floats, the form stored in `DAY`/`MONTH`/`YEAR` vectors.
pub fn dmy(d: NaiveDate) -> (f64, f64, f64) {
    (d.day() as f64, d.month() as f64, d.year() as f64)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn added_month_never_overflows_target_month(
            year in 1900_i32..2100,
            month in 1_u32..=12,
            day in 1_u32..=28,
            extra in 0_u32..=3,
        ) {
            let d = date(year, month, day + extra.min(days_in_month(year, month) - day)).unwrap();
            let next = add_months_clamped(d, 1);
            prop_assert!(next.day() <= days_in_month(next.year(), next.month()));
            prop_assert_eq!((next.month0() + 12 - d.month0()) % 12, 1);
        }
    }
}
