//! Calendar primitives the scheduler composes.
//!
//! Every function takes `today` explicitly so the scheduler stays
//! deterministic under test; [`today`] reads the clock once at the edge.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::types::WeekdayId;

/// Current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Weekday number of a date, 0 = Sunday .. 6 = Saturday.
pub fn weekday_number(date: NaiveDate) -> WeekdayId {
    date.weekday().num_days_from_sunday() as WeekdayId
}

/// Weekday number of the current local date.
pub fn todays_weekday() -> WeekdayId {
    weekday_number(today())
}

/// Add `days` (may be negative) to `base`, or to `today` when `base` is
/// absent. Month and year boundaries roll over.
pub fn add_days(base: Option<NaiveDate>, days: i64, today: NaiveDate) -> NaiveDate {
    base.unwrap_or(today) + Duration::days(days)
}

/// Date of the next occurrence of `target` on or after `today`.
///
/// Returns `today` itself when it already falls on the target weekday.
pub fn next_date_for_weekday(target: WeekdayId, today: NaiveDate) -> NaiveDate {
    let current = weekday_number(today) as i64;
    let until = (target as i64 - current).rem_euclid(7);
    today + Duration::days(until)
}

/// Strict date-only comparison against `today`. A missing date is never
/// considered past.
pub fn is_before(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match date {
        Some(d) => d < today,
        None => false,
    }
}
