//! Calendar-day normalization.
//!
//! Every date entering the engine is reduced to a `NaiveDate` (a plain
//! year/month/day value) before it is compared or hashed, so two spellings of
//! the same day always land on the same key and time-of-day never leaks into
//! the arithmetic.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{AvailabilityError, Result};

/// Parse a day from the string forms a booking UI or a feed may hand us.
///
/// Accepted forms:
///
/// - `2024-05-10` (ISO calendar date)
/// - `20240510` (iCalendar `DATE`)
/// - `2024-05-10T22:30:00Z`, `2024-05-10T22:30:00-03:00` (RFC 3339)
/// - `2024-05-10T22:30:00`, `20240510T223000` (floating date-time)
///
/// Date-times are truncated to the calendar day *as written*; an offset never
/// moves the result onto a neighbouring day.
///
/// # Errors
/// Returns [`AvailabilityError::InvalidDate`] when none of the forms match.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    let s = input.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if s.len() == 8 {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Ok(d);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local().date());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y%m%dT%H%M%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    Err(AvailabilityError::InvalidDate(input.to_string()))
}

/// Iterate every day from `start` to `end`, both inclusive.
///
/// Yields nothing when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Number of nights between check-in and check-out (negative if reversed).
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// The day before `day`, saturating at the minimum representable date.
pub(crate) fn previous_day(day: NaiveDate) -> NaiveDate {
    day.pred_opt().unwrap_or(day)
}
