//! Calendar feed parsing: iCal text → busy intervals.
//!
//! Booking platforms export a property's reservations as an iCalendar feed,
//! one `VEVENT` per stay. This module reads such a document with the
//! `icalendar` crate's parser and reduces each event to a closed range of
//! calendar days.
//!
//! Parsing never fails. A document that cannot be read as a calendar produces
//! an empty list, which callers treat as "no known bookings" (fail-open toward
//! availability). Individual events without a usable `DTSTART` are skipped
//! while the rest of the feed is kept.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use icalendar::parser::{read_calendar, unfold, Component, Property};
use icalendar::{CalendarDateTime, DatePerhapsTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::day::{days_inclusive, previous_day};

/// Label used when an event has no `SUMMARY` (or a blank one).
pub const DEFAULT_LABEL: &str = "Busy";

/// A closed range of occupied calendar days extracted from a feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusyInterval {
    /// First occupied day (inclusive).
    pub start: NaiveDate,
    /// Last occupied day (inclusive).
    pub end: NaiveDate,
    /// Human-readable reason, e.g. "Reserved".
    pub label: String,
}

impl BusyInterval {
    /// Build an interval, ordering the endpoints so that `start <= end` and
    /// substituting [`DEFAULT_LABEL`] for a blank label.
    pub fn new(start: NaiveDate, end: NaiveDate, label: impl Into<String>) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let label = label.into();
        let label = if label.trim().is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            label.trim().to_string()
        };
        Self { start, end, label }
    }

    /// Whether `day` falls inside the interval.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Every occupied day, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        days_inclusive(self.start, self.end)
    }

    /// Number of occupied days (always at least 1).
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// How a `DTEND` value maps onto the last occupied day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DtEndPolicy {
    /// RFC 5545 semantics: `DTEND` is the first day *not* covered. A stay with
    /// `DTSTART:20240510` / `DTEND:20240513` occupies the 10th to the 12th, and
    /// the check-out day stays free for the next guest's check-in. A date-time
    /// `DTEND` later than midnight still occupies its own day.
    #[default]
    Exclusive,
    /// Treat the `DTEND` day itself as occupied.
    Inclusive,
}

/// Options for [`parse_feed_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedOptions {
    /// Interpretation of `DTEND`.
    pub dtend: DtEndPolicy,
    /// Keep events marked `STATUS:CANCELLED` (skipped by default).
    pub keep_cancelled: bool,
    /// Keep events marked `TRANSP:TRANSPARENT` (skipped by default).
    pub keep_transparent: bool,
}

/// Parse a calendar feed with default [`FeedOptions`].
///
/// Returns an empty list for empty, truncated or non-iCal input.
pub fn parse_feed(raw: &str) -> Vec<BusyInterval> {
    parse_feed_with(raw, &FeedOptions::default())
}

/// Parse a calendar feed into busy intervals, in document order.
pub fn parse_feed_with(raw: &str, options: &FeedOptions) -> Vec<BusyInterval> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    if raw.trim().is_empty() {
        debug!("empty calendar feed, no busy intervals");
        return Vec::new();
    }

    let normalized = normalize_names(&unfold(raw));
    let calendar = match read_calendar(&normalized) {
        Ok(calendar) => calendar,
        Err(error) => {
            warn!(%error, "calendar feed is not a readable iCalendar document, treating as fully available");
            return Vec::new();
        }
    };

    let mut events = Vec::new();
    collect_events(&calendar.components, &mut events);

    let intervals: Vec<BusyInterval> = events
        .iter()
        .filter_map(|event| interval_from_event(event, options))
        .collect();

    debug!(
        events = events.len(),
        intervals = intervals.len(),
        "parsed calendar feed"
    );
    intervals
}

/// Upper-case every content-line name and parameter name, and the component
/// name on `BEGIN`/`END` lines.
///
/// Names are case-insensitive in iCalendar, but the parser pairs `END:` with
/// the exact text of its `BEGIN:` and properties are looked up by their
/// upper-case names. Values, including parameter values such as `TZID`, are
/// left untouched.
fn normalize_names(unfolded: &str) -> String {
    let mut out = String::with_capacity(unfolded.len());
    for line in unfolded.lines() {
        normalize_line(line, &mut out);
        out.push('\n');
    }
    out
}

fn normalize_line(line: &str, out: &mut String) {
    if let Some((name, value)) = line.split_once(':') {
        if name.eq_ignore_ascii_case("BEGIN") || name.eq_ignore_ascii_case("END") {
            out.push_str(&name.to_ascii_uppercase());
            out.push(':');
            out.push_str(&value.trim().to_ascii_uppercase());
            return;
        }
    }

    let mut in_quotes = false;
    let mut in_key = true;
    for (i, c) in line.char_indices() {
        if in_quotes {
            in_quotes = c != '"';
            out.push(c);
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                out.push(c);
            }
            // Start of the value: copy the rest verbatim.
            ':' => {
                out.push_str(&line[i..]);
                return;
            }
            ';' => {
                in_key = true;
                out.push(c);
            }
            '=' => {
                in_key = false;
                out.push(c);
            }
            _ if in_key => out.push(c.to_ascii_uppercase()),
            _ => out.push(c),
        }
    }
}

/// Gather `VEVENT`s at any nesting depth (the parser may or may not hand back
/// the enclosing `VCALENDAR` as a component).
fn collect_events<'c, 'a>(components: &'c [Component<'a>], out: &mut Vec<&'c Component<'a>>) {
    for component in components {
        if component.name.as_ref().eq_ignore_ascii_case("VEVENT") {
            out.push(component);
        } else {
            collect_events(&component.components, out);
        }
    }
}

fn interval_from_event(event: &Component<'_>, options: &FeedOptions) -> Option<BusyInterval> {
    let uid = event
        .find_prop("UID")
        .map(|p| p.val.as_ref().to_string())
        .unwrap_or_default();

    if !options.keep_cancelled && has_value(event, "STATUS", "CANCELLED") {
        debug!(%uid, "skipping cancelled event");
        return None;
    }
    if !options.keep_transparent && has_value(event, "TRANSP", "TRANSPARENT") {
        debug!(%uid, "skipping transparent event");
        return None;
    }

    let Some(start) = event.find_prop("DTSTART").and_then(boundary) else {
        warn!(%uid, "skipping event without a usable DTSTART");
        return None;
    };
    let end = event.find_prop("DTEND").and_then(boundary);

    // Reversed events are taken as the range they span.
    let (start, end) = match end {
        Some(end) if end.sort_key() < start.sort_key() => (end, Some(start)),
        other => (start, other),
    };

    let first = start.day();
    let last = match end {
        None => first,
        Some(end) => match options.dtend {
            DtEndPolicy::Inclusive => end.day(),
            DtEndPolicy::Exclusive => end.last_covered_day(),
        },
    };

    let label = event
        .find_prop("SUMMARY")
        .map(|p| p.val.as_ref().to_string())
        .unwrap_or_default();

    // An exclusive end equal to the start (zero-length event) still blocks
    // the start day.
    Some(BusyInterval::new(first, last.max(first), label))
}

fn has_value(event: &Component<'_>, name: &str, expected: &str) -> bool {
    event
        .find_prop(name)
        .is_some_and(|p| p.val.as_ref().trim().eq_ignore_ascii_case(expected))
}

/// A `DTSTART`/`DTEND` value with its time-of-day kept only long enough to
/// decide which day an exclusive end covers.
#[derive(Debug, Clone, Copy)]
enum Boundary {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Boundary {
    fn day(self) -> NaiveDate {
        match self {
            Boundary::Date(d) => d,
            Boundary::DateTime(dt) => dt.date(),
        }
    }

    fn last_covered_day(self) -> NaiveDate {
        match self {
            Boundary::Date(d) => previous_day(d),
            Boundary::DateTime(dt) if dt.time() == NaiveTime::MIN => previous_day(dt.date()),
            Boundary::DateTime(dt) => dt.date(),
        }
    }

    fn sort_key(self) -> NaiveDateTime {
        match self {
            Boundary::Date(d) => d.and_time(NaiveTime::MIN),
            Boundary::DateTime(dt) => dt,
        }
    }
}

/// UTC values keep their UTC calendar day; floating and `TZID` values keep
/// their wall-clock day.
fn boundary(prop: &Property<'_>) -> Option<Boundary> {
    match DatePerhapsTime::try_from(prop).ok()? {
        DatePerhapsTime::Date(d) => Some(Boundary::Date(d)),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => Some(Boundary::DateTime(dt.naive_utc())),
            CalendarDateTime::Floating(naive) => Some(Boundary::DateTime(naive)),
            CalendarDateTime::WithTimezone { date_time, .. } => {
                Some(Boundary::DateTime(date_time))
            }
        },
    }
}
