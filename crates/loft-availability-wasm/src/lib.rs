//! WASM bindings for loft-availability.
//!
//! Exposes feed parsing, reservation links, and the date-selection state
//! machine to the booking calendar in the browser via `wasm-bindgen`. Days
//! cross the boundary as `YYYY-MM-DD` strings and structured results as JSON
//! strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p loft-availability-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/loft_availability_wasm.wasm
//! ```
//!
//! ## Usage from JavaScript
//!
//! ```js
//! const calendar = new AvailabilityCalendar();
//! calendar.loadFeed(await (await fetch(icalUrl)).text());
//! calendar.selectDay("2024-05-06", today); // {"status":"range-started",...}
//! calendar.selectDay("2024-05-09", today); // {"status":"range-completed",...}
//! location.href = reservationUrl(bookingUrl, "2024-05-06", "2024-05-09", 2, 0, 0);
//! ```

use chrono::NaiveDate;
use loft_availability::{
    AvailabilityResolver, BusyInterval, DtEndPolicy, FeedOptions, GuestCount, ReseedPolicy,
    SelectionRange, DEFAULT_MAX_GUESTS,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RangeDto {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    nights: Option<i64>,
}

impl From<SelectionRange> for RangeDto {
    fn from(range: SelectionRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
            nights: range.nights(),
        }
    }
}

/// Busy interval supplied by JavaScript, e.g. from a cached feed.
#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
    #[serde(default)]
    label: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_day(s: &str) -> Result<NaiveDate, JsValue> {
    loft_availability::parse_day(s).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_intervals_json(json: &str) -> Result<Vec<BusyInterval>, JsValue> {
    let inputs: Vec<IntervalInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid intervals JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_day(&input.start)?;
            let end = parse_day(&input.end)?;
            Ok(BusyInterval::new(start, end, input.label))
        })
        .collect()
}

fn feed_options(inclusive_end: Option<bool>) -> FeedOptions {
    FeedOptions {
        dtend: if inclusive_end.unwrap_or(false) {
            DtEndPolicy::Inclusive
        } else {
            DtEndPolicy::Exclusive
        },
        ..FeedOptions::default()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Parse iCal feed text into busy intervals.
///
/// Returns a JSON array of `{start, end, label}` objects with inclusive
/// `YYYY-MM-DD` days. Unreadable feeds yield `[]`.
///
/// # Arguments
/// - `ics` -- raw feed text
/// - `inclusive_end` -- treat `DTEND` as the last occupied day (default `false`)
#[wasm_bindgen(js_name = "parseFeed")]
pub fn parse_feed(ics: &str, inclusive_end: Option<bool>) -> Result<String, JsValue> {
    let intervals = loft_availability::parse_feed_with(ics, &feed_options(inclusive_end));
    to_json(&intervals)
}

/// Build the booking-provider URL for a stay.
///
/// Dates are only included when both `check_in` and `check_out` are given.
/// `max_guests` defaults to 4.
#[wasm_bindgen(js_name = "reservationUrl")]
pub fn reservation_url(
    base: &str,
    check_in: Option<String>,
    check_out: Option<String>,
    adults: u32,
    children: u32,
    infants: u32,
    max_guests: Option<u32>,
) -> Result<String, JsValue> {
    let range = match (check_in.as_deref(), check_out.as_deref()) {
        (Some(check_in), Some(check_out)) => {
            let start = parse_day(check_in)?;
            let end = parse_day(check_out)?;
            if start >= end {
                return Err(JsValue::from_str(&format!(
                    "Check-in {} must be before check-out {}",
                    start, end
                )));
            }
            SelectionRange {
                start: Some(start),
                end: Some(end),
            }
        }
        _ => SelectionRange::default(),
    };

    let guests = GuestCount::new(
        adults,
        children,
        infants,
        max_guests.unwrap_or(DEFAULT_MAX_GUESTS),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    loft_availability::reservation_url(base, &range, &guests)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// One property's booking calendar: its blocked days plus the guest's
/// check-in / check-out selection.
#[wasm_bindgen]
pub struct AvailabilityCalendar {
    resolver: AvailabilityResolver,
}

#[wasm_bindgen]
impl AvailabilityCalendar {
    /// `keep_start` keeps the previous check-in when a range is rejected
    /// instead of restarting from the clicked day.
    #[wasm_bindgen(constructor)]
    pub fn new(keep_start: Option<bool>) -> AvailabilityCalendar {
        let policy = if keep_start.unwrap_or(false) {
            ReseedPolicy::KeepStart
        } else {
            ReseedPolicy::ClickedDay
        };
        AvailabilityCalendar {
            resolver: AvailabilityResolver::with_policy(policy),
        }
    }

    /// Replace the blocked days with those of a freshly fetched feed.
    /// Returns the number of busy intervals found.
    #[wasm_bindgen(js_name = "loadFeed")]
    pub fn load_feed(&mut self, ics: &str, inclusive_end: Option<bool>) -> usize {
        let intervals = loft_availability::parse_feed_with(ics, &feed_options(inclusive_end));
        self.resolver.load_blocked(&intervals);
        intervals.len()
    }

    /// Replace the blocked days from a JSON array of `{start, end, label?}`.
    #[wasm_bindgen(js_name = "loadBlocked")]
    pub fn load_blocked(&mut self, intervals_json: &str) -> Result<(), JsValue> {
        let intervals = parse_intervals_json(intervals_json)?;
        self.resolver.load_blocked(&intervals);
        Ok(())
    }

    #[wasm_bindgen(js_name = "isSelectable")]
    pub fn is_selectable(&self, day: &str, today: &str) -> Result<bool, JsValue> {
        Ok(self
            .resolver
            .is_selectable(parse_day(day)?, parse_day(today)?))
    }

    /// Click on `day`. Returns the outcome as JSON, tagged by `status`:
    /// `range-started`, `range-completed`, `rejected-contains-blocked` or
    /// `ignored-unselectable`.
    #[wasm_bindgen(js_name = "selectDay")]
    pub fn select_day(&mut self, day: &str, today: &str) -> Result<String, JsValue> {
        let result = self.resolver.select_day(parse_day(day)?, parse_day(today)?);
        to_json(&result)
    }

    pub fn reset(&mut self) {
        self.resolver.reset();
    }

    /// `{start, end, nights}`, with nulls for unset parts.
    #[wasm_bindgen(js_name = "currentRange")]
    pub fn current_range(&self) -> Result<String, JsValue> {
        to_json(&RangeDto::from(self.resolver.current_range()))
    }

    /// `"EMPTY"`, `"START_SET"` or `"RANGE_COMPLETE"`.
    pub fn state(&self) -> Result<String, JsValue> {
        to_json(&self.resolver.state())
    }

    /// Blocked runs overlapping `from..=to`, as a JSON array of
    /// `{start, end, days}`.
    #[wasm_bindgen(js_name = "blockedRuns")]
    pub fn blocked_runs(&self, from: &str, to: &str) -> Result<String, JsValue> {
        let from = parse_day(from)?;
        let to = parse_day(to)?;
        let runs: Vec<_> = self
            .resolver
            .blocked()
            .blocked_runs()
            .into_iter()
            .filter(|run| run.end >= from && run.start <= to)
            .collect();
        to_json(&runs)
    }

    /// Free runs within `from..=to`, as a JSON array of `{start, end, days}`.
    #[wasm_bindgen(js_name = "freeRuns")]
    pub fn free_runs(&self, from: &str, to: &str) -> Result<String, JsValue> {
        let runs = self
            .resolver
            .blocked()
            .free_runs(parse_day(from)?, parse_day(to)?);
        to_json(&runs)
    }
}

impl Default for AvailabilityCalendar {
    fn default() -> Self {
        Self::new(None)
    }
}
