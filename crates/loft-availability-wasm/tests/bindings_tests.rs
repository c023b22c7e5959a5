//! Native tests for the WASM bindings through the `rlib` target.
//!
//! Only success paths run here: building a `JsValue` error needs a JS host.

use loft_availability_wasm::{parse_feed, reservation_url, AvailabilityCalendar};
use serde_json::Value;

const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Airbnb Inc//Hosting Calendar 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
DTSTART;VALUE=DATE:20240510\r\n\
DTEND;VALUE=DATE:20240513\r\n\
SUMMARY:Reserved\r\n\
UID:a1@airbnb.com\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

const TODAY: &str = "2024-05-01";

fn json(s: &str) -> Value {
    serde_json::from_str(s).unwrap()
}

// ── parseFeed ───────────────────────────────────────────────────────────────

#[test]
fn parse_feed_returns_inclusive_days() {
    let intervals = json(&parse_feed(FEED, None).unwrap());
    assert_eq!(
        intervals,
        json(r#"[{"start":"2024-05-10","end":"2024-05-12","label":"Reserved"}]"#)
    );

    let inclusive = json(&parse_feed(FEED, Some(true)).unwrap());
    assert_eq!(inclusive[0]["end"], "2024-05-13");
}

#[test]
fn parse_feed_of_garbage_is_empty() {
    assert_eq!(parse_feed("502 Bad Gateway", None).unwrap(), "[]");
}

// ── reservationUrl ──────────────────────────────────────────────────────────

#[test]
fn reservation_url_with_and_without_dates() {
    let base = "https://www.airbnb.com.br/rooms/1553101057890730646";

    let url = reservation_url(
        base,
        Some("2024-05-06".to_string()),
        Some("2024-05-09".to_string()),
        2,
        0,
        1,
        None,
    )
    .unwrap();
    assert_eq!(
        url,
        format!("{base}?check_in=2024-05-06&check_out=2024-05-09&adults=2&infants=1")
    );

    let url = reservation_url(base, Some("2024-05-06".to_string()), None, 1, 0, 0, None).unwrap();
    assert_eq!(url, format!("{base}?adults=1"));
}

// ── AvailabilityCalendar ────────────────────────────────────────────────────

#[test]
fn calendar_walks_the_selection_state_machine() {
    let mut calendar = AvailabilityCalendar::new(None);
    assert_eq!(calendar.load_feed(FEED, None), 1);
    assert_eq!(calendar.state().unwrap(), r#""EMPTY""#);

    assert!(!calendar.is_selectable("2024-05-11", TODAY).unwrap());
    assert!(calendar.is_selectable("2024-05-13", TODAY).unwrap());

    let started = json(&calendar.select_day("2024-05-06", TODAY).unwrap());
    assert_eq!(started["status"], "range-started");

    let rejected = json(&calendar.select_day("2024-05-14", TODAY).unwrap());
    assert_eq!(rejected["status"], "rejected-contains-blocked");
    assert_eq!(rejected["first_blocked"], "2024-05-10");

    let completed = json(&calendar.select_day("2024-05-16", TODAY).unwrap());
    assert_eq!(completed["status"], "range-completed");
    assert_eq!(
        json(&calendar.current_range().unwrap()),
        json(r#"{"start":"2024-05-14","end":"2024-05-16","nights":2}"#)
    );
    assert_eq!(calendar.state().unwrap(), r#""RANGE_COMPLETE""#);

    calendar.reset();
    assert_eq!(
        json(&calendar.current_range().unwrap()),
        json(r#"{"start":null,"end":null,"nights":null}"#)
    );
}

#[test]
fn keep_start_calendar_holds_check_in_after_rejection() {
    let mut calendar = AvailabilityCalendar::new(Some(true));
    calendar.load_feed(FEED, None);

    calendar.select_day("2024-05-06", TODAY).unwrap();
    let rejected = json(&calendar.select_day("2024-05-14", TODAY).unwrap());

    assert_eq!(rejected["start"], "2024-05-06");
    assert_eq!(json(&calendar.current_range().unwrap())["start"], "2024-05-06");
}

#[test]
fn load_blocked_replaces_feed_days() {
    let mut calendar = AvailabilityCalendar::default();
    calendar.load_feed(FEED, None);

    calendar
        .load_blocked(r#"[{"start":"2024-05-20","end":"2024-05-21"}]"#)
        .unwrap();

    assert!(calendar.is_selectable("2024-05-11", TODAY).unwrap());
    assert!(!calendar.is_selectable("2024-05-20", TODAY).unwrap());
}

#[test]
fn runs_are_reported_within_the_window() {
    let mut calendar = AvailabilityCalendar::default();
    calendar.load_feed(FEED, None);

    let blocked = json(&calendar.blocked_runs("2024-05-01", "2024-05-31").unwrap());
    assert_eq!(
        blocked,
        json(r#"[{"start":"2024-05-10","end":"2024-05-12","days":3}]"#)
    );

    let free = json(&calendar.free_runs("2024-05-08", "2024-05-15").unwrap());
    assert_eq!(
        free,
        json(
            r#"[{"start":"2024-05-08","end":"2024-05-09","days":2},
                {"start":"2024-05-13","end":"2024-05-15","days":3}]"#
        )
    );

    assert_eq!(calendar.blocked_runs("2024-06-01", "2024-06-30").unwrap(), "[]");
}
