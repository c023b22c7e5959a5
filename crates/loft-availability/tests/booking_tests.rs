//! Tests for guest counts, stay quotes, and reservation links.

use chrono::NaiveDate;
use loft_availability::booking::{reservation_url, GuestCount, StayQuote, DEFAULT_MAX_GUESTS};
use loft_availability::resolver::SelectionRange;
use loft_availability::AvailabilityError;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(start: NaiveDate, end: NaiveDate) -> SelectionRange {
    SelectionRange {
        start: Some(start),
        end: Some(end),
    }
}

const ROOM: &str = "https://www.airbnb.com.br/rooms/1553101057890730646";

// ── GuestCount ──────────────────────────────────────────────────────────────

#[test]
fn default_guest_count_is_one_adult() {
    let guests = GuestCount::default();
    assert_eq!(guests.adults(), 1);
    assert_eq!(guests.children(), 0);
    assert_eq!(guests.infants(), 0);
}

#[test]
fn infants_do_not_count_toward_capacity() {
    let guests = GuestCount::new(2, 2, 3, DEFAULT_MAX_GUESTS).unwrap();
    assert_eq!(guests.headcount(), 4);
    assert_eq!(guests.infants(), 3);
}

#[test]
fn guest_count_requires_an_adult_and_respects_capacity() {
    assert!(matches!(
        GuestCount::new(0, 2, 0, DEFAULT_MAX_GUESTS),
        Err(AvailabilityError::InvalidGuests(_))
    ));
    assert!(matches!(
        GuestCount::new(3, 2, 0, DEFAULT_MAX_GUESTS),
        Err(AvailabilityError::InvalidGuests(_))
    ));
    assert!(GuestCount::new(6, 0, 0, 6).is_ok());
}

#[test]
fn guest_count_rejects_a_headcount_that_overflows() {
    assert!(matches!(
        GuestCount::new(1, u32::MAX, 0, u32::MAX),
        Err(AvailabilityError::InvalidGuests(_))
    ));

    let largest = GuestCount::new(1, u32::MAX - 1, 0, u32::MAX).unwrap();
    assert_eq!(largest.headcount(), u32::MAX);
}

// ── reservation_url ─────────────────────────────────────────────────────────

#[test]
fn committed_range_adds_iso_dates_then_guests() {
    let guests = GuestCount::new(2, 1, 0, DEFAULT_MAX_GUESTS).unwrap();

    let url = reservation_url(ROOM, &range(ymd(2024, 4, 1), ymd(2024, 4, 5)), &guests).unwrap();

    assert_eq!(
        url,
        format!("{ROOM}?check_in=2024-04-01&check_out=2024-04-05&adults=2&children=1")
    );
}

#[test]
fn incomplete_range_omits_date_parameters() {
    let pending = SelectionRange {
        start: Some(ymd(2024, 4, 1)),
        end: None,
    };

    let url = reservation_url(ROOM, &pending, &GuestCount::default()).unwrap();
    assert_eq!(url, format!("{ROOM}?adults=1"));

    let url = reservation_url(ROOM, &SelectionRange::default(), &GuestCount::default()).unwrap();
    assert_eq!(url, format!("{ROOM}?adults=1"));
}

#[test]
fn infants_are_appended_when_present() {
    let guests = GuestCount::new(1, 0, 1, DEFAULT_MAX_GUESTS).unwrap();

    let url = reservation_url(ROOM, &SelectionRange::default(), &guests).unwrap();

    assert_eq!(url, format!("{ROOM}?adults=1&infants=1"));
}

#[test]
fn existing_query_parameters_are_kept() {
    let base = format!("{ROOM}?source_impression_id=p3");

    let url = reservation_url(
        &base,
        &range(ymd(2024, 12, 30), ymd(2025, 1, 2)),
        &GuestCount::default(),
    )
    .unwrap();

    assert_eq!(
        url,
        format!("{base}&check_in=2024-12-30&check_out=2025-01-02&adults=1")
    );
}

#[test]
fn invalid_or_non_http_base_is_rejected() {
    for base in ["", "rooms/123", "mailto:host@example.com", "ftp://example.com/room"] {
        assert!(
            matches!(
                reservation_url(base, &SelectionRange::default(), &GuestCount::default()),
                Err(AvailabilityError::InvalidUrl { .. })
            ),
            "base {base:?}"
        );
    }
}

// ── StayQuote ───────────────────────────────────────────────────────────────

#[test]
fn quote_multiplies_nights_by_nightly_price() {
    let quote = StayQuote::new(&range(ymd(2024, 2, 27), ymd(2024, 3, 2)), 250);

    assert_eq!(quote.nights, 4);
    assert_eq!(quote.nightly_price, 250);
    assert_eq!(quote.total, 1000);
}

#[test]
fn incomplete_range_quotes_zero() {
    let quote = StayQuote::new(&SelectionRange::default(), 250);

    assert_eq!(quote.nights, 0);
    assert_eq!(quote.total, 0);
}
