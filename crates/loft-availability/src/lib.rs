//! # loft-availability
//!
//! Booking-calendar availability for short-term rental lofts.
//!
//! A property publishes its existing reservations as an iCal feed. This crate
//! turns that feed into a day-granular blocked set and mediates the check-in /
//! check-out clicks of a booking calendar against it, so that a committed
//! range never spans an occupied night and never starts in the past.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use loft_availability::{parse_feed, AvailabilityResolver, SelectionResult};
//!
//! let feed = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nDTSTART;VALUE=DATE:20240510\r\n\
//!             DTEND;VALUE=DATE:20240513\r\nSUMMARY:Reserved\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//! let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//!
//! let mut resolver = AvailabilityResolver::new();
//! resolver.load_blocked(&parse_feed(feed));
//!
//! let may = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
//! assert!(!resolver.is_selectable(may(11), today));
//! assert!(matches!(resolver.select_day(may(2), today), SelectionResult::RangeStarted { .. }));
//! assert!(matches!(resolver.select_day(may(6), today), SelectionResult::RangeCompleted { .. }));
//! ```
//!
//! ## Modules
//!
//! - [`feed`]: iCal text → list of [`BusyInterval`]s (never fails)
//! - [`blocked`]: [`BlockedDateSet`], the day-granular expansion of busy intervals
//! - [`resolver`]: [`AvailabilityResolver`], the date-selection state machine
//! - [`booking`]: guest counts, stay quotes, and outbound reservation links
//! - [`day`]: normalization of date strings to `NaiveDate`, day walking
//! - [`error`]: Error types

pub mod blocked;
pub mod booking;
pub mod day;
pub mod error;
pub mod feed;
pub mod resolver;

pub use blocked::{BlockedDateSet, DayRun};
pub use booking::{reservation_url, GuestCount, StayQuote, DEFAULT_MAX_GUESTS};
pub use day::parse_day;
pub use error::AvailabilityError;
pub use feed::{parse_feed, parse_feed_with, BusyInterval, DtEndPolicy, FeedOptions};
pub use resolver::{
    AvailabilityResolver, ReseedPolicy, SelectionRange, SelectionResult, SelectionState,
};
