//! Check-in / check-out selection against a blocked-date set.
//!
//! [`AvailabilityResolver`] is the state machine behind a booking calendar.
//! Each click either starts a range, completes it, or is rejected because the
//! range would span an occupied day:
//!
//! ```text
//! EMPTY          --select_day(valid d)-------------------> START_SET(start=d)
//! START_SET      --select_day(d > start, clean range)----> RANGE_COMPLETE(start, end=d)
//! START_SET      --select_day(d > start, blocked inside)-> START_SET(start=d)   re-seed
//! START_SET      --select_day(d <= start)----------------> START_SET(start=d)   re-seed
//! RANGE_COMPLETE --select_day(any valid d)---------------> START_SET(start=d)
//! any            --reset()-------------------------------> EMPTY
//! ```
//!
//! Clicks on a past or blocked day never change state. "Today" is always a
//! parameter, so the resolver never reads the wall clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blocked::BlockedDateSet;
use crate::day::nights_between;
use crate::feed::BusyInterval;

/// Where the selection state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionState {
    #[default]
    Empty,
    StartSet,
    RangeComplete,
}

/// The guest's in-progress or committed stay.
///
/// When both ends are set, `start < end` and every day from `start` to `end`
/// is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SelectionRange {
    pub fn state(&self) -> SelectionState {
        match (self.start, self.end) {
            (None, _) => SelectionState::Empty,
            (Some(_), None) => SelectionState::StartSet,
            (Some(_), Some(_)) => SelectionState::RangeComplete,
        }
    }

    /// `(check_in, check_out)` once the range is committed.
    pub fn complete(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    pub fn is_complete(&self) -> bool {
        self.complete().is_some()
    }

    /// Nights between check-in and check-out, once committed.
    pub fn nights(&self) -> Option<i64> {
        self.complete()
            .map(|(check_in, check_out)| nights_between(check_in, check_out))
    }

    fn touches(&self, blocked: &BlockedDateSet) -> bool {
        match (self.start, self.end) {
            (None, _) => false,
            (Some(start), None) => blocked.contains(start),
            (Some(start), Some(end)) => blocked.first_blocked_between(start, end).is_some(),
        }
    }
}

/// Outcome of a single date click, rendered by the UI as feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SelectionResult {
    /// A new range was started at `start`.
    RangeStarted { start: NaiveDate },
    /// The range `start..end` was committed.
    RangeCompleted { start: NaiveDate, end: NaiveDate },
    /// The attempted range spans `first_blocked`. Selection continues from
    /// `start`, as decided by the resolver's [`ReseedPolicy`].
    RejectedContainsBlocked {
        first_blocked: NaiveDate,
        start: NaiveDate,
    },
    /// The day is in the past or occupied; nothing changed.
    IgnoredUnselectable { day: NaiveDate },
}

/// What becomes the range start after a rejected completion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReseedPolicy {
    /// Restart the range from the clicked day, so the guest can keep going
    /// from where they clicked.
    #[default]
    ClickedDay,
    /// Keep the previous start and let the guest pick another end.
    KeepStart,
}

/// Owns one property's blocked days and one booking session's selection.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityResolver {
    blocked: BlockedDateSet,
    range: SelectionRange,
    policy: ReseedPolicy,
}

impl AvailabilityResolver {
    /// A resolver with nothing blocked and an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ReseedPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> ReseedPolicy {
        self.policy
    }

    pub fn blocked(&self) -> &BlockedDateSet {
        &self.blocked
    }

    /// Replace the blocked set wholesale (no merge with the previous one).
    ///
    /// A selection that now touches a blocked day is discarded.
    pub fn load_blocked(&mut self, intervals: &[BusyInterval]) {
        self.blocked = BlockedDateSet::from_intervals(intervals);
        if self.range.touches(&self.blocked) {
            debug!(
                start = ?self.range.start,
                end = ?self.range.end,
                "selection overlaps newly blocked days, resetting"
            );
            self.range = SelectionRange::default();
        }
        debug!(
            intervals = intervals.len(),
            blocked_days = self.blocked.len(),
            "loaded blocked days"
        );
    }

    /// A day can be picked if it is not before `today` and not occupied.
    /// Same-day check-in is allowed.
    pub fn is_selectable(&self, day: NaiveDate, today: NaiveDate) -> bool {
        day >= today && !self.blocked.contains(day)
    }

    /// Advance the selection with a click on `day`.
    pub fn select_day(&mut self, day: NaiveDate, today: NaiveDate) -> SelectionResult {
        if !self.is_selectable(day, today) {
            debug!(%day, %today, "ignoring click on unselectable day");
            return SelectionResult::IgnoredUnselectable { day };
        }

        let start = match (self.range.start, self.range.end) {
            (Some(start), None) if day > start => start,
            _ => return self.start_at(day),
        };

        if let Some(first_blocked) = self.blocked.first_blocked_between(start, day) {
            let start = match self.policy {
                ReseedPolicy::ClickedDay => {
                    self.range = SelectionRange {
                        start: Some(day),
                        end: None,
                    };
                    day
                }
                ReseedPolicy::KeepStart => start,
            };
            debug!(%first_blocked, %start, "range spans a blocked day, rejected");
            return SelectionResult::RejectedContainsBlocked {
                first_blocked,
                start,
            };
        }

        self.range.end = Some(day);
        debug!(%start, end = %day, "range completed");
        SelectionResult::RangeCompleted { start, end: day }
    }

    /// Back to an empty selection.
    pub fn reset(&mut self) {
        self.range = SelectionRange::default();
    }

    pub fn current_range(&self) -> SelectionRange {
        self.range
    }

    pub fn state(&self) -> SelectionState {
        self.range.state()
    }

    fn start_at(&mut self, day: NaiveDate) -> SelectionResult {
        self.range = SelectionRange {
            start: Some(day),
            end: None,
        };
        debug!(%day, "range started");
        SelectionResult::RangeStarted { start: day }
    }
}
