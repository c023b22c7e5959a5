//! Day-granular blocked set derived from busy intervals.
//!
//! Busy intervals may overlap or touch; expanding them into individual days
//! makes membership a single hash lookup and makes overlaps irrelevant. The
//! run helpers fold the set back into ranges for calendar rendering, merging
//! consecutive days the same way overlapping busy periods are merged.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::day::days_inclusive;
use crate::feed::BusyInterval;

/// A maximal run of consecutive days (both ends inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRun {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

impl DayRun {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            days: (end - start).num_days() + 1,
        }
    }
}

/// The set of occupied calendar days for one property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedDateSet {
    days: HashSet<NaiveDate>,
}

impl BlockedDateSet {
    /// An empty set: every day is free.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand every interval into its constituent days.
    ///
    /// Cost is linear in the total number of days covered, with no cap: a
    /// feed event spanning `00010101`..`99991231` expands to about 3.6M
    /// days. Use [`from_intervals_within`](Self::from_intervals_within) when
    /// only a bounded window is ever queried.
    pub fn from_intervals(intervals: &[BusyInterval]) -> Self {
        let days = intervals.iter().flat_map(BusyInterval::days).collect();
        Self { days }
    }

    /// Like [`from_intervals`](Self::from_intervals), keeping only days in
    /// `window_start..=window_end`. Each interval is clipped before it is
    /// expanded, so the work is bounded by the window length.
    pub fn from_intervals_within(
        intervals: &[BusyInterval],
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Self {
        let days = intervals
            .iter()
            .filter(|i| i.end >= window_start && i.start <= window_end)
            .flat_map(|i| days_inclusive(i.start.max(window_start), i.end.min(window_end)))
            .collect();
        Self { days }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// All blocked days in ascending order.
    pub fn sorted_days(&self) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self.days.iter().copied().collect();
        days.sort_unstable();
        days
    }

    /// First blocked day in `start..=end`, if any.
    pub fn first_blocked_between(&self, start: NaiveDate, end: NaiveDate) -> Option<NaiveDate> {
        if self.days.is_empty() {
            return None;
        }
        days_inclusive(start, end).find(|d| self.contains(*d))
    }

    /// Blocked days folded into maximal runs of consecutive days, sorted.
    pub fn blocked_runs(&self) -> Vec<DayRun> {
        let mut runs: Vec<DayRun> = Vec::new();
        for day in self.sorted_days() {
            if let Some(last) = runs.last_mut() {
                if last.end.succ_opt() == Some(day) {
                    // Adjacent, extend the current run.
                    *last = DayRun::new(last.start, day);
                    continue;
                }
            }
            runs.push(DayRun::new(day, day));
        }
        runs
    }

    /// Maximal runs of unblocked days within `window_start..=window_end`.
    ///
    /// Returns an empty list when the window is reversed.
    pub fn free_runs(&self, window_start: NaiveDate, window_end: NaiveDate) -> Vec<DayRun> {
        if window_start > window_end {
            return Vec::new();
        }

        let mut free = Vec::new();
        let mut cursor = Some(window_start);

        for run in self.blocked_runs() {
            if run.end < window_start || run.start > window_end {
                continue;
            }
            let Some(from) = cursor else { break };
            if from < run.start {
                if let Some(until) = run.start.pred_opt() {
                    free.push(DayRun::new(from, until));
                }
            }
            cursor = if from > run.end { Some(from) } else { run.end.succ_opt() };
        }

        // Trailing free run after the last blocked run.
        if let Some(from) = cursor {
            if from <= window_end {
                free.push(DayRun::new(from, window_end));
            }
        }

        free
    }
}

impl FromIterator<NaiveDate> for BlockedDateSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}
