//! Tests for the blocked-date set and its run folding.

use chrono::NaiveDate;
use loft_availability::blocked::{BlockedDateSet, DayRun};
use loft_availability::feed::BusyInterval;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn busy(start: NaiveDate, end: NaiveDate) -> BusyInterval {
    BusyInterval::new(start, end, "Reserved")
}

fn run(start: NaiveDate, end: NaiveDate) -> DayRun {
    DayRun {
        start,
        end,
        days: (end - start).num_days() + 1,
    }
}

#[test]
fn overlapping_intervals_expand_to_distinct_days() {
    let set = BlockedDateSet::from_intervals(&[
        busy(ymd(2024, 3, 10), ymd(2024, 3, 14)),
        busy(ymd(2024, 3, 12), ymd(2024, 3, 16)),
    ]);

    assert_eq!(set.len(), 7);
    assert!(set.contains(ymd(2024, 3, 16)));
    assert!(!set.contains(ymd(2024, 3, 17)));
}

#[test]
fn empty_set_blocks_nothing() {
    let set = BlockedDateSet::new();

    assert!(set.is_empty());
    assert_eq!(set.first_blocked_between(ymd(2024, 1, 1), ymd(2024, 12, 31)), None);
    assert!(set.blocked_runs().is_empty());
}

#[test]
fn sorted_days_are_ascending_across_year_boundary() {
    let set = BlockedDateSet::from_intervals(&[
        busy(ymd(2025, 1, 2), ymd(2025, 1, 2)),
        busy(ymd(2024, 12, 30), ymd(2024, 12, 31)),
    ]);

    assert_eq!(
        set.sorted_days(),
        vec![ymd(2024, 12, 30), ymd(2024, 12, 31), ymd(2025, 1, 2)]
    );
}

#[test]
fn first_blocked_between_is_inclusive_on_both_ends() {
    let set = BlockedDateSet::from_intervals(&[busy(ymd(2024, 3, 15), ymd(2024, 3, 15))]);

    assert_eq!(
        set.first_blocked_between(ymd(2024, 3, 10), ymd(2024, 3, 15)),
        Some(ymd(2024, 3, 15))
    );
    assert_eq!(
        set.first_blocked_between(ymd(2024, 3, 15), ymd(2024, 3, 20)),
        Some(ymd(2024, 3, 15))
    );
    assert_eq!(set.first_blocked_between(ymd(2024, 3, 10), ymd(2024, 3, 14)), None);
}

#[test]
fn adjacent_intervals_fold_into_one_run() {
    let set = BlockedDateSet::from_intervals(&[
        busy(ymd(2024, 3, 10), ymd(2024, 3, 12)),
        busy(ymd(2024, 3, 13), ymd(2024, 3, 14)),
        busy(ymd(2024, 3, 20), ymd(2024, 3, 20)),
    ]);

    assert_eq!(
        set.blocked_runs(),
        vec![
            run(ymd(2024, 3, 10), ymd(2024, 3, 14)),
            run(ymd(2024, 3, 20), ymd(2024, 3, 20)),
        ]
    );
}

#[test]
fn free_runs_fill_the_gaps_inside_the_window() {
    let set = BlockedDateSet::from_intervals(&[
        busy(ymd(2024, 3, 5), ymd(2024, 3, 7)),
        busy(ymd(2024, 3, 10), ymd(2024, 3, 10)),
    ]);

    let free = set.free_runs(ymd(2024, 3, 1), ymd(2024, 3, 31));

    assert_eq!(
        free,
        vec![
            run(ymd(2024, 3, 1), ymd(2024, 3, 4)),
            run(ymd(2024, 3, 8), ymd(2024, 3, 9)),
            run(ymd(2024, 3, 11), ymd(2024, 3, 31)),
        ]
    );
}

#[test]
fn free_runs_clip_runs_that_straddle_the_window() {
    let set = BlockedDateSet::from_intervals(&[
        busy(ymd(2024, 2, 25), ymd(2024, 3, 2)),
        busy(ymd(2024, 3, 28), ymd(2024, 4, 5)),
    ]);

    let free = set.free_runs(ymd(2024, 3, 1), ymd(2024, 3, 31));

    assert_eq!(free, vec![run(ymd(2024, 3, 3), ymd(2024, 3, 27))]);
}

#[test]
fn free_runs_of_a_fully_blocked_or_reversed_window_are_empty() {
    let set = BlockedDateSet::from_intervals(&[busy(ymd(2024, 3, 1), ymd(2024, 3, 31))]);

    assert!(set.free_runs(ymd(2024, 3, 5), ymd(2024, 3, 20)).is_empty());
    assert!(set.free_runs(ymd(2024, 3, 20), ymd(2024, 3, 5)).is_empty());
}

#[test]
fn free_runs_without_blocks_cover_the_whole_window() {
    let set = BlockedDateSet::new();

    assert_eq!(
        set.free_runs(ymd(2024, 3, 1), ymd(2024, 3, 1)),
        vec![run(ymd(2024, 3, 1), ymd(2024, 3, 1))]
    );
}

#[test]
fn windowed_expansion_clips_open_ended_blocks() {
    let intervals = [
        busy(ymd(1, 1, 1), ymd(9999, 12, 31)),
        busy(ymd(2023, 1, 1), ymd(2023, 1, 5)),
    ];

    let set = BlockedDateSet::from_intervals_within(&intervals, ymd(2024, 3, 1), ymd(2024, 3, 31));

    assert_eq!(set.len(), 31);
    assert!(!set.contains(ymd(2024, 2, 29)));
    assert!(!set.contains(ymd(2024, 4, 1)));
    assert_eq!(set.blocked_runs(), vec![run(ymd(2024, 3, 1), ymd(2024, 3, 31))]);
}

#[test]
fn windowed_expansion_matches_full_expansion_inside_the_window() {
    let intervals = [
        busy(ymd(2024, 2, 25), ymd(2024, 3, 2)),
        busy(ymd(2024, 3, 10), ymd(2024, 3, 12)),
        busy(ymd(2024, 3, 28), ymd(2024, 4, 5)),
    ];
    let (from, to) = (ymd(2024, 3, 1), ymd(2024, 3, 31));

    let full = BlockedDateSet::from_intervals(&intervals);
    let windowed = BlockedDateSet::from_intervals_within(&intervals, from, to);

    assert_eq!(windowed.free_runs(from, to), full.free_runs(from, to));
    assert!(BlockedDateSet::from_intervals_within(&intervals, to, from).is_empty());
}

#[test]
fn collects_from_an_iterator_of_days() {
    let set: BlockedDateSet = [ymd(2024, 3, 1), ymd(2024, 3, 1), ymd(2024, 3, 2)]
        .into_iter()
        .collect();

    assert_eq!(set.len(), 2);
}
