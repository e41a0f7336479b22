//! Tests for the interval merge engine.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::{merge, Interval};

fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap()
}

/// Interval on 2026-03-16 from `start` to `end` given as (hour, minute).
fn iv(start: (u32, u32), end: (u32, u32)) -> Interval {
    Interval::new(at(16, start.0, start.1), at(16, end.0, end.1)).unwrap()
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(merge(&[]).is_empty());
}

#[test]
fn adjacent_intervals_coalesce() {
    // 09:00-10:00 and 10:00-11:00 → 09:00-11:00
    let merged = merge(&[iv((9, 0), (10, 0)), iv((10, 0), (11, 0))]);
    assert_eq!(merged, vec![iv((9, 0), (11, 0))]);
}

#[test]
fn overlapping_intervals_coalesce() {
    let merged = merge(&[iv((10, 0), (11, 30)), iv((11, 0), (12, 0))]);
    assert_eq!(merged, vec![iv((10, 0), (12, 0))]);
}

#[test]
fn disjoint_intervals_stay_separate_and_sorted() {
    let merged = merge(&[iv((14, 0), (15, 0)), iv((9, 0), (10, 0)), iv((12, 0), (13, 0))]);
    assert_eq!(
        merged,
        vec![iv((9, 0), (10, 0)), iv((12, 0), (13, 0)), iv((14, 0), (15, 0))]
    );
}

#[test]
fn contained_interval_does_not_shrink_coverage() {
    // The long interval starts first; the short one inside must not cut its end.
    let merged = merge(&[iv((9, 0), (17, 0)), iv((10, 0), (11, 0))]);
    assert_eq!(merged, vec![iv((9, 0), (17, 0))]);
}

#[test]
fn equal_starts_keep_the_furthest_end() {
    let merged = merge(&[iv((9, 0), (12, 0)), iv((9, 0), (10, 0)), iv((9, 0), (11, 0))]);
    assert_eq!(merged, vec![iv((9, 0), (12, 0))]);
}

#[test]
fn duplicates_collapse() {
    let merged = merge(&[iv((16, 0), (17, 0)), iv((16, 0), (17, 0)), iv((16, 0), (17, 0))]);
    assert_eq!(merged, vec![iv((16, 0), (17, 0))]);
}

#[test]
fn cascading_overlaps_chain_into_one_block() {
    let merged = merge(&[
        iv((9, 0), (10, 30)),
        iv((11, 0), (12, 0)),
        iv((10, 0), (11, 30)),
    ]);
    assert_eq!(merged, vec![iv((9, 0), (12, 0))]);
}

#[test]
fn multi_day_interval_absorbs_later_ones() {
    let long = Interval::new(at(16, 22, 0), at(18, 2, 0)).unwrap();
    let inside = Interval::new(at(17, 9, 0), at(17, 10, 0)).unwrap();
    let after = Interval::new(at(18, 1, 0), at(18, 3, 0)).unwrap();

    let merged = merge(&[inside, after, long]);
    assert_eq!(merged, vec![Interval::new(at(16, 22, 0), at(18, 3, 0)).unwrap()]);
}

#[test]
fn zero_length_interval_touching_a_block_is_absorbed() {
    let merged = merge(&[Interval::point(at(16, 10, 0)), iv((9, 0), (10, 0))]);
    assert_eq!(merged, vec![iv((9, 0), (10, 0))]);
}

#[test]
fn merging_twice_changes_nothing() {
    let input = [
        iv((13, 0), (14, 0)),
        iv((9, 0), (10, 0)),
        iv((9, 30), (11, 0)),
        iv((11, 0), (11, 15)),
        iv((16, 0), (16, 30)),
    ];
    let once = merge(&input);
    assert_eq!(merge(&once), once);
    assert_eq!(
        once,
        vec![iv((9, 0), (11, 15)), iv((13, 0), (14, 0)), iv((16, 0), (16, 30))]
    );
}
