//! Interval merge engine.
//!
//! Sorts intervals by `(start, end)` and coalesces every interval that overlaps
//! or touches the running one. Touching counts: `09:00-10:00` and `10:00-11:00`
//! become `09:00-11:00`.

use crate::interval::Interval;

/// Merge overlapping or adjacent intervals.
///
/// Returns a list sorted by start whose entries are pairwise disjoint and
/// non-adjacent (`a.end < b.start` for consecutive `a`, `b`), covering exactly
/// the same instants as the input. Empty input yields empty output.
pub fn merge(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_unstable();

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for next in sorted {
        if let Some(last) = merged.last_mut() {
            if next.start() <= last.end() {
                // Equal starts sort by end, but an earlier start can still reach
                // further than a later one, so the end is a max, not a replace.
                *last = last.extended_to(next.end());
                continue;
            }
        }
        merged.push(next);
    }

    merged
}
