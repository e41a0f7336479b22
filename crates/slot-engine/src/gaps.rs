//! Free gaps between merged busy intervals, the minimum-length filter, and the
//! per-day splitter.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::calendar::{self, end_of_day, next_day, start_of_day};
use crate::interval::Interval;

/// Gaps between consecutive entries of a merged busy list.
///
/// `merged` must be sorted and non-overlapping (the output of
/// [`crate::merge::merge`]). Fewer than two entries produce no gaps, and
/// zero-length gaps are skipped.
pub fn find_gaps(merged: &[Interval]) -> Vec<Interval> {
    merged
        .windows(2)
        .filter_map(|pair| Interval::ordered(pair[0].end(), pair[1].start()))
        .filter(|gap| !gap.is_empty())
        .collect()
}

/// Busy intervals clipped to `window`, plus zero-length walls at both window edges.
///
/// The walls bound the first and last gap, so free time before the first busy
/// interval or after the last one ends at the window edge. Busy intervals that
/// miss the window, or are zero-length, are dropped.
pub fn with_window_sentinels(busy: &[Interval], window: &Interval) -> Vec<Interval> {
    let mut bounded: Vec<Interval> = busy.iter().filter_map(|b| b.clip(window)).collect();
    bounded.push(Interval::point(window.start()));
    bounded.push(Interval::point(window.end()));
    bounded
}

/// Keep gaps at least `min_minutes` long, measured in whole minutes.
///
/// A gap exactly `min_minutes` long is kept. `0` keeps everything.
pub fn filter_by_length(gaps: &[Interval], min_minutes: u32) -> Vec<Interval> {
    gaps.iter()
        .filter(|gap| gap.duration_minutes() >= i64::from(min_minutes))
        .copied()
        .collect()
}

/// Break every gap spanning several local days into one fragment per day.
///
/// A gap from Monday 10:00 to Wednesday 00:00 becomes Monday
/// 10:00–23:59:59.999 and Tuesday 00:00–Wednesday 00:00: the end is exclusive,
/// so a gap ending at midnight does not spill into the following day. Gaps
/// inside a single day pass through unchanged. Fragments that would be empty
/// are dropped.
pub fn split_across_days(gaps: &[Interval], tz: &Tz) -> Vec<Interval> {
    let mut fragments = Vec::with_capacity(gaps.len());
    for gap in gaps {
        let first = calendar::local_date(tz, gap.start());
        let last = calendar::last_day(tz, gap);
        if first >= last {
            fragments.push(*gap);
            continue;
        }

        let mut start = gap.start();
        let mut day = first;
        while day < last {
            push_fragment(&mut fragments, start, end_of_day(tz, day));
            day = next_day(day);
            start = start_of_day(tz, day);
        }
        push_fragment(&mut fragments, start, gap.end());
    }
    fragments
}

fn push_fragment(out: &mut Vec<Interval>, start: DateTime<Utc>, end: DateTime<Utc>) {
    if let Some(fragment) = Interval::ordered(start, end).filter(|f| !f.is_empty()) {
        out.push(fragment);
    }
}
