//! Time interval primitive shared by every stage of the pipeline.
//!
//! An [`Interval`] is an immutable `(start, end)` pair of UTC instants with
//! `start <= end`. Intervals order by start, then by end. Overlap checks treat
//! intervals as half-open, so an interval ending exactly when another starts
//! does not overlap it (the merge engine still coalesces such neighbours).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// A time interval between two UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unvalidated wire shape; every deserialized interval goes through [`Interval::new`].
#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for Interval {
    type Error = SchedulerError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Create an interval, rejecting `start > end`.
    ///
    /// Zero-length intervals (`start == end`) are accepted; they are used as
    /// window-edge sentinels by the gap-finder.
    ///
    /// # Errors
    /// Returns `SchedulerError::InvalidInterval` when `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(SchedulerError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// A zero-length interval at `instant`.
    pub fn point(instant: DateTime<Utc>) -> Self {
        Self {
            start: instant,
            end: instant,
        }
    }

    /// Build from bounds already known to be ordered. Inverted bounds yield `None`.
    pub(crate) fn ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Same start, end moved to `max(self.end, end)`.
    pub(crate) fn extended_to(self, end: DateTime<Utc>) -> Self {
        Self {
            start: self.start,
            end: self.end.max(end),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length in whole minutes, truncated toward zero.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open overlap: `[a, b)` and `[b, c)` do not overlap, and an empty
    /// interval overlaps nothing.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely within `self` (bounds inclusive).
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Intersection with `window`, or `None` when no non-empty part remains.
    pub fn clip(&self, window: &Interval) -> Option<Interval> {
        let start = self.start.max(window.start);
        let end = self.end.min(window.end);
        (start < end).then_some(Self { start, end })
    }
}
