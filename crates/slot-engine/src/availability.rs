//! Common free time across N attendees.
//!
//! Busy intervals from every attendee are flattened into one timeline (who is
//! busy does not matter, only that someone is), policy blackouts are added,
//! the timeline is merged, and the gaps inside the search window become
//! candidate slots. Slots shorter than the meeting length are dropped and the
//! survivors are split so that each slot sits inside one local calendar day.
//!
//! Every returned slot is free for every attendee it lists.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::attendee::Attendee;
use crate::calendar;
use crate::error::Result;
use crate::gaps;
use crate::interval::Interval;
use crate::merge;
use crate::policy;
use crate::settings::{Settings, UnknownAttendeePolicy, WorkingHours};
use crate::source::{BusyTimeSource, BusyTimes, SettingsSource, WorkingHoursSource};

/// A time slot where every listed attendee is free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
    /// The attendees the slot was computed for. Shared by every slot of one result.
    pub attendees: Arc<[Attendee]>,
}

/// Result of one slot computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Availability {
    /// The search window start.
    pub window_start: DateTime<Utc>,
    /// The search window end (exclusive).
    pub window_end: DateTime<Utc>,
    /// Slots sorted by `(start, end)`.
    pub slots: Vec<AvailableSlot>,
    /// Attendees whose busy times could not be retrieved.
    pub unknown_attendees: Vec<Attendee>,
}

impl Availability {
    fn empty(window: &Interval, unknown_attendees: Vec<Attendee>) -> Self {
        Self {
            window_start: window.start(),
            window_end: window.end(),
            slots: Vec::new(),
            unknown_attendees,
        }
    }
}

/// Attach `attendees` to every interval and sort by `(start, end)`.
///
/// The attendee list is shared, not copied.
pub fn assemble(intervals: Vec<Interval>, attendees: Arc<[Attendee]>) -> Vec<AvailableSlot> {
    let mut slots: Vec<AvailableSlot> = intervals
        .into_iter()
        .map(|interval| AvailableSlot {
            start: interval.start(),
            end: interval.end(),
            duration_minutes: interval.duration_minutes(),
            attendees: Arc::clone(&attendees),
        })
        .collect();
    slots.sort_by_key(|slot| (slot.start, slot.end));
    slots
}

/// Compute the slots where all `attendees` are free.
///
/// The window starts at `window_start` and spans `settings.time_span_days`
/// local calendar days in `settings.timezone`. An empty attendee list or a
/// zero-day span yields no slots.
///
/// Attendees with no entry in `busy`, or with [`BusyTimes::Unknown`], are
/// handled by `settings.unknown_attendees` and reported in
/// [`Availability::unknown_attendees`].
///
/// # Errors
/// Returns `SchedulerError::InvalidSettings` or `SchedulerError::InvalidTimezone`
/// when `settings` fails validation.
pub fn compute_available_slots(
    attendees: &[Attendee],
    busy: &HashMap<Attendee, BusyTimes>,
    window_start: DateTime<Utc>,
    settings: &Settings,
) -> Result<Availability> {
    compute(attendees, busy, window_start, settings, None)
}

/// Like [`compute_available_slots`], reading each attendee's own working hours
/// from `hours` when `settings.use_calendar_owner_settings` is set.
///
/// Attendees whose hours are unavailable fall back to the fixed window.
pub fn compute_with_working_hours(
    attendees: &[Attendee],
    busy: &HashMap<Attendee, BusyTimes>,
    window_start: DateTime<Utc>,
    settings: &Settings,
    hours: &dyn WorkingHoursSource,
) -> Result<Availability> {
    compute(attendees, busy, window_start, settings, Some(hours))
}

fn compute(
    attendees: &[Attendee],
    busy: &HashMap<Attendee, BusyTimes>,
    window_start: DateTime<Utc>,
    settings: &Settings,
    hours: Option<&dyn WorkingHoursSource>,
) -> Result<Availability> {
    settings.validate()?;
    let tz = settings.tz()?;
    let window = Interval::new(
        window_start,
        calendar::window_end(&tz, window_start, settings.time_span_days),
    )?;

    if attendees.is_empty() || window.is_empty() {
        debug!(
            attendees = attendees.len(),
            time_span_days = settings.time_span_days,
            "nothing to search"
        );
        return Ok(Availability::empty(&window, Vec::new()));
    }

    // 1. Flatten; attendee identity is dropped from the busy timeline.
    let mut known = Vec::with_capacity(attendees.len());
    let mut unknown = Vec::new();
    let mut timeline = Vec::new();
    for attendee in attendees {
        match busy.get(attendee).and_then(BusyTimes::intervals) {
            Some(intervals) => {
                timeline.extend_from_slice(intervals);
                known.push(attendee.clone());
            }
            None => {
                warn!(attendee = %attendee.email, "busy times unknown");
                unknown.push(attendee.clone());
            }
        }
    }

    if !unknown.is_empty() && settings.unknown_attendees == UnknownAttendeePolicy::Block {
        debug!(unknown = unknown.len(), "unknown attendees block the window");
        return Ok(Availability::empty(&window, unknown));
    }
    if known.is_empty() {
        return Ok(Availability::empty(&window, unknown));
    }

    // 2. Policy blackouts join the same timeline.
    let owner_hours = owner_working_hours(&known, settings, hours);
    timeline.extend(policy::blackout_intervals(&window, &tz, settings, &owner_hours));

    // 3. Merge, with the window edges as walls.
    let merged = merge::merge(&gaps::with_window_sentinels(&timeline, &window));

    // 4-6. Gaps, minimum length on the unsplit gap, then per-day split.
    let free = gaps::find_gaps(&merged);
    let long_enough = gaps::filter_by_length(&free, settings.meeting_length_minutes);
    let per_day = gaps::split_across_days(&long_enough, &tz);

    debug!(
        busy = timeline.len(),
        merged = merged.len(),
        gaps = free.len(),
        kept = long_enough.len(),
        slots = per_day.len(),
        "slot pipeline"
    );

    // 7. Every slot carries the attendees it is valid for.
    Ok(Availability {
        window_start: window.start(),
        window_end: window.end(),
        slots: assemble(per_day, Arc::from(known)),
        unknown_attendees: unknown,
    })
}

/// Working windows to enforce when owners' calendar settings are requested.
///
/// Empty means "use the fixed window from settings".
fn owner_working_hours(
    known: &[Attendee],
    settings: &Settings,
    hours: Option<&dyn WorkingHoursSource>,
) -> Vec<WorkingHours> {
    if !(settings.use_working_hours && settings.use_calendar_owner_settings) {
        return Vec::new();
    }
    let Some(source) = hours else {
        warn!("calendar owner working hours requested without a source; using fixed window");
        return Vec::new();
    };

    known
        .iter()
        .map(|attendee| match source.working_hours(attendee) {
            Some(owner) if owner.validate().is_ok() => owner,
            Some(owner) => {
                warn!(
                    attendee = %attendee.email,
                    ?owner,
                    "invalid owner working hours; using fixed window"
                );
                settings.working_hours()
            }
            None => {
                debug!(attendee = %attendee.email, "no owner working hours; using fixed window");
                settings.working_hours()
            }
        })
        .collect()
}

/// Fetches busy times from a [`BusyTimeSource`] and computes common free slots.
pub struct SlotFinder<B> {
    busy_source: B,
    working_hours: Option<Box<dyn WorkingHoursSource>>,
}

impl<B: BusyTimeSource> SlotFinder<B> {
    pub fn new(busy_source: B) -> Self {
        Self {
            busy_source,
            working_hours: None,
        }
    }

    /// Use `source` for per-attendee working hours.
    pub fn with_working_hours(mut self, source: impl WorkingHoursSource + 'static) -> Self {
        self.working_hours = Some(Box::new(source));
        self
    }

    /// Take one settings snapshot, fetch busy times and compute slots.
    ///
    /// The busy-time source is not queried for an empty attendee list.
    pub fn find(
        &self,
        attendees: &[Attendee],
        window_start: DateTime<Utc>,
        settings: &impl SettingsSource,
    ) -> Result<Availability> {
        let settings = settings.settings();
        let busy = if attendees.is_empty() {
            HashMap::new()
        } else {
            self.busy_source
                .busy_times(attendees, window_start, settings.time_span_days)
        };
        compute(
            attendees,
            &busy,
            window_start,
            &settings,
            self.working_hours.as_deref(),
        )
    }
}

/// Bucket slots by the local date they start on, in `tz`.
pub fn group_by_day(slots: &[AvailableSlot], tz: &Tz) -> BTreeMap<NaiveDate, Vec<AvailableSlot>> {
    let mut days: BTreeMap<NaiveDate, Vec<AvailableSlot>> = BTreeMap::new();
    for slot in slots {
        days.entry(calendar::local_date(tz, slot.start))
            .or_default()
            .push(slot.clone());
    }
    days
}
