//! Policy augmentation: synthetic busy intervals for time the policy forbids.
//!
//! Weekends and time outside working hours are expressed as ordinary busy
//! intervals and handed to the merge engine together with real busy times; the
//! merge engine never knows which is which.
//!
//! Every blackout is half-open (`[00:00, next 00:00)` for a whole day) and
//! clipped to the search window, so nothing before the window start or after
//! its end is ever blacked out. A window starting mid-morning therefore gets a
//! partial blackout from its own start up to the first working-hours start.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::debug;

use crate::calendar::{self, at_hour, next_day, start_of_day};
use crate::interval::Interval;
use crate::settings::{Settings, WorkingHours};

/// Synthetic busy intervals for `window` under `settings`.
///
/// `owner_hours` carries per-attendee working windows. It is consulted only
/// when both `use_working_hours` and `use_calendar_owner_settings` are set;
/// when it is empty the fixed window from `settings` applies.
pub fn blackout_intervals(
    window: &Interval,
    tz: &Tz,
    settings: &Settings,
    owner_hours: &[WorkingHours],
) -> Vec<Interval> {
    let days = calendar::days_touching(tz, window);
    let mut blackouts = Vec::new();

    if settings.skip_weekends {
        blackouts.extend(weekend_blackouts(&days, tz, window));
    }
    let weekend_count = blackouts.len();

    if settings.use_working_hours {
        if settings.use_calendar_owner_settings && !owner_hours.is_empty() {
            for hours in owner_hours {
                blackouts.extend(non_working_blackouts(&days, tz, window, *hours));
            }
        } else {
            blackouts.extend(non_working_blackouts(
                &days,
                tz,
                window,
                settings.working_hours(),
            ));
        }
    }

    debug!(
        days = days.len(),
        weekend = weekend_count,
        non_working = blackouts.len() - weekend_count,
        "policy blackouts"
    );
    blackouts
}

/// One whole-day blackout for every Saturday and Sunday in `days`.
pub fn weekend_blackouts(days: &[NaiveDate], tz: &Tz, window: &Interval) -> Vec<Interval> {
    days.iter()
        .filter(|day| calendar::is_weekend(**day))
        .filter_map(|day| whole_day(tz, *day))
        .filter_map(|day| day.clip(window))
        .collect()
}

/// Blackouts before `hours.start` and from `hours.end` to the next midnight, per day.
pub fn non_working_blackouts(
    days: &[NaiveDate],
    tz: &Tz,
    window: &Interval,
    hours: WorkingHours,
) -> Vec<Interval> {
    let mut blackouts = Vec::with_capacity(days.len() * 2);
    for day in days {
        let midnight = start_of_day(tz, *day);
        let work_start = at_hour(tz, *day, hours.start);
        let work_end = at_hour(tz, *day, hours.end);
        let next_midnight = start_of_day(tz, next_day(*day));

        for (start, end) in [(midnight, work_start), (work_end, next_midnight)] {
            if let Some(blackout) = Interval::ordered(start, end).and_then(|b| b.clip(window)) {
                blackouts.push(blackout);
            }
        }
    }
    blackouts
}

fn whole_day(tz: &Tz, day: NaiveDate) -> Option<Interval> {
    Interval::ordered(start_of_day(tz, day), start_of_day(tz, next_day(day)))
}
