//! Contracts for the collaborators that feed the computation.
//!
//! Busy-time retrieval, per-attendee working hours and settings storage live
//! outside this crate. These traits are the seams; [`StaticBusySource`] is an
//! in-memory implementation for files, fixtures and tests.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attendee::Attendee;
use crate::interval::Interval;
use crate::settings::{Settings, WorkingHours};

/// Busy data retrieved for one attendee.
///
/// `Unknown` means retrieval failed or returned nothing for the attendee. It is
/// never treated as "free".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "intervals", rename_all = "snake_case")]
pub enum BusyTimes {
    Available(Vec<Interval>),
    Unknown,
}

impl BusyTimes {
    pub fn intervals(&self) -> Option<&[Interval]> {
        match self {
            BusyTimes::Available(intervals) => Some(intervals),
            BusyTimes::Unknown => None,
        }
    }
}

/// Source of per-attendee busy intervals, in UTC.
///
/// Implementations should return an entry for every requested attendee. A
/// missing entry is read as [`BusyTimes::Unknown`].
pub trait BusyTimeSource {
    fn busy_times(
        &self,
        attendees: &[Attendee],
        window_start: DateTime<Utc>,
        window_days: u32,
    ) -> HashMap<Attendee, BusyTimes>;
}

/// Source of an attendee's own working hours, as configured in their calendar.
pub trait WorkingHoursSource {
    /// `None` when the attendee's hours are not available.
    fn working_hours(&self, attendee: &Attendee) -> Option<WorkingHours>;
}

/// Read-only provider of a settings snapshot.
pub trait SettingsSource {
    fn settings(&self) -> Settings;
}

impl SettingsSource for Settings {
    fn settings(&self) -> Settings {
        self.clone()
    }
}

/// Working hours keyed by attendee email.
impl WorkingHoursSource for HashMap<String, WorkingHours> {
    fn working_hours(&self, attendee: &Attendee) -> Option<WorkingHours> {
        self.get(&attendee.email).copied()
    }
}

/// Busy times held in memory, keyed by attendee email.
#[derive(Debug, Clone, Default)]
pub struct StaticBusySource {
    by_email: HashMap<String, BusyTimes>,
}

impl StaticBusySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_busy(mut self, email: impl Into<String>, intervals: Vec<Interval>) -> Self {
        self.by_email.insert(email.into(), BusyTimes::Available(intervals));
        self
    }

    pub fn with_unknown(mut self, email: impl Into<String>) -> Self {
        self.by_email.insert(email.into(), BusyTimes::Unknown);
        self
    }
}

impl From<HashMap<String, Vec<Interval>>> for StaticBusySource {
    fn from(map: HashMap<String, Vec<Interval>>) -> Self {
        Self {
            by_email: map
                .into_iter()
                .map(|(email, intervals)| (email, BusyTimes::Available(intervals)))
                .collect(),
        }
    }
}

impl BusyTimeSource for StaticBusySource {
    fn busy_times(
        &self,
        attendees: &[Attendee],
        _window_start: DateTime<Utc>,
        _window_days: u32,
    ) -> HashMap<Attendee, BusyTimes> {
        attendees
            .iter()
            .map(|attendee| {
                let busy = self
                    .by_email
                    .get(&attendee.email)
                    .cloned()
                    .unwrap_or(BusyTimes::Unknown);
                (attendee.clone(), busy)
            })
            .collect()
    }
}
