//! Scheduling policy snapshot.
//!
//! A [`Settings`] value is read once per computation and passed by value or
//! reference into the pipeline; nothing in this crate keeps global settings.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Longest search window accepted by [`Settings::validate`].
pub const MAX_TIME_SPAN_DAYS: u32 = 366;

/// What to do with attendees whose busy times could not be retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownAttendeePolicy {
    /// Compute slots over the attendees with known busy times and report the
    /// others as unknown. Slots list only the attendees they were computed for.
    #[default]
    Exclude,
    /// Treat an unknown attendee as busy for the whole window, so no slot is
    /// produced while any attendee is unknown.
    Block,
}

/// A daily working window as fractional hours after local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: f64,
    pub end: f64,
}

impl WorkingHours {
    /// Both bounds must lie in `[0, 24)` and `start` must precede `end`.
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [("start", self.start), ("end", self.end)] {
            if !(0.0..24.0).contains(&value) {
                return Err(SchedulerError::InvalidSettings(format!(
                    "working hours {label} {value} is outside [0, 24)"
                )));
            }
        }
        if self.start >= self.end {
            return Err(SchedulerError::InvalidSettings(format!(
                "working hours start {} is not before end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Policy consumed by one slot computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum slot length in minutes. `0` keeps every gap.
    pub meeting_length_minutes: u32,
    /// Number of local calendar days to search, starting at the window start.
    pub time_span_days: u32,
    /// Black out time outside the working window.
    pub use_working_hours: bool,
    /// Working window start, fractional hours (`9.5` is 09:30).
    pub working_hours_start: f64,
    /// Working window end, fractional hours.
    pub working_hours_end: f64,
    /// Black out Saturdays and Sundays entirely.
    pub skip_weekends: bool,
    /// Prefer each attendee's own calendar working hours over the fixed window.
    pub use_calendar_owner_settings: bool,
    /// IANA timezone used for every day-boundary computation.
    pub timezone: String,
    pub unknown_attendees: UnknownAttendeePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            meeting_length_minutes: 60,
            time_span_days: 7,
            use_working_hours: true,
            working_hours_start: 9.0,
            working_hours_end: 17.5,
            skip_weekends: true,
            use_calendar_owner_settings: false,
            timezone: "UTC".to_string(),
            unknown_attendees: UnknownAttendeePolicy::default(),
        }
    }
}

impl Settings {
    /// Parse the configured timezone.
    ///
    /// # Errors
    /// Returns `SchedulerError::InvalidTimezone` if the name is not a valid IANA identifier.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| SchedulerError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn working_hours(&self) -> WorkingHours {
        WorkingHours {
            start: self.working_hours_start,
            end: self.working_hours_end,
        }
    }

    /// Reject settings the pipeline cannot honour.
    ///
    /// The working window is only checked when it is in use. The search span
    /// is capped at [`MAX_TIME_SPAN_DAYS`].
    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        if self.time_span_days > MAX_TIME_SPAN_DAYS {
            return Err(SchedulerError::InvalidSettings(format!(
                "time span of {} days exceeds {MAX_TIME_SPAN_DAYS}",
                self.time_span_days
            )));
        }
        if self.use_working_hours {
            self.working_hours().validate()?;
        }
        Ok(())
    }
}
