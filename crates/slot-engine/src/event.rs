//! Turning a chosen slot into an event request for an [`EventSink`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attendee::Attendee;
use crate::availability::AvailableSlot;
use crate::error::{Result, SchedulerError};

/// User-provided event fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Ask the calendar service to notify attendees.
    #[serde(default)]
    pub notify: bool,
}

/// A fully specified event, ready for an [`EventSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRequest {
    pub title: String,
    pub location: String,
    pub description: String,
    pub notify: bool,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub attendees: Vec<Attendee>,
}

impl EventRequest {
    /// An event filling the whole slot.
    pub fn for_slot(slot: &AvailableSlot, details: EventDetails) -> Self {
        Self::build(details, slot.start, slot.end, slot)
    }

    /// An event covering `start..end` inside `slot`.
    ///
    /// # Errors
    /// Returns `SchedulerError::OutsideSlot` when the range is empty, inverted,
    /// or not contained in the slot.
    pub fn within_slot(
        slot: &AvailableSlot,
        details: EventDetails,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self> {
        if start >= end || start < slot.start || end > slot.end {
            return Err(SchedulerError::OutsideSlot {
                start,
                end,
                slot_start: slot.start,
                slot_end: slot.end,
            });
        }
        Ok(Self::build(details, start, end, slot))
    }

    fn build(
        details: EventDetails,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        slot: &AvailableSlot,
    ) -> Self {
        Self {
            title: details.title,
            location: details.location,
            description: details.description,
            notify: details.notify,
            start,
            end,
            attendees: slot.attendees.to_vec(),
        }
    }
}

/// Destination for new calendar events.
pub trait EventSink {
    /// # Errors
    /// Implementations report delivery failures as `SchedulerError::EventSink`.
    fn create_event(&self, request: &EventRequest) -> Result<()>;
}
