//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The requested event range does not fit inside the chosen slot.
    #[error("Event range {start}..{end} is not inside the slot {slot_start}..{slot_end}")]
    OutsideSlot {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        slot_start: DateTime<Utc>,
        slot_end: DateTime<Utc>,
    },

    #[error("Event sink error: {0}")]
    EventSink(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
