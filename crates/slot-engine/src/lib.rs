//! # slot-engine
//!
//! Find the time slots where every attendee of a meeting is free.
//!
//! Per-attendee busy intervals are flattened into one timeline, weekend and
//! non-working-hours blackouts are added according to a [`Settings`] snapshot,
//! overlapping intervals are merged, and the gaps inside the search window are
//! filtered by meeting length and split into one slot per local calendar day.
//!
//! ## Modules
//!
//! - [`attendee`] — Meeting attendees keyed by email
//! - [`interval`] — Validated `(start, end)` interval with ordering
//! - [`merge`] — Sort and coalesce overlapping or adjacent intervals
//! - [`calendar`] — Day boundaries in the configured timezone
//! - [`policy`] — Weekend and working-hours blackout intervals
//! - [`gaps`] — Gap-finder, minimum-length filter, per-day splitter
//! - [`availability`] — Pipeline orchestration and result assembly
//! - [`source`] — Busy-time, working-hours and settings collaborator traits
//! - [`event`] — Event requests built from a chosen slot
//! - [`settings`] — Policy snapshot
//! - [`error`] — Error types

pub mod attendee;
pub mod availability;
pub mod calendar;
pub mod error;
pub mod event;
pub mod gaps;
pub mod interval;
pub mod merge;
pub mod policy;
pub mod settings;
pub mod source;

pub use attendee::Attendee;
pub use availability::{
    compute_available_slots, compute_with_working_hours, group_by_day, Availability,
    AvailableSlot, SlotFinder,
};
pub use error::SchedulerError;
pub use event::{EventDetails, EventRequest, EventSink};
pub use interval::Interval;
pub use merge::merge;
pub use settings::{Settings, UnknownAttendeePolicy, WorkingHours};
pub use source::{BusyTimeSource, BusyTimes, SettingsSource, StaticBusySource, WorkingHoursSource};
