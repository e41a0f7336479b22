//! JSON boundary between JavaScript and slot-engine.
//!
//! Every function takes and returns JSON strings and reports failures as plain
//! messages, so the `#[wasm_bindgen]` exports only have to wrap them in a
//! `JsValue`. Datetimes are ISO 8601 strings.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::{
    compute_with_working_hours, merge, Attendee, Availability, BusyTimes, Interval, Settings,
    WorkingHours,
};

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for intervals passed from JavaScript.
#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
}

#[derive(Serialize)]
struct IntervalDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

impl From<&Interval> for IntervalDto {
    fn from(iv: &Interval) -> Self {
        Self {
            start: iv.start().to_rfc3339(),
            end: iv.end().to_rfc3339(),
            duration_minutes: iv.duration_minutes(),
        }
    }
}

/// Input for `findAvailableSlots`.
#[derive(Deserialize)]
struct SearchInput {
    window_start: String,
    attendees: Vec<Attendee>,
    /// Busy intervals keyed by email. Attendees without an entry are unknown.
    #[serde(default)]
    busy: HashMap<String, Vec<IntervalInput>>,
    #[serde(default)]
    working_hours: HashMap<String, WorkingHours>,
}

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
    duration_minutes: i64,
    /// Emails of the attendees the slot is free for.
    attendees: Vec<String>,
}

#[derive(Serialize)]
struct AvailabilityDto {
    window_start: String,
    window_end: String,
    slots: Vec<SlotDto>,
    unknown_attendees: Vec<String>,
}

impl From<&Availability> for AvailabilityDto {
    fn from(a: &Availability) -> Self {
        Self {
            window_start: a.window_start.to_rfc3339(),
            window_end: a.window_end.to_rfc3339(),
            slots: a
                .slots
                .iter()
                .map(|s| SlotDto {
                    start: s.start.to_rfc3339(),
                    end: s.end.to_rfc3339(),
                    duration_minutes: s.duration_minutes,
                    attendees: s.attendees.iter().map(|a| a.email.clone()).collect(),
                })
                .collect(),
            unknown_attendees: a
                .unknown_attendees
                .iter()
                .map(|a| a.email.clone())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with offset, e.g. "2026-03-16T09:00:00+01:00") and
/// naive time (e.g. "2026-03-16T09:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn parse_interval(input: &IntervalInput) -> Result<Interval, String> {
    let start = parse_datetime(&input.start)?;
    let end = parse_datetime(&input.end)?;
    Interval::new(start, end).map_err(|e| e.to_string())
}

fn parse_intervals(inputs: &[IntervalInput]) -> Result<Vec<Interval>, String> {
    inputs.iter().map(parse_interval).collect()
}

/// Settings JSON; an empty string means defaults. Missing fields take defaults.
fn parse_settings(json: &str) -> Result<Settings, String> {
    if json.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_json::from_str(json).map_err(|e| format!("Invalid settings JSON: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Compute the slots where every attendee in `input_json` is free.
pub fn find_available_slots(input_json: &str, settings_json: &str) -> Result<String, String> {
    let settings = parse_settings(settings_json)?;
    let input: SearchInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid input JSON: {}", e))?;
    let window_start = parse_datetime(&input.window_start)?;

    let mut busy = HashMap::with_capacity(input.busy.len());
    for attendee in &input.attendees {
        if let Some(intervals) = input.busy.get(&attendee.email) {
            busy.insert(
                attendee.clone(),
                BusyTimes::Available(parse_intervals(intervals)?),
            );
        }
    }

    let availability = compute_with_working_hours(
        &input.attendees,
        &busy,
        window_start,
        &settings,
        &input.working_hours,
    )
    .map_err(|e| e.to_string())?;

    to_json(&AvailabilityDto::from(&availability))
}

/// Sort and coalesce a JSON array of `{start, end}` intervals.
pub fn merge_intervals(intervals_json: &str) -> Result<String, String> {
    let inputs: Vec<IntervalInput> = serde_json::from_str(intervals_json)
        .map_err(|e| format!("Invalid intervals JSON: {}", e))?;
    let merged = merge(&parse_intervals(&inputs)?);
    to_json(&merged.iter().map(IntervalDto::from).collect::<Vec<_>>())
}

/// The default settings as JSON.
pub fn default_settings() -> Result<String, String> {
    to_json(&Settings::default())
}
