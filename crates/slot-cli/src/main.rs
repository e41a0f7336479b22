//! `slots` CLI — find common free time across attendee calendars.
//!
//! ## Usage
//!
//! ```sh
//! # Find slots for the attendees and busy times in a JSON file
//! slots find -i team.json --from 2026-03-16T00:00:00Z
//!
//! # Read the input from stdin and override settings for this run
//! cat team.json | slots find --days 3 --length 30 --timezone Europe/Berlin
//!
//! # Group slots by local start date
//! slots find -i team.json --by-day
//!
//! # Turn the third slot into an event request
//! slots book -i team.json --slot 2 --title "Design review" --notify
//!
//! # Print the effective settings (config file + overrides) as TOML
//! slots --config slots.toml settings --length 45
//! ```
//!
//! Settings come from `--config`, then `$SLOTS_CONFIG`, then built-in
//! defaults. Logs go to stderr; set `RUST_LOG` to change the level.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use slot_engine::{
    group_by_day, Attendee, Availability, AvailableSlot, EventDetails, EventRequest, EventSink,
    Interval, SchedulerError, Settings, SlotFinder, StaticBusySource, UnknownAttendeePolicy,
    WorkingHours,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "SLOTS_CONFIG";

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find common free time across attendee calendars"
)]
struct Cli {
    /// Settings file (TOML). Falls back to $SLOTS_CONFIG, then built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the slots where every attendee is free
    Find {
        #[command(flatten)]
        search: SearchArgs,
        /// Group slots by local start date
        #[arg(long)]
        by_day: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build an event request for one of the found slots
    Book {
        #[command(flatten)]
        search: SearchArgs,
        /// Index of the slot in `find` output (0-based)
        #[arg(long)]
        slot: usize,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Ask the calendar service to notify attendees
        #[arg(long)]
        notify: bool,
        /// Event start inside the slot (defaults to the slot start)
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        /// Event end inside the slot (defaults to start + meeting length)
        #[arg(long)]
        end: Option<DateTime<Utc>>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective settings as TOML
    Settings {
        #[command(flatten)]
        overrides: Overrides,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Input JSON with attendees and busy times (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Window start (RFC 3339). Overrides `window_start` in the input; defaults to now
    #[arg(long)]
    from: Option<DateTime<Utc>>,
    #[command(flatten)]
    overrides: Overrides,
}

/// Per-run overrides applied on top of the settings file.
#[derive(Args)]
struct Overrides {
    /// Number of local calendar days to search
    #[arg(long)]
    days: Option<u32>,
    /// Minimum slot length in minutes
    #[arg(long)]
    length: Option<u32>,
    /// IANA timezone for day boundaries
    #[arg(long)]
    timezone: Option<String>,
    /// Ignore working hours and weekends
    #[arg(long)]
    any_time: bool,
    /// Produce no slots while any attendee's busy times are unknown
    #[arg(long)]
    block_unknown: bool,
}

impl Overrides {
    fn apply(&self, settings: &mut Settings) {
        if let Some(days) = self.days {
            settings.time_span_days = days;
        }
        if let Some(length) = self.length {
            settings.meeting_length_minutes = length;
        }
        if let Some(tz) = &self.timezone {
            settings.timezone = tz.clone();
        }
        if self.any_time {
            settings.use_working_hours = false;
            settings.skip_weekends = false;
        }
        if self.block_unknown {
            settings.unknown_attendees = UnknownAttendeePolicy::Block;
        }
    }
}

/// Input document for `find` and `book`.
///
/// Attendees without an entry in `busy` are treated as unknown.
#[derive(Deserialize)]
struct SearchInput {
    #[serde(default)]
    window_start: Option<DateTime<Utc>>,
    attendees: Vec<Attendee>,
    #[serde(default)]
    busy: HashMap<String, Vec<Interval>>,
    /// Calendar owners' own working hours, keyed by email.
    #[serde(default)]
    working_hours: HashMap<String, WorkingHours>,
}

/// `find --by-day` output.
#[derive(Serialize)]
struct DailyAvailability {
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    days: BTreeMap<NaiveDate, Vec<AvailableSlot>>,
    unknown_attendees: Vec<Attendee>,
}

/// Writes each event request as pretty JSON to a file or stdout.
struct JsonSink {
    path: Option<PathBuf>,
}

impl EventSink for JsonSink {
    fn create_event(&self, request: &EventRequest) -> slot_engine::error::Result<()> {
        let json = serde_json::to_string_pretty(request)
            .map_err(|e| SchedulerError::EventSink(e.to_string()))?;
        write_output(self.path.as_deref(), &json)
            .map_err(|e| SchedulerError::EventSink(format!("{e:#}")))
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Find {
            search,
            by_day,
            output,
        } => {
            let (settings, availability) = run_search(config, &search)?;
            let json = if by_day {
                let tz = settings.tz()?;
                serde_json::to_string_pretty(&DailyAvailability {
                    window_start: availability.window_start,
                    window_end: availability.window_end,
                    days: group_by_day(&availability.slots, &tz),
                    unknown_attendees: availability.unknown_attendees,
                })?
            } else {
                serde_json::to_string_pretty(&availability)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Book {
            search,
            slot,
            title,
            location,
            description,
            notify,
            start,
            end,
            output,
        } => {
            let (settings, availability) = run_search(config, &search)?;
            let Some(chosen) = availability.slots.get(slot) else {
                bail!(
                    "No slot at index {}: found {} slots",
                    slot,
                    availability.slots.len()
                );
            };
            let details = EventDetails {
                title,
                location,
                description,
                notify,
            };
            let request = if start.is_none() && end.is_none() {
                EventRequest::for_slot(chosen, details)
            } else {
                let start = start.unwrap_or(chosen.start);
                let length = Duration::minutes(i64::from(settings.meeting_length_minutes));
                let end = end.unwrap_or(start + length);
                EventRequest::within_slot(chosen, details, start, end)?
            };
            JsonSink { path: output }
                .create_event(&request)
                .context("Failed to create event")?;
            info!(start = %request.start, end = %request.end, "event request written");
        }
        Commands::Settings { overrides } => {
            let mut settings = load_settings(config)?;
            overrides.apply(&mut settings);
            settings.validate().context("Invalid settings")?;
            let text = toml::to_string_pretty(&settings).context("Failed to render settings")?;
            write_output(None, text.trim_end())?;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Load settings, apply overrides, read the input and compute slots.
fn run_search(config: Option<&Path>, args: &SearchArgs) -> Result<(Settings, Availability)> {
    let mut settings = load_settings(config)?;
    args.overrides.apply(&mut settings);
    settings.validate().context("Invalid settings")?;

    let raw = read_input(args.input.as_deref())?;
    let input: SearchInput = serde_json::from_str(&raw).context("Failed to parse input JSON")?;
    let window_start = args.from.or(input.window_start).unwrap_or_else(Utc::now);

    let finder = SlotFinder::new(StaticBusySource::from(input.busy))
        .with_working_hours(input.working_hours);
    let availability = finder
        .find(&input.attendees, window_start, &settings)
        .context("Slot computation failed")?;

    info!(
        attendees = input.attendees.len(),
        slots = availability.slots.len(),
        unknown = availability.unknown_attendees.len(),
        "search complete"
    );
    Ok((settings, availability))
}

/// Settings from `--config`, then `$SLOTS_CONFIG`, then defaults.
fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => {
                debug!("no settings file; using defaults");
                return Ok(Settings::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let settings = toml::from_str(&text)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
    debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
