//! `slotbook` CLI — compute bookable slots and issue share tokens from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Bookable slots for a day, no existing events (stdin → stdout)
//! echo '[]' | slotbook slots --day 2026-03-16
//!
//! # Slots around existing events from a file, shown as local wall-clock
//! slotbook slots --day 2026-03-16 -i events.json --local
//!
//! # Custom working hours and duration
//! echo '[]' | slotbook slots --day 2026-03-16 --hours 10:00-16:00 --duration 60
//!
//! # Freeze "now" for reproducible output
//! echo '[]' | slotbook slots --day 2026-03-16 --now 2026-03-16T02:30:00Z
//!
//! # Issue a fresh share token
//! slotbook token
//!
//! # Render the month grid for a date
//! slotbook grid --day 2026-08-07
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};

use slotbook_core::issue_token;
use slotbook_engine::{compute_slots, format_in_zone, month_grid, parse_zone, WorkingHours};

#[derive(Parser)]
#[command(name = "slotbook", version, about = "Bookable-slot computation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the bookable slots for a day
    Slots {
        /// The day to compute, as YYYY-MM-DD (in the calendar's timezone)
        #[arg(long)]
        day: String,
        /// IANA timezone of the calendar owner
        #[arg(long, default_value = "Asia/Kolkata")]
        timezone: String,
        /// Working hours as HH:MM-HH:MM
        #[arg(long, default_value = "09:00-18:00")]
        hours: String,
        /// Slot duration in minutes
        #[arg(long, default_value_t = 30)]
        duration: i64,
        /// "Now" as an RFC 3339 instant; defaults to the current time
        #[arg(long)]
        now: Option<String>,
        /// Events JSON file: [{"startUTC": ..., "endUTC": ...}] (reads from
        /// stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print local wall-clock lines instead of JSON
        #[arg(long)]
        local: bool,
    },
    /// Issue a fresh share token
    Token,
    /// Render the month grid containing a date
    Grid {
        /// Any date of the month, as YYYY-MM-DD
        #[arg(long)]
        day: String,
    },
}

/// Interval document shape shared by event input and slot output.
#[derive(Serialize, Deserialize)]
struct IntervalDoc {
    #[serde(rename = "startUTC")]
    start: DateTime<Utc>,
    #[serde(rename = "endUTC")]
    end: DateTime<Utc>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Slots {
            day,
            timezone,
            hours,
            duration,
            now,
            input,
            local,
        } => run_slots(&day, &timezone, &hours, duration, now.as_deref(), input.as_deref(), local),
        Commands::Token => {
            println!("{}", issue_token());
            Ok(())
        }
        Commands::Grid { day } => run_grid(&day),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_slots(
    day: &str,
    timezone: &str,
    hours: &str,
    duration: i64,
    now: Option<&str>,
    input: Option<&str>,
    local: bool,
) -> Result<()> {
    let day = parse_day(day)?;
    let zone = parse_zone(timezone)?;
    let working_hours = parse_hours(hours)?;
    let now = match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --now instant: '{}'", raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let json = read_input(input)?;
    let events: Vec<IntervalDoc> =
        serde_json::from_str(&json).context("Failed to parse events JSON")?;
    let busy: Vec<slotbook_engine::Slot> = events
        .iter()
        .map(|doc| slotbook_engine::Slot {
            start: doc.start,
            end: doc.end,
        })
        .collect();

    let slots = compute_slots(day, &working_hours, duration, zone, &busy, now)?;

    if local {
        for slot in &slots {
            println!(
                "{}  {} - {}",
                format_in_zone(slot.start, "%Y-%m-%d", zone),
                format_in_zone(slot.start, "%H:%M", zone),
                format_in_zone(slot.end, "%H:%M", zone),
            );
        }
    } else {
        let docs: Vec<IntervalDoc> = slots
            .iter()
            .map(|slot| IntervalDoc {
                start: slot.start,
                end: slot.end,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&docs)?);
    }
    Ok(())
}

fn run_grid(day: &str) -> Result<()> {
    let day = parse_day(day)?;
    let grid = month_grid(day);

    println!("{}", day.format("%B %Y"));
    println!("Mo Tu We Th Fr Sa Su");
    for week in grid.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(date) => format!("{:>2}", date.format("%-d")),
                None => "  ".to_string(),
            })
            .collect();
        println!("{}", row.join(" ").trim_end());
    }
    Ok(())
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid --day date: '{}' (expected YYYY-MM-DD)", raw))
}

/// Parse "09:00-18:00" into a working-hours window.
fn parse_hours(raw: &str) -> Result<WorkingHours> {
    let (start, end) = raw
        .split_once('-')
        .with_context(|| format!("Invalid --hours window: '{}' (expected HH:MM-HH:MM)", raw))?;
    Ok(WorkingHours::new(start, end))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
