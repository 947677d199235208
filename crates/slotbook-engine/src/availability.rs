//! The availability engine: which slots are bookable right now?
//!
//! Given a day, the owner's working-hours window, a slot duration, a zone,
//! and the set of already-scheduled busy intervals, [`compute_slots`]
//! produces the bookable slots in chronological order. The function is pure:
//! events and working hours are supplied by the caller, and `now` is an
//! explicit input so results are deterministic and testable.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::interval::{split_into_slots, Slot};
use crate::wallclock::{parse_wall_time, to_absolute};

/// The owner's working-hours window as wall-clock times-of-day in the
/// owner's timezone (e.g., "09:00" to "18:00").
///
/// A missing bound makes the window degenerate: no availability, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl WorkingHours {
    pub fn new(start: &str, end: &str) -> Self {
        WorkingHours {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }
}

/// Compute the bookable slots for `day`.
///
/// A candidate slot is bookable iff it overlaps no busy interval AND its
/// start is strictly after `now`. Candidates are `duration_minutes` long;
/// a partial remainder at the end of the window is discarded.
///
/// A degenerate window — missing bounds, or end not after start — yields an
/// empty result: a valid "no availability" answer, not an error.
///
/// # Errors
/// Returns `EngineError::InvalidConfig` if `duration_minutes` is zero or
/// negative (rejected before slot generation).
/// Returns `EngineError::InvalidTime` if a working-hours bound is
/// unparsable or falls in a DST gap on `day`.
pub fn compute_slots(
    day: NaiveDate,
    working_hours: &WorkingHours,
    duration_minutes: i64,
    zone: Tz,
    busy: &[Slot],
    now: DateTime<Utc>,
) -> Result<Vec<Slot>> {
    if duration_minutes <= 0 {
        return Err(EngineError::InvalidConfig(format!(
            "slot duration must be positive, got {} minutes",
            duration_minutes
        )));
    }

    let (Some(start_raw), Some(end_raw)) =
        (working_hours.start.as_deref(), working_hours.end.as_deref())
    else {
        return Ok(Vec::new());
    };

    let start_time = parse_wall_time(start_raw)?;
    let end_time = parse_wall_time(end_raw)?;
    if end_time <= start_time {
        return Ok(Vec::new());
    }

    let window_start = to_absolute(day, start_time, zone)?;
    let window_end = to_absolute(day, end_time, zone)?;
    if window_end <= window_start {
        // A DST transition can collapse the window even when the wall-clock
        // bounds are ordered.
        return Ok(Vec::new());
    }

    let slots = split_into_slots(window_start, window_end, duration_minutes)?
        .filter(|slot| slot.start > now && !busy.iter().any(|b| slot.overlaps(b)))
        .collect();

    Ok(slots)
}
