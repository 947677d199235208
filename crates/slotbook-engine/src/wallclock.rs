//! Timezone-aware wall-clock ↔ absolute-instant conversion.
//!
//! Instants are `DateTime<Utc>`; wall-clock values are naive dates and times
//! interpreted in an IANA zone via `chrono-tz`. Conversions round-trip:
//! `to_absolute(to_wall_clock(x, z), z) == x` for every instant whose
//! wall-clock rendering in `z` is unambiguous.

use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{EngineError, Result};

/// Parse an IANA zone name (e.g., "Asia/Kolkata") into a `Tz`.
///
/// # Errors
/// Returns `EngineError::InvalidTimezone` if the name is not a valid IANA
/// identifier.
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

/// Parse a wall-clock time-of-day string such as "09:00" or "18:30".
///
/// # Errors
/// Returns `EngineError::InvalidTime` if the string is unparsable or the
/// hour/minute is out of range.
pub fn parse_wall_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| EngineError::InvalidTime(format!("unparsable wall-clock time: '{}'", raw)))
}

/// Resolve a wall-clock date + time in a zone to an absolute UTC instant.
///
/// A time inside a DST spring-forward gap does not exist on the timeline and
/// is rejected. An ambiguous time during a fall-back overlap resolves to the
/// earlier of the two instants.
///
/// # Errors
/// Returns `EngineError::InvalidTime` if the wall-clock time falls in a DST
/// gap.
pub fn to_absolute(day: NaiveDate, time: NaiveTime, zone: Tz) -> Result<DateTime<Utc>> {
    match zone.from_local_datetime(&day.and_time(time)) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(EngineError::InvalidTime(format!(
            "{} {} does not exist in {} (DST gap)",
            day, time, zone
        ))),
    }
}

/// Render an absolute instant as the wall-clock datetime an observer in
/// `zone` would see.
pub fn to_wall_clock(instant: DateTime<Utc>, zone: Tz) -> NaiveDateTime {
    instant.with_timezone(&zone).naive_local()
}

/// Format an instant with a chrono format string, in the given zone.
pub fn format_in_zone(instant: DateTime<Utc>, fmt: &str, zone: Tz) -> String {
    instant.with_timezone(&zone).format(fmt).to_string()
}

/// The (year, month) an instant falls in, as seen from `zone`.
pub fn month_of(instant: DateTime<Utc>, zone: Tz) -> (i32, u32) {
    let local = instant.with_timezone(&zone);
    (local.year(), local.month())
}
