//! Tests for wall-clock parsing and timezone conversion, including DST
//! edge behavior.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use slotbook_engine::error::EngineError;
use slotbook_engine::{
    format_in_zone, month_of, parse_wall_time, parse_zone, to_absolute, to_wall_clock,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Wall-time parsing ───────────────────────────────────────────────────────

#[test]
fn parses_hour_minute() {
    assert_eq!(
        parse_wall_time("09:00").unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    );
    assert_eq!(
        parse_wall_time("18:30").unwrap(),
        NaiveTime::from_hms_opt(18, 30, 0).unwrap()
    );
}

#[test]
fn parses_hour_minute_second() {
    assert_eq!(
        parse_wall_time("09:15:30").unwrap(),
        NaiveTime::from_hms_opt(9, 15, 30).unwrap()
    );
}

#[test]
fn rejects_out_of_range_hour() {
    let err = parse_wall_time("24:00").unwrap_err();
    assert!(matches!(err, EngineError::InvalidTime(_)));
}

#[test]
fn rejects_out_of_range_minute() {
    let err = parse_wall_time("10:60").unwrap_err();
    assert!(matches!(err, EngineError::InvalidTime(_)));
}

#[test]
fn rejects_garbage() {
    for raw in ["", "morning", "9am", "09-00"] {
        let err = parse_wall_time(raw).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTime(_)), "input: {raw:?}");
    }
}

// ── Zone parsing ────────────────────────────────────────────────────────────

#[test]
fn parses_iana_zone_names() {
    assert!(parse_zone("Asia/Kolkata").is_ok());
    assert!(parse_zone("America/New_York").is_ok());
    assert!(parse_zone("UTC").is_ok());
}

#[test]
fn rejects_unknown_zone() {
    let err = parse_zone("Mars/Olympus_Mons").unwrap_err();
    assert!(matches!(err, EngineError::InvalidTimezone(_)));
}

// ── Conversion ──────────────────────────────────────────────────────────────

#[test]
fn kolkata_morning_resolves_to_utc() {
    // IST is UTC+5:30 with no DST: 09:00 local is 03:30Z.
    let zone = parse_zone("Asia/Kolkata").unwrap();
    let instant = to_absolute(
        day(2026, 3, 16),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        zone,
    )
    .unwrap();

    assert_eq!(instant, Utc.with_ymd_and_hms(2026, 3, 16, 3, 30, 0).unwrap());
}

#[test]
fn round_trips_through_wall_clock() {
    let zone = parse_zone("Asia/Kolkata").unwrap();
    let instant = Utc.with_ymd_and_hms(2026, 3, 16, 3, 30, 0).unwrap();

    let wall = to_wall_clock(instant, zone);
    assert_eq!(wall.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());

    let back = to_absolute(wall.date(), wall.time(), zone).unwrap();
    assert_eq!(back, instant);
}

#[test]
fn dst_gap_is_invalid_time() {
    // US spring forward 2026-03-08: 02:00-03:00 does not exist in New York.
    let zone = parse_zone("America/New_York").unwrap();
    let err = to_absolute(
        day(2026, 3, 8),
        NaiveTime::from_hms_opt(2, 30, 0).unwrap(),
        zone,
    )
    .unwrap_err();

    assert!(matches!(err, EngineError::InvalidTime(_)));
}

#[test]
fn dst_overlap_resolves_to_earlier_instant() {
    // US fall back 2026-11-01: 01:30 happens twice in New York. The earlier
    // instant is still on EDT (UTC-4), i.e. 05:30Z.
    let zone = parse_zone("America/New_York").unwrap();
    let instant = to_absolute(
        day(2026, 11, 1),
        NaiveTime::from_hms_opt(1, 30, 0).unwrap(),
        zone,
    )
    .unwrap();

    assert_eq!(instant, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
}

// ── Display helpers ─────────────────────────────────────────────────────────

#[test]
fn formats_in_zone() {
    let zone = parse_zone("Asia/Kolkata").unwrap();
    let instant = Utc.with_ymd_and_hms(2026, 3, 16, 3, 30, 0).unwrap();

    assert_eq!(format_in_zone(instant, "%H:%M", zone), "09:00");
    assert_eq!(format_in_zone(instant, "%b %-d, %H:%M", zone), "Mar 16, 09:00");
}

#[test]
fn month_of_respects_zone_boundary() {
    // Late on March 31 UTC is already April in Kolkata.
    let zone = parse_zone("Asia/Kolkata").unwrap();
    let instant = Utc.with_ymd_and_hms(2026, 3, 31, 20, 0, 0).unwrap();

    assert_eq!(month_of(instant, zone), (2026, 4));
    assert_eq!(month_of(instant, chrono_tz::Tz::UTC), (2026, 3));
}
