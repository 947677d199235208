//! Owner-side calendar operations and the public read paths.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::{BookingError, Result};
use crate::model::{new_id, Calendar, CalendarMonth, Event, EventMeta};
use crate::store::Store;
use crate::token::issue_token;
use slotbook_engine::{compute_slots, parse_wall_time, parse_zone, to_absolute, Slot, WorkingHours};

/// Create a calendar with the signup defaults: Asia/Kolkata, working hours
/// 09:00-18:00, 30-minute slots, and a fresh share token.
pub fn create_calendar(store: &Store, owner_id: &str) -> Result<Calendar> {
    let calendar = Calendar {
        id: new_id(),
        owner_id: owner_id.to_string(),
        share_token: issue_token(),
        timezone: "Asia/Kolkata".to_string(),
        working_hours: WorkingHours::new("09:00", "18:00"),
        default_duration_minutes: 30,
    };
    store.insert_calendar(calendar.clone())?;
    Ok(calendar)
}

/// Public entry point: resolve a share token to its calendar, or an explicit
/// "not found" (`Ok(None)`) when the token is invalid or was rotated away.
pub fn resolve_share_token(store: &Store, token: &str) -> Result<Option<Calendar>> {
    store.find_calendar_by_token(token)
}

/// Resolve wall-clock event bounds in the owner's timezone.
fn event_bounds(
    calendar: &Calendar,
    date: NaiveDate,
    start_time: &str,
    end_time: &str,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let zone = parse_zone(&calendar.timezone)?;
    let start = to_absolute(date, parse_wall_time(start_time)?, zone)?;
    let end = to_absolute(date, parse_wall_time(end_time)?, zone)?;
    if end <= start {
        return Err(BookingError::Validation(
            "event end must be after event start".to_string(),
        ));
    }
    Ok((start, end))
}

/// Add an owner-created event from wall-clock date and times in the owner's
/// timezone. Owner events are scoped to the displayed month but are not
/// conflict-checked: the non-overlap invariant applies to booking-derived
/// events only.
///
/// # Errors
/// `Validation` when the range is reversed/empty or the start falls outside
/// `month`; engine errors for unparsable times or DST gaps.
pub fn add_owner_event(
    store: &Store,
    calendar: &Calendar,
    title: &str,
    description: Option<&str>,
    date: NaiveDate,
    start_time: &str,
    end_time: &str,
    month: CalendarMonth,
    now: DateTime<Utc>,
) -> Result<Event> {
    let (start_utc, end_utc) = event_bounds(calendar, date, start_time, end_time)?;
    let zone = parse_zone(&calendar.timezone)?;
    if !month.contains(start_utc, zone) {
        return Err(BookingError::Validation(
            "events are limited to the currently displayed month".to_string(),
        ));
    }

    let event = Event {
        id: new_id(),
        calendar_id: calendar.id.clone(),
        title: title.to_string(),
        description: description.map(str::to_string),
        start_utc,
        end_utc,
        created_at: now,
        meta: Some(EventMeta::Owner),
    };
    store.insert_event(event.clone())?;
    Ok(event)
}

/// Reschedule/retitle an event from wall-clock inputs in the owner's
/// timezone.
pub fn update_event(
    store: &Store,
    calendar: &Calendar,
    event_id: &str,
    title: &str,
    date: NaiveDate,
    start_time: &str,
    end_time: &str,
) -> Result<Event> {
    let (start_utc, end_utc) = event_bounds(calendar, date, start_time, end_time)?;
    store.update_event(event_id, |event| {
        event.title = title.to_string();
        event.start_utc = start_utc;
        event.end_utc = end_utc;
    })
}

/// Delete an owner's event.
pub fn delete_event(store: &Store, event_id: &str) -> Result<()> {
    store.delete_event(event_id)
}

/// The booking page's read path: fetch the day's events and run the
/// availability engine over them.
pub fn available_slots(
    store: &Store,
    calendar: &Calendar,
    day: NaiveDate,
    now: DateTime<Utc>,
) -> Result<Vec<Slot>> {
    let zone = parse_zone(&calendar.timezone)?;

    // Overfetch a generous window around the day; compute_slots only excludes
    // candidates its busy intervals actually overlap.
    let window_lo = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)) - Duration::days(1);
    let window_hi = window_lo + Duration::days(3);
    let events = store.events_overlapping(&calendar.id, window_lo, window_hi)?;
    let busy: Vec<Slot> = events.iter().map(Event::interval).collect();

    compute_slots(
        day,
        &calendar.working_hours,
        calendar.default_duration_minutes,
        zone,
        &busy,
        now,
    )
    .map_err(Into::into)
}

/// Month-view events as the public page sees them: visibly occupied slots
/// with title, description, and requester identity withheld.
pub fn public_events(
    store: &Store,
    calendar_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Event>> {
    let events = store.events_between(calendar_id, start, end)?;
    Ok(events.iter().map(Event::redacted).collect())
}
