//! Tests for owner calendar operations, token rotation, and the public
//! read paths.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use slotbook_core::{
    add_owner_event, available_slots, create_calendar, delete_event, public_events,
    resolve_share_token, rotate_token, update_event, BookingError, CalendarMonth, Store, TOKEN_LEN,
};

fn utc(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap()
}

fn march() -> CalendarMonth {
    CalendarMonth {
        year: 2026,
        month: 3,
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

// ── Calendar creation & tokens ──────────────────────────────────────────────

#[test]
fn new_calendar_has_signup_defaults() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();

    assert_eq!(calendar.owner_id, "owner-1");
    assert_eq!(calendar.timezone, "Asia/Kolkata");
    assert_eq!(calendar.working_hours.start.as_deref(), Some("09:00"));
    assert_eq!(calendar.working_hours.end.as_deref(), Some("18:00"));
    assert_eq!(calendar.default_duration_minutes, 30);
    assert_eq!(calendar.share_token.len(), TOKEN_LEN);
}

#[test]
fn share_token_uses_url_safe_alphabet() {
    for _ in 0..50 {
        let token = slotbook_core::issue_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    }
}

#[test]
fn share_token_resolves_to_exactly_its_calendar() {
    let store = Store::new();
    let a = create_calendar(&store, "owner-a").unwrap();
    let b = create_calendar(&store, "owner-b").unwrap();

    let found = resolve_share_token(&store, &a.share_token).unwrap().unwrap();
    assert_eq!(found.id, a.id);
    let found = resolve_share_token(&store, &b.share_token).unwrap().unwrap();
    assert_eq!(found.id, b.id);

    assert!(resolve_share_token(&store, "nonsense-tok").unwrap().is_none());
}

#[test]
fn rotation_invalidates_the_old_token_immediately() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();
    let old_token = calendar.share_token.clone();

    let rotated = rotate_token(&store, &calendar.id).unwrap();

    assert_ne!(rotated.share_token, old_token);
    assert_eq!(rotated.share_token.len(), TOKEN_LEN);
    assert!(resolve_share_token(&store, &old_token).unwrap().is_none());
    assert_eq!(
        resolve_share_token(&store, &rotated.share_token)
            .unwrap()
            .unwrap()
            .id,
        calendar.id
    );
}

#[test]
fn rotating_unknown_calendar_is_not_found() {
    let store = Store::new();
    let err = rotate_token(&store, "ghost").unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));
}

// ── Owner events ────────────────────────────────────────────────────────────

#[test]
fn owner_event_converts_wall_clock_in_owner_zone() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();

    let event = add_owner_event(
        &store,
        &calendar,
        "Standup",
        Some("Daily sync"),
        day(),
        "10:00",
        "10:30",
        march(),
        utc(1, 0, 0),
    )
    .unwrap();

    // 10:00 IST is 04:30Z.
    assert_eq!(event.start_utc, utc(16, 4, 30));
    assert_eq!(event.end_utc, utc(16, 5, 0));
    assert!(!event.is_booking_derived());
}

#[test]
fn owner_event_with_reversed_times_is_rejected() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();

    let err = add_owner_event(
        &store,
        &calendar,
        "Standup",
        None,
        day(),
        "10:30",
        "10:00",
        march(),
        utc(1, 0, 0),
    )
    .unwrap_err();

    assert!(matches!(err, BookingError::Validation(_)));
}

#[test]
fn owner_event_with_malformed_time_is_engine_error() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();

    let err = add_owner_event(
        &store,
        &calendar,
        "Standup",
        None,
        day(),
        "ten",
        "10:30",
        march(),
        utc(1, 0, 0),
    )
    .unwrap_err();

    assert!(matches!(err, BookingError::Engine(_)));
}

#[test]
fn owner_event_outside_displayed_month_is_rejected() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();

    let err = add_owner_event(
        &store,
        &calendar,
        "Standup",
        None,
        NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
        "10:00",
        "10:30",
        march(),
        utc(1, 0, 0),
    )
    .unwrap_err();

    assert!(matches!(err, BookingError::Validation(_)));
}

#[test]
fn update_event_reschedules_and_retitles() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();
    let event = add_owner_event(
        &store,
        &calendar,
        "Standup",
        None,
        day(),
        "10:00",
        "10:30",
        march(),
        utc(1, 0, 0),
    )
    .unwrap();

    let updated = update_event(
        &store,
        &calendar,
        &event.id,
        "Retro",
        day(),
        "15:00",
        "16:00",
    )
    .unwrap();

    assert_eq!(updated.title, "Retro");
    assert_eq!(updated.start_utc, utc(16, 9, 30)); // 15:00 IST
    assert_eq!(updated.end_utc, utc(16, 10, 30)); // 16:00 IST
}

#[test]
fn delete_event_removes_it_from_queries() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();
    let event = add_owner_event(
        &store,
        &calendar,
        "Standup",
        None,
        day(),
        "10:00",
        "10:30",
        march(),
        utc(1, 0, 0),
    )
    .unwrap();

    delete_event(&store, &event.id).unwrap();

    let events = store
        .events_between(&calendar.id, utc(1, 0, 0), utc(28, 0, 0))
        .unwrap();
    assert!(events.is_empty());
}

// ── Availability read path ──────────────────────────────────────────────────

#[test]
fn empty_calendar_offers_the_full_working_day() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();

    // now = 08:00 IST (02:30Z).
    let slots = available_slots(&store, &calendar, day(), utc(16, 2, 30)).unwrap();

    assert_eq!(slots.len(), 18);
    assert_eq!(slots[0].start, utc(16, 3, 30)); // 09:00 IST
}

#[test]
fn scheduled_event_removes_its_slot() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();
    add_owner_event(
        &store,
        &calendar,
        "Standup",
        None,
        day(),
        "10:00",
        "10:30",
        march(),
        utc(1, 0, 0),
    )
    .unwrap();

    let slots = available_slots(&store, &calendar, day(), utc(16, 2, 30)).unwrap();

    assert_eq!(slots.len(), 17);
    assert!(slots.iter().all(|s| s.start != utc(16, 4, 30)));
}

#[test]
fn confirmed_booking_removes_its_slot_for_later_visitors() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();
    let request = slotbook_core::create_request(
        &store,
        &calendar,
        slotbook_core::RequestInput {
            requester_name: "Ada".to_string(),
            requester_email: "ada@example.com".to_string(),
            title: "Intro call".to_string(),
            description: None,
            requested_start: utc(16, 4, 30),
            requested_end: utc(16, 5, 0),
        },
        march(),
        utc(16, 0, 0),
    )
    .unwrap();
    slotbook_core::confirm(&store, &request.id, utc(16, 0, 30)).unwrap();

    let slots = available_slots(&store, &calendar, day(), utc(16, 2, 30)).unwrap();
    assert_eq!(slots.len(), 17);
}

// ── Public projection ───────────────────────────────────────────────────────

#[test]
fn public_events_withhold_title_description_and_meta() {
    let store = Store::new();
    let calendar = create_calendar(&store, "owner-1").unwrap();
    add_owner_event(
        &store,
        &calendar,
        "Salary negotiation",
        Some("confidential"),
        day(),
        "10:00",
        "10:30",
        march(),
        utc(1, 0, 0),
    )
    .unwrap();

    let events = public_events(&store, &calendar.id, utc(1, 0, 0), utc(28, 0, 0)).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Busy");
    assert!(events[0].description.is_none());
    assert!(events[0].meta.is_none());
    // The occupied range itself stays visible.
    assert_eq!(events[0].start_utc, utc(16, 4, 30));
}
