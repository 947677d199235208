//! Booking-request lifecycle: creation with validation, and rejection.
//!
//! A request is created `pending` and only ever moves to `confirmed` (see
//! [`crate::confirm`]) or `rejected`. No conflict check happens at creation:
//! conflict resolution is deferred to confirmation time, so a race between
//! read-time availability and confirm-time commit cannot double-book.

use chrono::{DateTime, Utc};

use crate::error::{BookingError, Result};
use crate::model::{new_id, BookingRequest, Calendar, CalendarMonth, RequestStatus};
use crate::store::Store;
use slotbook_engine::parse_zone;

/// The booking form a public visitor submits.
#[derive(Debug, Clone)]
pub struct RequestInput {
    pub requester_name: String,
    pub requester_email: String,
    pub title: String,
    pub description: Option<String>,
    pub requested_start: DateTime<Utc>,
    pub requested_end: DateTime<Utc>,
}

/// Validate and persist a visitor's booking request.
///
/// Requests are scoped to the month the calendar view currently displays
/// (`month`, interpreted in the calendar's timezone).
///
/// # Errors
/// Returns `BookingError::Validation` if the requested range is reversed or
/// empty, the requester fields are unusable, the start is in the past, or
/// the start falls outside `month`. Nothing is persisted on any error.
pub fn create_request(
    store: &Store,
    calendar: &Calendar,
    input: RequestInput,
    month: CalendarMonth,
    now: DateTime<Utc>,
) -> Result<BookingRequest> {
    if input.requested_end <= input.requested_start {
        return Err(BookingError::Validation(
            "requested end must be after requested start".to_string(),
        ));
    }
    if input.requester_name.trim().is_empty() {
        return Err(BookingError::Validation(
            "requester name must not be empty".to_string(),
        ));
    }
    let email = input.requester_email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(BookingError::Validation(format!(
            "'{}' is not a usable email address",
            input.requester_email
        )));
    }
    if input.requested_start < now {
        return Err(BookingError::Validation(
            "cannot request a slot in the past".to_string(),
        ));
    }

    let zone = parse_zone(&calendar.timezone)?;
    if !month.contains(input.requested_start, zone) {
        return Err(BookingError::Validation(
            "requests are limited to the currently displayed month".to_string(),
        ));
    }

    let request = BookingRequest {
        id: new_id(),
        calendar_id: calendar.id.clone(),
        requester_name: input.requester_name,
        requester_email: input.requester_email,
        title: input.title,
        description: input.description,
        requested_start_utc: input.requested_start,
        requested_end_utc: input.requested_end,
        status: RequestStatus::Pending,
        created_at: now,
    };
    store.insert_request(request.clone())?;
    Ok(request)
}

/// Reject a pending request. The check and the status write are one atomic
/// step, so two concurrent decisions cannot both apply.
///
/// # Errors
/// Returns `BookingError::InvalidState` if the request is not pending;
/// terminal states are final. Returns `BookingError::NotFound` if no such
/// request exists.
pub fn reject(store: &Store, request_id: &str) -> Result<BookingRequest> {
    store.run_transaction(|tx| {
        let mut request = tx
            .request(request_id)
            .ok_or_else(|| BookingError::NotFound(request_id.to_string()))?;
        if request.status != RequestStatus::Pending {
            return Err(BookingError::InvalidState {
                expected: "pending",
                found: request.status,
            });
        }
        tx.stage_request_status(request_id, RequestStatus::Rejected);
        request.status = RequestStatus::Rejected;
        Ok(request)
    })
}
