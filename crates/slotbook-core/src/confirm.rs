//! The confirmation transaction: at-most-one booking per contested range.
//!
//! Confirming a request must read the calendar's events (conflict check) and
//! write the new event plus the status transition as ONE isolated
//! transaction. A read-then-write without isolation is a race: two owners
//! (or a double-click) confirming overlapping requests concurrently could
//! both pass the check. Here the whole protocol runs inside
//! [`Store::run_transaction`], so exactly one confirmation per contested
//! time range can win.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{BookingError, Result};
use crate::model::{new_id, Event, EventMeta, RequestStatus};
use crate::store::Store;

/// Confirm a pending request, promoting it to a calendar event.
///
/// Protocol, inside one atomic transaction:
/// 1. read the request — it must still be `pending`;
/// 2. read all events overlapping `[requestedStart, requestedEnd)`;
/// 3. any hit aborts with `SlotConflict` — the request stays pending, so the
///    owner can retry a different slot or reject it;
/// 4. otherwise stage the new event (carrying the request's title,
///    description, range, and requester metadata) together with the
///    `confirmed` transition; both commit or neither does.
///
/// # Errors
/// `SlotConflict` when the range is already taken; `InvalidState` when the
/// request is not pending; `NotFound` for an unknown id; `Transaction` for
/// storage failure (no effect, safe to retry).
pub fn confirm(store: &Store, request_id: &str, now: DateTime<Utc>) -> Result<Event> {
    let event = store.run_transaction(|tx| {
        let request = tx
            .request(request_id)
            .ok_or_else(|| BookingError::NotFound(request_id.to_string()))?;
        if request.status != RequestStatus::Pending {
            return Err(BookingError::InvalidState {
                expected: "pending",
                found: request.status,
            });
        }

        let conflicts = tx.events_overlapping(
            &request.calendar_id,
            request.requested_start_utc,
            request.requested_end_utc,
        );
        if !conflicts.is_empty() {
            debug!(request = %request.id, "confirmation lost: range already booked");
            return Err(BookingError::SlotConflict);
        }

        let event = Event {
            id: new_id(),
            calendar_id: request.calendar_id.clone(),
            title: request.title.clone(),
            description: request.description.clone(),
            start_utc: request.requested_start_utc,
            end_utc: request.requested_end_utc,
            created_at: now,
            meta: Some(EventMeta::Booking {
                requester_name: request.requester_name.clone(),
                requester_email: request.requester_email.clone(),
            }),
        };
        tx.stage_event(event.clone());
        tx.stage_request_status(&request.id, RequestStatus::Confirmed);
        Ok(event)
    })?;

    info!(event = %event.id, request = %request_id, "booking confirmed");
    Ok(event)
}
