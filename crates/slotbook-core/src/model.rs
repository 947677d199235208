//! Persisted document shapes for calendars, events, and booking requests.
//!
//! Wire naming is camelCase with explicit `UTC` suffixes (`startUTC`,
//! `requestedStartUTC`) so serialized documents match the store's logical
//! shape regardless of the backing implementation.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use slotbook_engine::{month_of, Slot, WorkingHours};

/// Fresh v4 document id.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A calendar owned by one user and published through a share token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub id: String,
    pub owner_id: String,
    /// Opaque 12-character public access token. Unique across calendars;
    /// rotation invalidates the previous token immediately.
    pub share_token: String,
    /// IANA zone name, e.g. "Asia/Kolkata".
    pub timezone: String,
    pub working_hours: WorkingHours,
    pub default_duration_minutes: i64,
}

/// Origin metadata for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "camelCase")]
pub enum EventMeta {
    /// Created directly by the owner.
    Owner,
    /// Created by the confirmation transaction from a booking request.
    #[serde(rename_all = "camelCase")]
    Booking {
        requester_name: String,
        requester_email: String,
    },
}

/// A scheduled calendar event. Instants are absolute UTC; `start < end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "startUTC")]
    pub start_utc: DateTime<Utc>,
    #[serde(rename = "endUTC")]
    pub end_utc: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<EventMeta>,
}

impl Event {
    /// The event's occupied `[start, end)` interval.
    pub fn interval(&self) -> Slot {
        Slot {
            start: self.start_utc,
            end: self.end_utc,
        }
    }

    pub fn is_booking_derived(&self) -> bool {
        matches!(self.meta, Some(EventMeta::Booking { .. }))
    }

    /// Public-page projection: the slot is visibly occupied but the title,
    /// description, and requester identity are withheld.
    pub fn redacted(&self) -> Event {
        Event {
            title: "Busy".to_string(),
            description: None,
            meta: None,
            ..self.clone()
        }
    }
}

/// Lifecycle state of a booking request. Transitions are one-directional:
/// `Pending` → `Confirmed` or `Pending` → `Rejected`; terminal states are
/// final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Rejected,
}

/// A visitor's request for a slot, awaiting the owner's decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub id: String,
    pub calendar_id: String,
    pub requester_name: String,
    pub requester_email: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "requestedStartUTC")]
    pub requested_start_utc: DateTime<Utc>,
    #[serde(rename = "requestedEndUTC")]
    pub requested_end_utc: DateTime<Utc>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl BookingRequest {
    /// The requested `[start, end)` interval.
    pub fn interval(&self) -> Slot {
        Slot {
            start: self.requested_start_utc,
            end: self.requested_end_utc,
        }
    }
}

/// The (year, month) a calendar view currently displays. Request and event
/// creation are scoped to this month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
}

impl CalendarMonth {
    /// The month `instant` falls in, as seen from `zone`.
    pub fn of(instant: DateTime<Utc>, zone: Tz) -> Self {
        let (year, month) = month_of(instant, zone);
        CalendarMonth { year, month }
    }

    pub fn contains(&self, instant: DateTime<Utc>, zone: Tz) -> bool {
        Self::of(instant, zone) == *self
    }
}
