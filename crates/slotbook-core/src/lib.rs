//! # slotbook-core
//!
//! Booking-request lifecycle, confirmation transactions, and share tokens
//! for shareable booking calendars.
//!
//! A calendar owner publishes a share token; public visitors request slots
//! computed by `slotbook-engine`; the owner confirms or rejects. The one
//! hard guarantee lives in [`confirm`]: two simultaneous confirmations can
//! never create overlapping booking-derived events, because the conflict
//! check and the writes it protects run inside a single isolated store
//! transaction.
//!
//! ## Modules
//!
//! - [`model`] — Calendar / Event / BookingRequest document shapes
//! - [`store`] — in-memory transactional document store with live queries
//! - [`request`] — request creation (validated) and rejection
//! - [`confirm`] — the atomic confirmation transaction
//! - [`token`] — share-token issuance and rotation
//! - [`calendar`] — owner operations and the public read paths
//! - [`watch`] — per-query change subscriptions
//! - [`error`] — error types

pub mod calendar;
pub mod confirm;
pub mod error;
pub mod model;
pub mod request;
pub mod store;
pub mod token;
pub mod watch;

pub use calendar::{
    add_owner_event, available_slots, create_calendar, delete_event, public_events,
    resolve_share_token, update_event,
};
pub use confirm::confirm;
pub use error::BookingError;
pub use model::{BookingRequest, Calendar, CalendarMonth, Event, EventMeta, RequestStatus};
pub use request::{create_request, reject, RequestInput};
pub use slotbook_engine::{Slot, WorkingHours};
pub use store::{Store, StoreTransaction};
pub use token::{issue_token, rotate_token, TOKEN_LEN};
pub use watch::{WatchHandle, WatchQuery, WatchUpdate};
