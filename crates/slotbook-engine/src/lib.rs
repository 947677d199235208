//! # slotbook-engine
//!
//! Deterministic slot availability computation for shareable booking
//! calendars.
//!
//! The engine answers one question — which time slots are bookable at a
//! given instant — from a working-hours window, a slot duration, a timezone,
//! and the set of already-scheduled busy intervals. It performs no I/O and
//! reads no ambient clock: `now` is always an explicit input, so every
//! result is reproducible in tests without wall-clock mocking.
//!
//! ## Quick start
//!
//! ```rust
//! use slotbook_engine::{split_into_slots, Slot};
//!
//! let window_start = "2026-03-16T09:00:00Z".parse().unwrap();
//! let window_end = "2026-03-16T10:30:00Z".parse().unwrap();
//!
//! let slots: Vec<Slot> = split_into_slots(window_start, window_end, 30)
//!     .unwrap()
//!     .collect();
//! assert_eq!(slots.len(), 3);
//! assert!(!slots[0].overlaps(&slots[1]));
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — `[start, end)` slots, overlap test, fixed-duration splitting
//! - [`wallclock`] — timezone-aware wall-clock ↔ absolute-instant conversion
//! - [`availability`] — working hours + busy intervals → bookable slots
//! - [`grid`] — 42-cell month-grid layout for calendar views
//! - [`error`] — error types

pub mod availability;
pub mod error;
pub mod grid;
pub mod interval;
pub mod wallclock;

pub use availability::{compute_slots, WorkingHours};
pub use error::EngineError;
pub use grid::month_grid;
pub use interval::{split_into_slots, Slot, SlotIter};
pub use wallclock::{format_in_zone, month_of, parse_wall_time, parse_zone, to_absolute, to_wall_clock};
