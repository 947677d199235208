//! Error types for booking operations.

use thiserror::Error;

use crate::model::RequestStatus;
use slotbook_engine::EngineError;

#[derive(Error, Debug)]
pub enum BookingError {
    /// A business rule was violated at creation time. Surfaced to the
    /// submitting user; never retried automatically.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The confirmation lost a race: an event already occupies the requested
    /// range. The request stays pending and actionable.
    #[error("This time slot is no longer available")]
    SlotConflict,

    /// An operation was attempted on a request not in the required state.
    #[error("Invalid request state: expected {expected}, found {found:?}")]
    InvalidState {
        expected: &'static str,
        found: RequestStatus,
    },

    /// Storage-layer failure during an atomic operation. The transaction
    /// guarantees all-or-nothing effect, so retrying is safe.
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// A point read referenced a document that does not exist.
    #[error("No document with id {0}")]
    NotFound(String),

    /// A time/timezone/config error from the engine crate.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, BookingError>;
