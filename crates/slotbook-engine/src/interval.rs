//! Half-open time intervals and fixed-duration slot generation.
//!
//! A [`Slot`] is a `[start, end)` interval on the UTC timeline. Two slots
//! overlap when they share at least one instant; a slot ending exactly when
//! another begins does NOT overlap it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A candidate bookable window: a half-open `[start, end)` interval.
///
/// Slots are derived values — computed fresh on every availability query and
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    /// True iff the two `[start, end)` intervals share any instant.
    ///
    /// Adjacent intervals where one ends exactly when the other starts are
    /// NOT overlapping.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Lazy iterator over consecutive fixed-duration slots within a window.
///
/// Produced by [`split_into_slots`]. Cloning the iterator restarts the
/// sequence from the beginning.
#[derive(Debug, Clone)]
pub struct SlotIter {
    cursor: DateTime<Utc>,
    window_end: DateTime<Utc>,
    step: Duration,
}

impl Iterator for SlotIter {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        let end = self.cursor.checked_add_signed(self.step)?;
        if end > self.window_end {
            return None;
        }
        let slot = Slot {
            start: self.cursor,
            end,
        };
        self.cursor = end;
        Some(slot)
    }
}

/// Split `[window_start, window_end)` into consecutive non-overlapping slots
/// of exactly `duration_minutes` length, starting at `window_start`.
///
/// A final partial-length remainder (window duration not evenly divisible by
/// the slot duration) is discarded, not emitted short.
///
/// # Errors
/// Returns `EngineError::InvalidTime` if `window_end <= window_start`.
/// Returns `EngineError::InvalidConfig` if `duration_minutes` is zero or
/// negative.
pub fn split_into_slots(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    duration_minutes: i64,
) -> Result<SlotIter> {
    if duration_minutes <= 0 {
        return Err(EngineError::InvalidConfig(format!(
            "slot duration must be positive, got {} minutes",
            duration_minutes
        )));
    }
    if window_end <= window_start {
        return Err(EngineError::InvalidTime(format!(
            "window end {} is not after window start {}",
            window_end, window_start
        )));
    }

    Ok(SlotIter {
        cursor: window_start,
        window_end,
        step: Duration::minutes(duration_minutes),
    })
}
