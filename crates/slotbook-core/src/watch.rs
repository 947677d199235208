//! Per-query change subscriptions.
//!
//! A caller registers a callback for one query; the store invokes it with a
//! fresh result set immediately on registration and again after every
//! committed mutation. Dropping (or explicitly unsubscribing) the returned
//! [`WatchHandle`] stops delivery.

use std::sync::{Mutex, Weak};

use chrono::{DateTime, Utc};

use crate::model::{BookingRequest, Event};

/// A live query against the store.
#[derive(Debug, Clone)]
pub enum WatchQuery {
    /// Events of one calendar with `startUTC` inside `[start, end]`.
    Events {
        calendar_id: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Pending booking requests of one calendar.
    PendingRequests { calendar_id: String },
}

/// A fresh result set delivered to a watcher.
#[derive(Debug, Clone)]
pub enum WatchUpdate {
    Events(Vec<Event>),
    PendingRequests(Vec<BookingRequest>),
}

pub(crate) type WatchCallback = Box<dyn Fn(WatchUpdate) + Send + Sync>;

pub(crate) struct Watcher {
    pub(crate) id: u64,
    pub(crate) query: WatchQuery,
    pub(crate) callback: WatchCallback,
}

#[derive(Default)]
pub(crate) struct WatcherRegistry {
    pub(crate) watchers: Vec<Watcher>,
}

/// Keeps a subscription alive. Unsubscribes on drop.
pub struct WatchHandle {
    id: u64,
    registry: Weak<Mutex<WatcherRegistry>>,
}

impl WatchHandle {
    pub(crate) fn new(id: u64, registry: Weak<Mutex<WatcherRegistry>>) -> Self {
        WatchHandle { id, registry }
    }

    /// Stop delivery. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.lock() {
                registry.watchers.retain(|w| w.id != self.id);
            }
        }
    }
}
