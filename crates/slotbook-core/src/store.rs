//! In-memory transactional document store.
//!
//! Implements the storage contract the booking core is written against:
//! point reads/writes, field-comparison range queries, atomic
//! multi-document transactions with read-your-writes isolation, and
//! per-query change subscriptions.
//!
//! [`Store::run_transaction`] holds the store's write lock for the whole
//! transaction, so transactions are serializable: a conflict check and the
//! writes that depend on it cannot interleave with another transaction.
//! A closure returning `Err` discards every staged write.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{BookingError, Result};
use crate::model::{BookingRequest, Calendar, Event, RequestStatus};
use crate::watch::{WatchHandle, WatchQuery, WatchUpdate, Watcher, WatcherRegistry};

#[derive(Default)]
struct Docs {
    calendars: HashMap<String, Calendar>,
    events: HashMap<String, Event>,
    requests: HashMap<String, BookingRequest>,
}

/// The shared document store: one instance per deployment, used by many
/// concurrent public clients and the owner client.
#[derive(Default)]
pub struct Store {
    docs: RwLock<Docs>,
    watchers: Arc<Mutex<WatcherRegistry>>,
    next_watcher_id: AtomicU64,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Docs>> {
        self.docs
            .read()
            .map_err(|_| BookingError::Transaction("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Docs>> {
        self.docs
            .write()
            .map_err(|_| BookingError::Transaction("store lock poisoned".to_string()))
    }

    // ── Calendars ───────────────────────────────────────────────────────────

    pub fn insert_calendar(&self, calendar: Calendar) -> Result<()> {
        self.write()?
            .calendars
            .insert(calendar.id.clone(), calendar);
        self.notify();
        Ok(())
    }

    pub fn calendar(&self, id: &str) -> Result<Option<Calendar>> {
        Ok(self.read()?.calendars.get(id).cloned())
    }

    /// Resolve a share token to its calendar. Exactly one calendar matches a
    /// live token; a rotated-away token matches nothing.
    pub fn find_calendar_by_token(&self, token: &str) -> Result<Option<Calendar>> {
        Ok(self
            .read()?
            .calendars
            .values()
            .find(|c| c.share_token == token)
            .cloned())
    }

    /// Apply `f` to one calendar document and return the updated copy.
    pub fn update_calendar<F>(&self, id: &str, f: F) -> Result<Calendar>
    where
        F: FnOnce(&mut Calendar),
    {
        let updated = {
            let mut docs = self.write()?;
            let calendar = docs
                .calendars
                .get_mut(id)
                .ok_or_else(|| BookingError::NotFound(id.to_string()))?;
            f(calendar);
            calendar.clone()
        };
        self.notify();
        Ok(updated)
    }

    // ── Events ──────────────────────────────────────────────────────────────

    pub fn insert_event(&self, event: Event) -> Result<()> {
        self.write()?.events.insert(event.id.clone(), event);
        self.notify();
        Ok(())
    }

    pub fn event(&self, id: &str) -> Result<Option<Event>> {
        Ok(self.read()?.events.get(id).cloned())
    }

    /// Apply `f` to one event document and return the updated copy.
    pub fn update_event<F>(&self, id: &str, f: F) -> Result<Event>
    where
        F: FnOnce(&mut Event),
    {
        let updated = {
            let mut docs = self.write()?;
            let event = docs
                .events
                .get_mut(id)
                .ok_or_else(|| BookingError::NotFound(id.to_string()))?;
            f(event);
            event.clone()
        };
        self.notify();
        Ok(updated)
    }

    pub fn delete_event(&self, id: &str) -> Result<()> {
        self.write()?
            .events
            .remove(id)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;
        self.notify();
        Ok(())
    }

    /// Events of one calendar with `startUTC` inside `[start, end]`, sorted
    /// chronologically. This is the month-view query.
    pub fn events_between(
        &self,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        let docs = self.read()?;
        let mut events: Vec<Event> = docs
            .events
            .values()
            .filter(|e| e.calendar_id == calendar_id && e.start_utc >= start && e.start_utc <= end)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start_utc);
        Ok(events)
    }

    /// Events of one calendar overlapping the half-open interval
    /// `[start, end)`: `startUTC < end AND endUTC > start`. This is the
    /// conflict query.
    pub fn events_overlapping(
        &self,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        let docs = self.read()?;
        let mut events: Vec<Event> = docs
            .events
            .values()
            .filter(|e| e.calendar_id == calendar_id && e.start_utc < end && e.end_utc > start)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start_utc);
        Ok(events)
    }

    // ── Booking requests ────────────────────────────────────────────────────

    pub fn insert_request(&self, request: BookingRequest) -> Result<()> {
        self.write()?.requests.insert(request.id.clone(), request);
        self.notify();
        Ok(())
    }

    pub fn request(&self, id: &str) -> Result<Option<BookingRequest>> {
        Ok(self.read()?.requests.get(id).cloned())
    }

    /// Pending requests of one calendar, oldest first.
    pub fn pending_requests(&self, calendar_id: &str) -> Result<Vec<BookingRequest>> {
        let docs = self.read()?;
        let mut requests: Vec<BookingRequest> = docs
            .requests
            .values()
            .filter(|r| r.calendar_id == calendar_id && r.status == RequestStatus::Pending)
            .cloned()
            .collect();
        requests.sort_by_key(|r| r.created_at);
        Ok(requests)
    }

    // ── Transactions ────────────────────────────────────────────────────────

    /// Run `f` as one atomic, isolated transaction.
    ///
    /// Reads inside the transaction see committed state plus this
    /// transaction's own staged writes. If `f` returns `Err`, every staged
    /// write is discarded and the store is untouched; if it returns `Ok`,
    /// all staged writes commit together. The store's write lock is held
    /// for the whole transaction, so no other reader or writer can observe
    /// a partial state.
    pub fn run_transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreTransaction<'_>) -> Result<T>,
    {
        let mut docs = self.write()?;
        let mut tx = StoreTransaction {
            docs: &*docs,
            staged_events: Vec::new(),
            staged_statuses: Vec::new(),
        };
        let outcome = f(&mut tx);
        let StoreTransaction {
            staged_events,
            staged_statuses,
            ..
        } = tx;

        let value = outcome?;

        if staged_events.is_empty() && staged_statuses.is_empty() {
            return Ok(value);
        }

        debug!(
            events = staged_events.len(),
            statuses = staged_statuses.len(),
            "committing transaction"
        );
        for event in staged_events {
            docs.events.insert(event.id.clone(), event);
        }
        for (request_id, status) in staged_statuses {
            if let Some(request) = docs.requests.get_mut(&request_id) {
                request.status = status;
            }
        }
        drop(docs);
        self.notify();
        Ok(value)
    }

    // ── Subscriptions ───────────────────────────────────────────────────────

    /// Register a live query. The callback fires with the current result set
    /// immediately and again after every committed mutation, until the
    /// returned handle is dropped.
    pub fn watch<F>(&self, query: WatchQuery, callback: F) -> Result<WatchHandle>
    where
        F: Fn(WatchUpdate) + Send + Sync + 'static,
    {
        let id = self.next_watcher_id.fetch_add(1, Ordering::Relaxed);
        let initial = {
            let docs = self.read()?;
            eval_query(&docs, &query)
        };
        callback(initial);

        let mut registry = self
            .watchers
            .lock()
            .map_err(|_| BookingError::Transaction("watcher registry poisoned".to_string()))?;
        registry.watchers.push(Watcher {
            id,
            query,
            callback: Box::new(callback),
        });
        Ok(WatchHandle::new(id, Arc::downgrade(&self.watchers)))
    }

    /// Deliver fresh result sets to every registered watcher.
    fn notify(&self) {
        let Ok(registry) = self.watchers.lock() else {
            return;
        };
        if registry.watchers.is_empty() {
            return;
        }
        let Ok(docs) = self.docs.read() else {
            return;
        };
        for watcher in &registry.watchers {
            (watcher.callback)(eval_query(&docs, &watcher.query));
        }
    }
}

/// Transaction view handed to [`Store::run_transaction`] closures. Reads are
/// read-your-writes; writes are staged until commit.
pub struct StoreTransaction<'a> {
    docs: &'a Docs,
    staged_events: Vec<Event>,
    staged_statuses: Vec<(String, RequestStatus)>,
}

impl StoreTransaction<'_> {
    /// Point-read a booking request, with staged status changes applied.
    pub fn request(&self, id: &str) -> Option<BookingRequest> {
        let mut request = self.docs.requests.get(id).cloned()?;
        for (staged_id, status) in &self.staged_statuses {
            if staged_id == id {
                request.status = *status;
            }
        }
        Some(request)
    }

    /// Conflict query over committed and staged events: all events of the
    /// calendar overlapping the half-open `[start, end)`.
    pub fn events_overlapping(
        &self,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .docs
            .events
            .values()
            .chain(self.staged_events.iter())
            .filter(|e| e.calendar_id == calendar_id && e.start_utc < end && e.end_utc > start)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start_utc);
        events
    }

    /// Stage an event creation for commit.
    pub fn stage_event(&mut self, event: Event) {
        self.staged_events.push(event);
    }

    /// Stage a request status transition for commit.
    pub fn stage_request_status(&mut self, request_id: &str, status: RequestStatus) {
        self.staged_statuses.push((request_id.to_string(), status));
    }
}

fn eval_query(docs: &Docs, query: &WatchQuery) -> WatchUpdate {
    match query {
        WatchQuery::Events {
            calendar_id,
            start,
            end,
        } => {
            let mut events: Vec<Event> = docs
                .events
                .values()
                .filter(|e| {
                    e.calendar_id == *calendar_id && e.start_utc >= *start && e.start_utc <= *end
                })
                .cloned()
                .collect();
            events.sort_by_key(|e| e.start_utc);
            WatchUpdate::Events(events)
        }
        WatchQuery::PendingRequests { calendar_id } => {
            let mut requests: Vec<BookingRequest> = docs
                .requests
                .values()
                .filter(|r| r.calendar_id == *calendar_id && r.status == RequestStatus::Pending)
                .cloned()
                .collect();
            requests.sort_by_key(|r| r.created_at);
            WatchUpdate::PendingRequests(requests)
        }
    }
}
