//! Per-field result store.
//!
//! The store is the only place check results are written. Each field carries
//! a generation counter: starting a check bumps it, and a pending check may
//! only commit while its generation is still current. A slow asynchronous
//! check that is overtaken by a newer one therefore cannot overwrite the
//! newer result.
//!
//! Every commit is also published on a [`tokio::sync::broadcast`] channel so
//! a view layer can render messages and toggle styles. Events are
//! fire-and-forget: with no subscriber they are dropped.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::verdict::Verdict;

/// Last known validity of one field.
///
/// `valid` is `None` until the field has been checked once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldResult {
    pub valid: Option<bool>,
    pub message: String,
}

impl From<&Verdict> for FieldResult {
    fn from(verdict: &Verdict) -> Self {
        Self {
            valid: Some(verdict.is_valid()),
            message: verdict.message().to_string(),
        }
    }
}

/// A committed result, as published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEvent {
    pub namespace: String,
    pub field: String,
    pub result: FieldResult,
}

#[derive(Debug, Default)]
struct Entry {
    result: FieldResult,
    generation: u64,
    in_flight: bool,
}

/// Claim on a field's next result, handed out when a check starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ticket {
    field: String,
    generation: u64,
}

/// Shared, namespaced bag of field results.
///
/// Cloning yields another handle to the same store.
#[derive(Debug, Clone)]
pub struct ResultStore {
    namespace: Arc<str>,
    entries: Arc<Mutex<IndexMap<String, Entry>>>,
    events: broadcast::Sender<ResultEvent>,
}

impl ResultStore {
    /// Creates an empty store. `capacity` bounds the event backlog of slow
    /// subscribers.
    #[must_use]
    pub fn new(namespace: impl Into<String>, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            namespace: Arc::from(namespace.into()),
            entries: Arc::new(Mutex::new(IndexMap::new())),
            events,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Creates the field's result if it does not exist yet.
    pub fn register(&self, field: &str) {
        let mut entries = self.entries.lock();
        if !entries.contains_key(field) {
            entries.insert(field.to_string(), Entry::default());
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.lock().contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<FieldResult> {
        self.entries
            .lock()
            .get(field)
            .map(|entry| entry.result.clone())
    }

    /// All results in registration order.
    pub fn snapshot(&self) -> IndexMap<String, FieldResult> {
        self.entries
            .lock()
            .iter()
            .map(|(field, entry)| (field.clone(), entry.result.clone()))
            .collect()
    }

    /// Whether an asynchronous check of the field is still unresolved.
    pub fn is_pending(&self, field: &str) -> bool {
        self.entries
            .lock()
            .get(field)
            .is_some_and(|entry| entry.in_flight)
    }

    /// AND over stored results; `None` while any field is unchecked.
    pub fn form_valid(&self) -> Option<bool> {
        self.entries
            .lock()
            .values()
            .try_fold(true, |all, entry| entry.result.valid.map(|valid| all && valid))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Subscribes to committed results.
    pub fn subscribe(&self) -> broadcast::Receiver<ResultEvent> {
        self.events.subscribe()
    }

    /// Starts a check of `field`, superseding any check still in flight.
    pub(crate) fn begin(&self, field: &str, pending: bool) -> Ticket {
        let mut entries = self.entries.lock();
        let entry = entries.entry(field.to_string()).or_default();
        entry.generation += 1;
        entry.in_flight = pending;
        Ticket {
            field: field.to_string(),
            generation: entry.generation,
        }
    }

    /// Writes the verdict unless a newer check started since `ticket` was
    /// issued. Returns whether it was written.
    pub(crate) fn commit(&self, ticket: &Ticket, verdict: &Verdict) -> bool {
        let result = FieldResult::from(verdict);
        {
            let mut entries = self.entries.lock();
            let Some(entry) = entries.get_mut(&ticket.field) else {
                return false;
            };
            if entry.generation != ticket.generation {
                debug!(
                    field = %ticket.field,
                    generation = ticket.generation,
                    current = entry.generation,
                    "discarding stale field result"
                );
                return false;
            }
            entry.result = result.clone();
            entry.in_flight = false;
        }

        let _ = self.events.send(ResultEvent {
            namespace: self.namespace.to_string(),
            field: ticket.field.clone(),
            result,
        });
        true
    }

    /// Starts an asynchronous check; the returned guard commits its verdict.
    pub(crate) fn begin_pending(&self, field: &str) -> InFlight {
        InFlight {
            ticket: self.begin(field, true),
            store: self.clone(),
        }
    }

    /// Clears the in-flight flag of a check that ended without a verdict.
    pub(crate) fn abandon(&self, ticket: &Ticket) {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get_mut(&ticket.field)
            && entry.generation == ticket.generation
        {
            entry.in_flight = false;
        }
    }
}

/// An asynchronous check in progress.
///
/// Dropping the guard without committing (the check failed, or its future
/// was dropped unresolved) clears the field's in-flight flag.
#[derive(Debug)]
pub(crate) struct InFlight {
    store: ResultStore,
    ticket: Ticket,
}

impl InFlight {
    pub(crate) fn field(&self) -> &str {
        &self.ticket.field
    }

    pub(crate) fn commit(&self, verdict: &Verdict) -> bool {
        self.store.commit(&self.ticket, verdict)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.store.abandon(&self.ticket);
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new("validator", 64)
    }
}
