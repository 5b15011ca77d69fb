//! Document-store contract for drive entry records.

use std::{cell::RefCell, collections::BTreeMap, fmt, future::Future, pin::Pin, rc::Rc};

use crate::{
    entry::{DriveEntry, EntryFilter, NewEntry},
    time::next_entry_id,
};

/// Object-safe boxed future used by [`DocumentStore`] async methods.
pub type DocumentFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Callback receiving the full matching snapshot every time it changes.
pub type SnapshotListener = Rc<dyn Fn(Vec<DriveEntry>)>;

/// Host service for entry metadata records.
pub trait DocumentStore {
    /// Creates a record and returns it with its store-assigned id.
    fn create<'a>(&'a self, record: NewEntry) -> DocumentFuture<'a, Result<DriveEntry, String>>;

    /// Returns the records matching `filter` once.
    fn query<'a>(
        &'a self,
        filter: &'a EntryFilter,
    ) -> DocumentFuture<'a, Result<Vec<DriveEntry>, String>>;

    /// Starts a live query. `listener` receives the current snapshot and every later one until the
    /// returned [`Subscription`] is dropped.
    fn subscribe(
        &self,
        filter: EntryFilter,
        listener: SnapshotListener,
    ) -> Result<Subscription, String>;

    /// Deletes a record by id.
    fn delete<'a>(&'a self, id: &'a str) -> DocumentFuture<'a, Result<(), String>>;
}

/// Live-query registration. Dropping it detaches the listener.
#[must_use = "dropping a subscription immediately unsubscribes"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps the unsubscribe action of a store.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Subscription with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Unsubscribes now.
    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op document store for unsupported targets and failure-path tests.
pub struct NoopDocumentStore;

impl NoopDocumentStore {
    fn unavailable(op: &str) -> String {
        format!("document store unavailable: {op}")
    }
}

impl DocumentStore for NoopDocumentStore {
    fn create<'a>(&'a self, _record: NewEntry) -> DocumentFuture<'a, Result<DriveEntry, String>> {
        Box::pin(async { Err(Self::unavailable("create")) })
    }

    fn query<'a>(
        &'a self,
        _filter: &'a EntryFilter,
    ) -> DocumentFuture<'a, Result<Vec<DriveEntry>, String>> {
        Box::pin(async { Err(Self::unavailable("query")) })
    }

    fn subscribe(
        &self,
        _filter: EntryFilter,
        _listener: SnapshotListener,
    ) -> Result<Subscription, String> {
        Err(Self::unavailable("subscribe"))
    }

    fn delete<'a>(&'a self, _id: &'a str) -> DocumentFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unavailable("delete")) })
    }
}

#[derive(Default)]
struct MemoryDocuments {
    records: Vec<DriveEntry>,
    listeners: BTreeMap<u64, (EntryFilter, SnapshotListener)>,
    next_listener_id: u64,
}

impl MemoryDocuments {
    fn snapshot(&self, filter: &EntryFilter) -> Vec<DriveEntry> {
        self.records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect()
    }

    fn pending_deliveries(&self, changed: &DriveEntry) -> Vec<(SnapshotListener, Vec<DriveEntry>)> {
        self.listeners
            .values()
            .filter(|(filter, _)| filter.matches(changed))
            .map(|(filter, listener)| (listener.clone(), self.snapshot(filter)))
            .collect()
    }
}

#[derive(Clone, Default)]
/// In-memory document store with synchronous live-query delivery.
pub struct MemoryDocumentStore {
    inner: Rc<RefCell<MemoryDocuments>>,
}

impl MemoryDocumentStore {
    /// Builds a store pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = DriveEntry>) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().records.extend(records);
        store
    }

    /// Copy of every stored record in insertion order.
    pub fn records(&self) -> Vec<DriveEntry> {
        self.inner.borrow().records.clone()
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn deliver(&self, changed: &DriveEntry) {
        // Listeners may call back into the store, so the borrow ends before delivery.
        let deliveries = self.inner.borrow().pending_deliveries(changed);
        for (listener, snapshot) in deliveries {
            listener(snapshot);
        }
    }
}

impl fmt::Debug for MemoryDocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryDocumentStore")
            .field("records", &inner.records.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn create<'a>(&'a self, record: NewEntry) -> DocumentFuture<'a, Result<DriveEntry, String>> {
        Box::pin(async move {
            let entry = record.into_entry(next_entry_id());
            self.inner.borrow_mut().records.push(entry.clone());
            self.deliver(&entry);
            Ok(entry)
        })
    }

    fn query<'a>(
        &'a self,
        filter: &'a EntryFilter,
    ) -> DocumentFuture<'a, Result<Vec<DriveEntry>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().snapshot(filter)) })
    }

    fn subscribe(
        &self,
        filter: EntryFilter,
        listener: SnapshotListener,
    ) -> Result<Subscription, String> {
        let (listener_id, initial) = {
            let mut inner = self.inner.borrow_mut();
            let listener_id = inner.next_listener_id;
            inner.next_listener_id += 1;
            let initial = inner.snapshot(&filter);
            inner
                .listeners
                .insert(listener_id, (filter, listener.clone()));
            (listener_id, initial)
        };
        listener(initial);

        let weak = Rc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.remove(&listener_id);
            }
        }))
    }

    fn delete<'a>(&'a self, id: &'a str) -> DocumentFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let removed = {
                let mut inner = self.inner.borrow_mut();
                let index = inner
                    .records
                    .iter()
                    .position(|record| record.id == id)
                    .ok_or_else(|| format!("document not found: {id}"))?;
                inner.records.remove(index)
            };
            self.deliver(&removed);
            Ok(())
        })
    }
}
