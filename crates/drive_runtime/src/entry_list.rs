//! Live entry list for the current folder.
//!
//! [`EntryListStore`] owns at most one document-store subscription, filtered to the watched path.
//! Switching paths drops the previous [`Subscription`] before the new one is opened, and any
//! snapshot that still arrives for a path that is no longer watched is discarded.

use std::{cell::RefCell, fmt, rc::Rc};

use drive_host::{DocumentStore, DriveEntry, DrivePath, EntryFilter, Subscription};

#[derive(Default)]
struct EntryListInner {
    path: Option<DrivePath>,
    subscription: Option<Subscription>,
    snapshot: Vec<DriveEntry>,
    loading: bool,
}

/// Read-through cache of the entries in one folder.
#[derive(Clone)]
pub struct EntryListStore {
    documents: Rc<dyn DocumentStore>,
    inner: Rc<RefCell<EntryListInner>>,
}

impl EntryListStore {
    pub fn new(documents: Rc<dyn DocumentStore>) -> Self {
        Self {
            documents,
            inner: Rc::new(RefCell::new(EntryListInner::default())),
        }
    }

    /// Subscribes to the entries whose parent is `path`, replacing any previous subscription.
    ///
    /// `on_snapshot` receives every accepted snapshot, starting with the initial one. Watching the
    /// path that is already watched keeps the existing subscription.
    ///
    /// # Errors
    ///
    /// Returns the document store error when the subscription cannot be opened. The store is then
    /// left watching nothing.
    pub fn watch(
        &self,
        path: &DrivePath,
        on_snapshot: impl Fn(DrivePath, Vec<DriveEntry>) + 'static,
    ) -> Result<(), String> {
        let previous = {
            let mut inner = self.inner.borrow_mut();
            if inner.path.as_ref() == Some(path) && inner.subscription.is_some() {
                return Ok(());
            }
            inner.path = Some(path.clone());
            inner.snapshot.clear();
            inner.loading = true;
            inner.subscription.take()
        };
        drop(previous);

        let watched = path.clone();
        let weak = Rc::downgrade(&self.inner);
        let listener = Rc::new(move |entries: Vec<DriveEntry>| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            {
                let mut inner = inner.borrow_mut();
                if inner.path.as_ref() != Some(&watched) {
                    return;
                }
                inner.snapshot = entries.clone();
                inner.loading = false;
            }
            on_snapshot(watched.clone(), entries);
        });

        let subscription = match self
            .documents
            .subscribe(EntryFilter::in_folder(path.as_str()), listener)
        {
            Ok(subscription) => subscription,
            Err(err) => {
                let mut inner = self.inner.borrow_mut();
                if inner.path.as_ref() == Some(path) {
                    inner.path = None;
                    inner.loading = false;
                }
                return Err(err);
            }
        };

        // A nested watch from inside the initial delivery wins over this one.
        let mut inner = self.inner.borrow_mut();
        if inner.path.as_ref() == Some(path) {
            inner.subscription = Some(subscription);
        }
        Ok(())
    }

    /// Releases the current subscription, if any.
    pub fn stop(&self) {
        let released = {
            let mut inner = self.inner.borrow_mut();
            inner.path = None;
            inner.loading = false;
            inner.subscription.take()
        };
        drop(released);
    }

    pub fn watched_path(&self) -> Option<DrivePath> {
        self.inner.borrow().path.clone()
    }

    pub fn snapshot(&self) -> Vec<DriveEntry> {
        self.inner.borrow().snapshot.clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.borrow().loading
    }
}

impl fmt::Debug for EntryListStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EntryListStore")
            .field("path", &inner.path)
            .field("entries", &inner.snapshot.len())
            .field("loading", &inner.loading)
            .finish()
    }
}
