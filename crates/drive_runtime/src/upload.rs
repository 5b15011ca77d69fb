//! Upload orchestration over an injectable backend.
//!
//! [`plan_batch`] turns a batch of local files into upload tasks, and [`run_batch`] drives each
//! task through an [`UploadBackend`], reporting [`UploadEvent`]s. The simulated backend only
//! advances a counter on a timer and hands back a local entry; the store backend streams bytes to
//! the blob store and records a document per file.

use std::{cell::Cell, future::Future, pin::Pin, rc::Rc};

use drive_host::{
    BlobStore, Delay, DocumentStore, DriveConfig, DriveEntry, DrivePath, DriveHostServices,
    LocalFile, NewEntry, UploadBackendKind,
};
use leptos::logging;

use crate::{
    error::DriveError,
    folders::{ensure_name_free, validate_entry_name},
    local_tree::local_file_entry,
    model::{UploadId, UploadTask},
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Entry produced by a finished upload.
pub enum UploadedEntry {
    /// Recorded in the document store. The live snapshot lists it.
    Stored(DriveEntry),
    /// Kept only in the session's local tree.
    Local(DriveEntry),
}

/// Boxed future returned by [`UploadBackend::upload`].
pub type UploadFuture<'a> = Pin<Box<dyn Future<Output = Result<UploadedEntry, DriveError>> + 'a>>;

/// Transfers one local file, reporting whole-percent progress.
pub trait UploadBackend {
    /// Uploads `file` into `path` and resolves to the resulting entry.
    fn upload<'a>(
        &'a self,
        path: &'a DrivePath,
        file: &'a LocalFile,
        on_progress: &'a dyn Fn(u8),
    ) -> UploadFuture<'a>;
}

/// Local progress simulation. Never contacts a backend.
pub struct SimulatedUploadBackend {
    delay: Rc<dyn Delay>,
    step_percent: u8,
    interval_ms: u32,
}

impl SimulatedUploadBackend {
    pub fn new(delay: Rc<dyn Delay>, step_percent: u8, interval_ms: u32) -> Self {
        Self {
            delay,
            step_percent: step_percent.clamp(1, 100),
            interval_ms,
        }
    }
}

impl UploadBackend for SimulatedUploadBackend {
    fn upload<'a>(
        &'a self,
        path: &'a DrivePath,
        file: &'a LocalFile,
        on_progress: &'a dyn Fn(u8),
    ) -> UploadFuture<'a> {
        Box::pin(async move {
            let name = validate_entry_name(&file.name)?;
            let mut progress = 0u8;
            while progress < 100 {
                self.delay.sleep_ms(self.interval_ms).await;
                progress = progress.saturating_add(self.step_percent).min(100);
                on_progress(progress);
            }
            Ok(UploadedEntry::Local(local_file_entry(path, name)))
        })
    }
}

/// Streams bytes to the blob store, then writes a document record referencing the download URL.
pub struct StoreUploadBackend {
    documents: Rc<dyn DocumentStore>,
    blobs: Rc<dyn BlobStore>,
}

impl StoreUploadBackend {
    pub fn new(documents: Rc<dyn DocumentStore>, blobs: Rc<dyn BlobStore>) -> Self {
        Self { documents, blobs }
    }
}

impl UploadBackend for StoreUploadBackend {
    fn upload<'a>(
        &'a self,
        path: &'a DrivePath,
        file: &'a LocalFile,
        on_progress: &'a dyn Fn(u8),
    ) -> UploadFuture<'a> {
        Box::pin(async move {
            let name = validate_entry_name(&file.name)?;
            let failure = |reason: String| DriveError::UploadFailure {
                file: name.clone(),
                reason,
            };
            ensure_name_free(self.documents.as_ref(), path, &name, failure).await?;

            let key = path.blob_key(&name);
            let url = self
                .blobs
                .upload(&key, &file.bytes, &|progress| on_progress(progress.percent()))
                .await
                .map_err(failure)?;
            let entry = self
                .documents
                .create(NewEntry::file(name.clone(), path.as_str(), url))
                .await
                .map_err(failure)?;
            Ok(UploadedEntry::Stored(entry))
        })
    }
}

/// Builds the backend selected by `config`.
pub fn backend_for(config: &DriveConfig, services: &DriveHostServices) -> Rc<dyn UploadBackend> {
    match config.upload_backend {
        UploadBackendKind::Store => Rc::new(StoreUploadBackend::new(
            services.documents.clone(),
            services.blobs.clone(),
        )),
        UploadBackendKind::Simulated => Rc::new(SimulatedUploadBackend::new(
            services.delay.clone(),
            config.simulated_step_percent,
            config.simulated_step_interval_ms,
        )),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One file of a batch paired with the task tracking it.
pub struct UploadJob {
    pub task_id: UploadId,
    pub file: LocalFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Progress reported while a batch runs.
pub enum UploadEvent {
    Progress {
        task_id: UploadId,
        percent: u8,
    },
    Completed {
        task_id: UploadId,
        entry: UploadedEntry,
    },
    Failed {
        task_id: UploadId,
        error: DriveError,
    },
}

/// Creates one task per file, allocating ids from `next_id`.
pub fn plan_batch(
    next_id: &mut u64,
    path: &DrivePath,
    files: Vec<LocalFile>,
) -> (Vec<UploadTask>, Vec<UploadJob>) {
    files
        .into_iter()
        .enumerate()
        .map(|(index, file)| {
            let task_id = UploadId(*next_id);
            *next_id += 1;
            let task = UploadTask::new(task_id, file.name.clone(), path.clone(), index);
            (task, UploadJob { task_id, file })
        })
        .unzip()
}

/// Runs every job of a batch in order, reporting through `sink`.
///
/// Progress events for a task are strictly increasing; a task that completes is reported at 100
/// before its `Completed` event. Failures only affect their own task.
pub async fn run_batch(
    backend: &dyn UploadBackend,
    path: &DrivePath,
    jobs: Vec<UploadJob>,
    sink: &dyn Fn(UploadEvent),
) {
    for job in jobs {
        let task_id = job.task_id;
        let last = Cell::new(0u8);
        let report = |percent: u8| {
            let percent = percent.min(100);
            if percent > last.get() {
                last.set(percent);
                sink(UploadEvent::Progress { task_id, percent });
            }
        };

        match backend.upload(path, &job.file, &report).await {
            Ok(entry) => {
                report(100);
                logging::log!("uploaded {}{}", path, job.file.name);
                sink(UploadEvent::Completed { task_id, entry });
            }
            Err(error) => {
                logging::warn!("upload failed: {error}");
                sink(UploadEvent::Failed { task_id, error });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use drive_host::{ImmediateDelay, MemoryBlobStore, MemoryDocumentStore, NoopBlobStore};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::UploadStatus;

    fn collect(
        backend: &dyn UploadBackend,
        path: &DrivePath,
        files: Vec<LocalFile>,
    ) -> (Vec<UploadTask>, Vec<UploadEvent>) {
        let mut next_id = 1;
        let (tasks, jobs) = plan_batch(&mut next_id, path, files);
        let events = RefCell::new(Vec::new());
        block_on(run_batch(backend, path, jobs, &|event| {
            events.borrow_mut().push(event)
        }));
        (tasks, events.into_inner())
    }

    fn progress_of(events: &[UploadEvent], id: UploadId) -> Vec<u8> {
        events
            .iter()
            .filter_map(|event| match event {
                UploadEvent::Progress { task_id, percent } if *task_id == id => Some(*percent),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn plan_batch_assigns_ids_and_cycles_colors() {
        let mut next_id = 7;
        let files = (0..4)
            .map(|i| LocalFile::new(format!("f{i}.txt"), "text/plain", vec![i]))
            .collect();
        let (tasks, jobs) = plan_batch(&mut next_id, &DrivePath::root(), files);
        assert_eq!(next_id, 11);
        assert_eq!(jobs[3].task_id, UploadId(10));
        let colors: Vec<_> = tasks.iter().map(|task| task.color.css_class()).collect();
        assert_eq!(
            colors,
            vec![
                "upload-bar-blue",
                "upload-bar-cyan",
                "upload-bar-pink",
                "upload-bar-blue"
            ]
        );
        assert!(tasks
            .iter()
            .all(|task| task.progress == 0 && task.status == UploadStatus::InProgress));
    }

    #[test]
    fn simulated_backend_steps_to_exactly_one_hundred() {
        let backend = SimulatedUploadBackend::new(Rc::new(ImmediateDelay), 30, 500);
        let path = DrivePath::root();
        let (tasks, events) = collect(
            &backend,
            &path,
            vec![LocalFile::new("a.png", "image/png", vec![1, 2, 3])],
        );
        assert_eq!(progress_of(&events, tasks[0].id), vec![30, 60, 90, 100]);
        let Some(UploadEvent::Completed {
            task_id,
            entry: UploadedEntry::Local(entry),
        }) = events.last()
        else {
            panic!("expected a local entry, got {events:?}");
        };
        assert_eq!(*task_id, tasks[0].id);
        assert_eq!(entry.name, "a.png");
        assert_eq!(entry.path, "/");
        assert_eq!(entry.url, None);
        assert!(crate::local_tree::is_local(entry));
    }

    #[test]
    fn store_backend_records_document_with_url() {
        let documents = MemoryDocumentStore::default();
        let blobs = MemoryBlobStore::with_chunk_size(2);
        let backend = StoreUploadBackend::new(Rc::new(documents.clone()), Rc::new(blobs.clone()));
        let path = DrivePath::root().enter("Documents");

        let (tasks, events) = collect(
            &backend,
            &path,
            vec![LocalFile::new("a.png", "image/png", vec![0; 5])],
        );

        let records = documents.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "/Documents/");
        assert_eq!(records[0].name, "a.png");
        assert!(records[0].url.as_deref().is_some_and(|url| !url.is_empty()));
        assert!(blobs.contains("/Documents/a.png"));

        let progress = progress_of(&events, tasks[0].id);
        assert!(progress.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(progress.last(), Some(&100));
        assert!(matches!(
            events.last(),
            Some(UploadEvent::Completed {
                entry: UploadedEntry::Stored(entry),
                ..
            }) if entry.name == "a.png"
        ));
    }

    #[test]
    fn failed_upload_writes_no_record_and_does_not_stop_the_batch() {
        let documents = MemoryDocumentStore::default();
        let backend = StoreUploadBackend::new(Rc::new(documents.clone()), Rc::new(NoopBlobStore));
        let path = DrivePath::root();

        let (tasks, events) = collect(
            &backend,
            &path,
            vec![
                LocalFile::new("a.png", "image/png", vec![1]),
                LocalFile::new("b.png", "image/png", vec![2]),
            ],
        );

        assert!(documents.records().is_empty());
        let failed: Vec<UploadId> = events
            .iter()
            .filter_map(|event| match event {
                UploadEvent::Failed { task_id, error } => {
                    assert!(matches!(error, DriveError::UploadFailure { .. }));
                    Some(*task_id)
                }
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec![tasks[0].id, tasks[1].id]);
    }

    #[test]
    fn store_backend_rejects_duplicate_names() {
        let documents = MemoryDocumentStore::default();
        let backend = StoreUploadBackend::new(
            Rc::new(documents.clone()),
            Rc::new(MemoryBlobStore::default()),
        );
        let path = DrivePath::root();
        let files = vec![
            LocalFile::new("a.png", "image/png", vec![1]),
            LocalFile::new("a.png", "image/png", vec![2]),
        ];

        let (_, events) = collect(&backend, &path, files);

        assert_eq!(documents.records().len(), 1);
        assert!(events.iter().any(|event| matches!(
            event,
            UploadEvent::Failed {
                error: DriveError::DuplicateName { .. },
                ..
            }
        )));
    }
}
