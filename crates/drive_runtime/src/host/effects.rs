//! Runtime-effect dispatch for the drive host boundary.

use std::rc::Rc;

use drive_host::{DriveEntry, DrivePath};
use leptos::{logging, spawn_local, Callable};

use crate::{
    delete::delete_entry,
    download::download_entry,
    entry_list::EntryListStore,
    folders::create_folder,
    host::DriveHostContext,
    reducer::{DriveAction, RuntimeEffect},
    runtime_context::DriveRuntimeContext,
    upload::{backend_for, run_batch, UploadJob},
};

pub(super) fn run_runtime_effect(
    host: DriveHostContext,
    runtime: DriveRuntimeContext,
    effect: RuntimeEffect,
) {
    match effect {
        RuntimeEffect::Subscribe { path } => subscribe(host, runtime, path),
        RuntimeEffect::RunUploads { path, jobs } => run_uploads(host, runtime, path, jobs),
        RuntimeEffect::ScheduleUploadReset => {
            let ms = host.config().upload_panel_reset_ms;
            dispatch_after(host, runtime, ms, DriveAction::ClearSettledUploads);
        }
        RuntimeEffect::CreateFolder { path, name } => {
            create_folder_record(host, runtime, path, name)
        }
        RuntimeEffect::DeleteEntry { entry } => delete(host, runtime, entry),
        RuntimeEffect::Download { run_id, entry } => download(host, runtime, run_id, entry),
        RuntimeEffect::ScheduleToastDismiss { toast_id } => {
            let ms = host.config().toast_duration_ms;
            dispatch_after(host, runtime, ms, DriveAction::DismissToast { toast_id });
        }
    }
}

fn subscribe(host: DriveHostContext, runtime: DriveRuntimeContext, path: DrivePath) {
    let dispatch = runtime.dispatch;
    watch_entries(&host.entry_list(), path, move |action| dispatch.call(action));
}

/// Points `entry_list` at `path`, forwarding snapshots as actions.
///
/// When the subscription cannot be opened an empty snapshot is delivered instead so the folder
/// stops loading.
fn watch_entries(
    entry_list: &EntryListStore,
    path: DrivePath,
    deliver: impl Fn(DriveAction) + 'static,
) {
    let deliver = Rc::new(deliver);
    let forward = deliver.clone();
    let watched = entry_list.watch(&path, move |path, entries| {
        forward(DriveAction::SnapshotDelivered { path, entries });
    });
    if let Err(err) = watched {
        logging::warn!("subscribe to {path} failed: {err}");
        deliver(DriveAction::SnapshotDelivered {
            path,
            entries: Vec::new(),
        });
    }
}

fn run_uploads(
    host: DriveHostContext,
    runtime: DriveRuntimeContext,
    path: DrivePath,
    jobs: Vec<UploadJob>,
) {
    let backend = backend_for(&host.config(), host.services());
    let dispatch = runtime.dispatch;
    spawn_local(async move {
        run_batch(backend.as_ref(), &path, jobs, &|event| {
            dispatch.call(DriveAction::Upload(event));
        })
        .await;
    });
}

fn create_folder_record(
    host: DriveHostContext,
    runtime: DriveRuntimeContext,
    path: DrivePath,
    name: String,
) {
    let documents = host.services().documents.clone();
    let dispatch = runtime.dispatch;
    spawn_local(async move {
        let result = create_folder(documents.as_ref(), &path, &name).await;
        if let Err(err) = &result {
            logging::warn!("{err}");
        }
        dispatch.call(DriveAction::FolderSettled { name, result });
    });
}

fn delete(host: DriveHostContext, runtime: DriveRuntimeContext, entry: DriveEntry) {
    let services = host.services().clone();
    let dispatch = runtime.dispatch;
    spawn_local(async move {
        let result =
            delete_entry(services.documents.as_ref(), services.blobs.as_ref(), &entry).await;
        if let Err(err) = &result {
            logging::warn!("{err}");
        }
        dispatch.call(DriveAction::DeleteSettled { entry, result });
    });
}

fn download(
    host: DriveHostContext,
    runtime: DriveRuntimeContext,
    run_id: u64,
    entry: DriveEntry,
) {
    let services = host.services().clone();
    let step_interval_ms = host.config().download_step_interval_ms;
    let dispatch = runtime.dispatch;
    spawn_local(async move {
        let result = download_entry(
            services.blobs.as_ref(),
            services.urls.as_ref(),
            services.delay.as_ref(),
            step_interval_ms,
            &entry,
            &|percent| {
                dispatch.call(DriveAction::DownloadProgress { run_id, percent });
            },
        )
        .await;
        if let Err(err) = &result {
            logging::warn!("{err}");
        }
        dispatch.call(DriveAction::DownloadSettled {
            run_id,
            entry,
            result,
        });
    });
}

fn dispatch_after(
    host: DriveHostContext,
    runtime: DriveRuntimeContext,
    delay_ms: u32,
    action: DriveAction,
) {
    let delay = host.services().delay.clone();
    let dispatch = runtime.dispatch;
    spawn_local(async move {
        delay.sleep_ms(delay_ms).await;
        dispatch.call(action);
    });
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use drive_host::{MemoryDocumentStore, NewEntry, NoopDocumentStore};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{model::DriveState, reducer::reduce_drive};

    fn recorder() -> (Rc<RefCell<Vec<DriveAction>>>, impl Fn(DriveAction) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |action| sink.borrow_mut().push(action))
    }

    #[test]
    fn failed_subscription_delivers_an_empty_snapshot_that_ends_loading() {
        let list = EntryListStore::new(Rc::new(NoopDocumentStore));
        let path = DrivePath::root().enter("Documents");
        let mut state = DriveState::default();
        reduce_drive(&mut state, DriveAction::NavigateTo { path: path.clone() }).expect("navigate");
        assert!(state.loading);

        let (seen, deliver) = recorder();
        watch_entries(&list, path.clone(), deliver);

        let actions = seen.take();
        assert_eq!(
            actions,
            vec![DriveAction::SnapshotDelivered {
                path: path.clone(),
                entries: Vec::new(),
            }]
        );
        for action in actions {
            reduce_drive(&mut state, action).expect("deliver");
        }
        assert!(!state.loading);
        assert!(state.entries.is_empty());
        assert_eq!(list.watched_path(), None);
    }

    #[test]
    fn live_subscription_forwards_store_snapshots() {
        let documents = MemoryDocumentStore::with_records([
            NewEntry::folder("Documents", "/").into_entry("1".to_string()),
        ]);
        let list = EntryListStore::new(Rc::new(documents));
        let (seen, deliver) = recorder();

        watch_entries(&list, DrivePath::root(), deliver);

        assert_eq!(
            seen.take(),
            vec![DriveAction::SnapshotDelivered {
                path: DrivePath::root(),
                entries: vec![NewEntry::folder("Documents", "/").into_entry("1".to_string())],
            }]
        );
        assert_eq!(list.watched_path(), Some(DrivePath::root()));
    }
}
