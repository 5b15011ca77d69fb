//! Reducer actions, side-effect intents, and transition logic for the drive runtime.

use drive_host::{DriveEntry, DrivePath, LocalFile};
use thiserror::Error;

use crate::{
    error::DriveError,
    folders::validate_entry_name,
    local_tree::is_local,
    model::{DownloadRun, DriveState, ScreenPosition, Toast, ToastKind, UiMode, UploadId},
    upload::{plan_batch, UploadEvent, UploadJob, UploadedEntry},
};

const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded successfully!";
const FOLDER_CREATED_MESSAGE: &str = "Folder created successfully!";
const DOWNLOAD_SUCCESS_MESSAGE: &str = "File downloaded successfully!";

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_drive`] to mutate [`DriveState`].
pub enum DriveAction {
    /// Show `path`, resubscribing the entry list. Also used at boot.
    NavigateTo {
        /// Target folder.
        path: DrivePath,
    },
    /// Enter a child folder of the current path.
    EnterFolder {
        /// Child folder name.
        name: String,
    },
    /// Go up one level. No-op at root.
    Back,
    /// Double-click on an entry: folders are entered, files open the download prompt.
    OpenEntry {
        /// Entry that was activated.
        entry: DriveEntry,
    },
    /// A live-query snapshot arrived for `path`.
    SnapshotDelivered {
        /// Path the subscription was opened for.
        path: DrivePath,
        /// Full matching snapshot.
        entries: Vec<DriveEntry>,
    },
    /// Open the upload panel.
    ShowUploadPanel,
    /// Close whichever overlay is open (outside click or close button).
    DismissOverlay,
    /// Drag hover state over the upload drop zone.
    SetDragOver {
        /// Whether a drag is over the zone.
        active: bool,
    },
    /// Files picked or dropped; starts an upload batch into the current path.
    FilesSelected {
        /// Local file contents.
        files: Vec<LocalFile>,
    },
    /// Progress or outcome reported by a running upload batch.
    Upload(UploadEvent),
    /// Drop settled upload tasks and close the upload panel once nothing is in flight.
    ClearSettledUploads,
    /// Open the new-folder prompt with an empty draft.
    ShowNewFolderPrompt,
    /// Edit the new-folder draft name.
    SetNewFolderName {
        /// Draft text as typed.
        name: String,
    },
    /// Validate the draft and request folder creation.
    ConfirmNewFolder,
    /// Folder creation finished.
    FolderSettled {
        /// Requested folder name.
        name: String,
        /// Created record or failure.
        result: Result<DriveEntry, DriveError>,
    },
    /// Right-click on an entry.
    OpenContextMenu {
        /// Pointer position of the click.
        position: ScreenPosition,
        /// Entry under the pointer.
        entry: DriveEntry,
    },
    /// "Open" chosen from the context menu.
    ContextMenuOpen,
    /// "Delete" chosen from the context menu.
    ContextMenuDelete,
    /// Ask for confirmation before deleting `entry`.
    RequestDelete {
        /// Entry to delete.
        entry: DriveEntry,
    },
    /// Dismiss the delete confirmation.
    CancelDelete,
    /// Delete the entry awaiting confirmation.
    ConfirmDelete,
    /// Delete finished.
    DeleteSettled {
        /// Entry that was deleted.
        entry: DriveEntry,
        /// Outcome of the store calls.
        result: Result<(), DriveError>,
    },
    /// Ask for confirmation before downloading a file.
    RequestDownload {
        /// File entry.
        entry: DriveEntry,
    },
    /// Dismiss the download prompt.
    CancelDownload,
    /// Start the download awaiting confirmation.
    ConfirmDownload,
    /// Simulated download progress.
    DownloadProgress {
        /// Run reporting the progress.
        run_id: u64,
        /// Percent complete.
        percent: u8,
    },
    /// Download finished.
    DownloadSettled {
        /// Run that finished.
        run_id: u64,
        /// Entry that was downloaded.
        entry: DriveEntry,
        /// Opened URL or failure.
        result: Result<String, DriveError>,
    },
    /// Show a transient message, replacing any visible toast.
    ShowToast {
        /// Message text.
        message: String,
        /// Success or failure styling.
        kind: ToastKind,
    },
    /// Hide the toast with `toast_id` if it is still the visible one.
    DismissToast {
        /// Toast to hide.
        toast_id: u64,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side effects requested by the reducer and executed by the host layer.
pub enum RuntimeEffect {
    /// Point the entry list subscription at `path`.
    Subscribe {
        /// Folder to watch.
        path: DrivePath,
    },
    /// Run an upload batch into `path`.
    RunUploads {
        /// Target folder captured when the files were selected.
        path: DrivePath,
        /// Jobs in batch order.
        jobs: Vec<UploadJob>,
    },
    /// Dispatch [`DriveAction::ClearSettledUploads`] after the configured delay.
    ScheduleUploadReset,
    /// Write a folder record.
    CreateFolder {
        /// Parent folder.
        path: DrivePath,
        /// Validated folder name.
        name: String,
    },
    /// Delete a record and, for files, its blob.
    DeleteEntry {
        /// Entry to delete.
        entry: DriveEntry,
    },
    /// Resolve and open a file's download URL.
    Download {
        /// Run id echoed back in progress and settle actions.
        run_id: u64,
        /// File entry.
        entry: DriveEntry,
    },
    /// Dispatch [`DriveAction::DismissToast`] after the configured duration.
    ScheduleToastDismiss {
        /// Toast to hide.
        toast_id: u64,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that do not apply to the current state.
pub enum ReducerError {
    /// No delete confirmation is open.
    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,
    /// No download prompt is open.
    #[error("no download is awaiting confirmation")]
    NoPendingDownload,
    /// No new-folder prompt is open.
    #[error("new-folder prompt is not open")]
    NoFolderPrompt,
    /// No context menu is open.
    #[error("context menu is not open")]
    NoContextMenu,
    /// Folders cannot be downloaded.
    #[error("{0} is a folder")]
    NotAFile(String),
    /// An upload event referenced a task that is not tracked.
    #[error("upload task {0:?} not found")]
    UnknownUpload(UploadId),
}

/// Applies a [`DriveAction`] to the drive state and collects resulting side effects.
///
/// # Errors
///
/// Returns a [`ReducerError`] when the action refers to a dialog that is not open or to an unknown
/// upload task. The state is left unchanged in that case.
pub fn reduce_drive(
    state: &mut DriveState,
    action: DriveAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DriveAction::NavigateTo { path } => navigate(state, path, &mut effects),
        DriveAction::EnterFolder { name } => {
            let next = state.path.enter(&name);
            if next != state.path {
                navigate(state, next, &mut effects);
            }
        }
        DriveAction::Back => {
            if !state.path.is_root() {
                let parent = state.path.back();
                navigate(state, parent, &mut effects);
            }
        }
        DriveAction::OpenEntry { entry } => open_entry(state, entry, &mut effects),
        DriveAction::SnapshotDelivered { path, entries } => {
            if path == state.path {
                state.entries = entries;
                state.loading = false;
            }
        }
        DriveAction::ShowUploadPanel => {
            state.mode = UiMode::UploadPanel { drag_over: false };
        }
        DriveAction::DismissOverlay => state.mode = UiMode::Browsing,
        DriveAction::SetDragOver { active } => {
            if let UiMode::UploadPanel { drag_over } = &mut state.mode {
                *drag_over = active;
            }
        }
        DriveAction::FilesSelected { files } => {
            if let UiMode::UploadPanel { drag_over } = &mut state.mode {
                *drag_over = false;
            }
            if files.is_empty() {
                return Ok(effects);
            }
            if !state.is_uploading() {
                state.uploads.clear();
            }
            let (tasks, jobs) = plan_batch(&mut state.next_upload_id, &state.path, files);
            state.uploads.extend(tasks);
            effects.push(RuntimeEffect::RunUploads {
                path: state.path.clone(),
                jobs,
            });
        }
        DriveAction::Upload(event) => apply_upload_event(state, event, &mut effects)?,
        DriveAction::ClearSettledUploads => {
            state.uploads.retain(|task| !task.is_settled());
            if state.uploads.is_empty() && matches!(state.mode, UiMode::UploadPanel { .. }) {
                state.mode = UiMode::Browsing;
            }
        }
        DriveAction::ShowNewFolderPrompt => {
            state.mode = UiMode::NewFolderPrompt {
                name: String::new(),
            };
        }
        DriveAction::SetNewFolderName { name } => match &mut state.mode {
            UiMode::NewFolderPrompt { name: draft } => *draft = name,
            _ => return Err(ReducerError::NoFolderPrompt),
        },
        DriveAction::ConfirmNewFolder => {
            let UiMode::NewFolderPrompt { name: draft } = &state.mode else {
                return Err(ReducerError::NoFolderPrompt);
            };
            let checked = validate_entry_name(draft).and_then(|name| {
                if state.has_entry_named(&name) {
                    Err(DriveError::DuplicateName { name })
                } else {
                    Ok(name)
                }
            });
            match checked {
                Ok(name) => {
                    state.mode = UiMode::Browsing;
                    effects.push(RuntimeEffect::CreateFolder {
                        path: state.path.clone(),
                        name,
                    });
                }
                Err(err) => {
                    effects.push(show_toast(state, err.toast_message(), ToastKind::Failure));
                }
            }
        }
        DriveAction::FolderSettled { name: _, result } => {
            let toast = match result {
                Ok(_) => (FOLDER_CREATED_MESSAGE.to_string(), ToastKind::Success),
                Err(err) => (err.toast_message(), ToastKind::Failure),
            };
            effects.push(show_toast(state, toast.0, toast.1));
        }
        DriveAction::OpenContextMenu { position, entry } => {
            state.mode = UiMode::ContextMenu {
                position,
                target: entry,
            };
        }
        DriveAction::ContextMenuOpen => {
            let target = take_context_target(state)?;
            open_entry(state, target, &mut effects);
        }
        DriveAction::ContextMenuDelete => {
            let target = take_context_target(state)?;
            state.mode = UiMode::DeleteConfirm { entry: target };
        }
        DriveAction::RequestDelete { entry } => state.mode = UiMode::DeleteConfirm { entry },
        DriveAction::CancelDelete => {
            if !matches!(state.mode, UiMode::DeleteConfirm { .. }) {
                return Err(ReducerError::NoPendingDelete);
            }
            state.mode = UiMode::Browsing;
        }
        DriveAction::ConfirmDelete => {
            if !matches!(state.mode, UiMode::DeleteConfirm { .. }) {
                return Err(ReducerError::NoPendingDelete);
            }
            if let UiMode::DeleteConfirm { entry } = std::mem::take(&mut state.mode) {
                if is_local(&entry) {
                    let toast = if state.local.remove(&entry) {
                        (
                            format!("{} deleted successfully!", entry.name),
                            ToastKind::Success,
                        )
                    } else {
                        (
                            DriveError::DeleteFailure {
                                name: entry.name.clone(),
                                reason: "not in this session".to_string(),
                            }
                            .toast_message(),
                            ToastKind::Failure,
                        )
                    };
                    effects.push(show_toast(state, toast.0, toast.1));
                } else {
                    effects.push(RuntimeEffect::DeleteEntry { entry });
                }
            }
        }
        DriveAction::DeleteSettled { entry, result } => {
            let toast = match result {
                Ok(()) => {
                    state.entries.retain(|existing| existing.id != entry.id);
                    (
                        format!("{} deleted successfully!", entry.name),
                        ToastKind::Success,
                    )
                }
                Err(err) => (err.toast_message(), ToastKind::Failure),
            };
            effects.push(show_toast(state, toast.0, toast.1));
        }
        DriveAction::RequestDownload { entry } => {
            if entry.is_folder() {
                return Err(ReducerError::NotAFile(entry.name));
            }
            state.mode = UiMode::DownloadPrompt { entry, run: None };
        }
        DriveAction::CancelDownload => {
            if !matches!(state.mode, UiMode::DownloadPrompt { .. }) {
                return Err(ReducerError::NoPendingDownload);
            }
            state.mode = UiMode::Browsing;
        }
        DriveAction::ConfirmDownload => match &mut state.mode {
            UiMode::DownloadPrompt {
                entry,
                run: run @ None,
            } => {
                let run_id = state.next_download_id;
                state.next_download_id += 1;
                *run = Some(DownloadRun {
                    id: run_id,
                    percent: 0,
                });
                effects.push(RuntimeEffect::Download {
                    run_id,
                    entry: entry.clone(),
                });
            }
            UiMode::DownloadPrompt { .. } => {}
            _ => return Err(ReducerError::NoPendingDownload),
        },
        DriveAction::DownloadProgress { run_id, percent } => {
            if let UiMode::DownloadPrompt { run: Some(run), .. } = &mut state.mode {
                if run.id == run_id {
                    run.percent = run.percent.max(percent.min(100));
                }
            }
        }
        DriveAction::DownloadSettled {
            run_id,
            entry: _,
            result,
        } => {
            let pending = matches!(
                &state.mode,
                UiMode::DownloadPrompt { run: Some(run), .. } if run.id == run_id
            );
            if pending {
                state.mode = UiMode::Browsing;
            }
            let toast = match result {
                Ok(_) => (DOWNLOAD_SUCCESS_MESSAGE.to_string(), ToastKind::Success),
                Err(err) => (err.toast_message(), ToastKind::Failure),
            };
            effects.push(show_toast(state, toast.0, toast.1));
        }
        DriveAction::ShowToast { message, kind } => {
            effects.push(show_toast(state, message, kind));
        }
        DriveAction::DismissToast { toast_id } => {
            if state.toast.as_ref().is_some_and(|toast| toast.id == toast_id) {
                state.toast = None;
            }
        }
    }

    Ok(effects)
}

fn navigate(state: &mut DriveState, path: DrivePath, effects: &mut Vec<RuntimeEffect>) {
    if path != state.path {
        state.path = path;
        state.entries.clear();
        state.loading = true;
    }
    state.mode = UiMode::Browsing;
    effects.push(RuntimeEffect::Subscribe {
        path: state.path.clone(),
    });
}

fn open_entry(state: &mut DriveState, entry: DriveEntry, effects: &mut Vec<RuntimeEffect>) {
    if entry.is_folder() {
        let next = state.path.enter(&entry.name);
        navigate(state, next, effects);
    } else {
        state.mode = UiMode::DownloadPrompt { entry, run: None };
    }
}

fn take_context_target(state: &mut DriveState) -> Result<DriveEntry, ReducerError> {
    match std::mem::take(&mut state.mode) {
        UiMode::ContextMenu { target, .. } => Ok(target),
        other => {
            state.mode = other;
            Err(ReducerError::NoContextMenu)
        }
    }
}

fn apply_upload_event(
    state: &mut DriveState,
    event: UploadEvent,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let toast = match event {
        UploadEvent::Progress { task_id, percent } => {
            let task = state
                .upload_mut(task_id)
                .ok_or(ReducerError::UnknownUpload(task_id))?;
            task.advance(percent);
            None
        }
        UploadEvent::Completed { task_id, entry } => {
            state
                .upload_mut(task_id)
                .ok_or(ReducerError::UnknownUpload(task_id))?
                .complete();
            if let UploadedEntry::Local(entry) = entry {
                state.local.insert(entry);
            }
            Some((UPLOAD_SUCCESS_MESSAGE.to_string(), ToastKind::Success))
        }
        UploadEvent::Failed { task_id, error } => {
            state
                .upload_mut(task_id)
                .ok_or(ReducerError::UnknownUpload(task_id))?
                .fail();
            Some((error.toast_message(), ToastKind::Failure))
        }
    };

    if let Some((message, kind)) = toast {
        effects.push(show_toast(state, message, kind));
        if !state.is_uploading() {
            effects.push(RuntimeEffect::ScheduleUploadReset);
        }
    }
    Ok(())
}

fn show_toast(state: &mut DriveState, message: String, kind: ToastKind) -> RuntimeEffect {
    let toast_id = state.next_toast_id;
    state.next_toast_id += 1;
    state.toast = Some(Toast {
        id: toast_id,
        message,
        kind,
    });
    RuntimeEffect::ScheduleToastDismiss { toast_id }
}
