use drive_host_web::read_file_list;

use super::*;
use crate::model::{ColorTag, UploadId, UploadStatus, UploadTask};

const UPLOAD_READ_FAILURE_MESSAGE: &str = "File upload failed.";

fn start_upload(runtime: DriveRuntimeContext, files: web_sys::FileList) {
    spawn_local(async move {
        match read_file_list(files).await {
            Ok(files) => runtime.dispatch_action(DriveAction::FilesSelected { files }),
            Err(err) => {
                logging::warn!("reading selected files failed: {err}");
                runtime.dispatch_action(DriveAction::ShowToast {
                    message: UPLOAD_READ_FAILURE_MESSAGE.to_string(),
                    kind: ToastKind::Failure,
                });
            }
        }
    });
}

fn upload_summary(state: &DriveState) -> String {
    if state.is_uploading() {
        format!("Uploading... {}%", state.overall_upload_progress())
    } else if state
        .uploads
        .iter()
        .any(|task| task.status == UploadStatus::Failed)
    {
        "Some uploads failed".to_string()
    } else {
        "Upload complete".to_string()
    }
}

fn status_label(task: &UploadTask) -> String {
    match task.status {
        UploadStatus::InProgress => format!("{}%", task.progress),
        UploadStatus::Completed => "Done".to_string(),
        UploadStatus::Failed => "Failed".to_string(),
    }
}

#[component]
pub(super) fn UploadPanel(runtime: DriveRuntimeContext) -> impl IntoView {
    let state = runtime.state;
    let drag_over = create_memo(move |_| {
        matches!(state.get().mode, UiMode::UploadPanel { drag_over: true })
    });
    let file_input = create_node_ref::<html::Input>();

    view! {
        <div
            class="drive-overlay"
            on:click=move |_| runtime.dispatch_action(DriveAction::DismissOverlay)
        >
            <div
                class="drive-dialog drive-upload-panel"
                role="dialog"
                aria-label="Upload files"
                on:click=|ev| ev.stop_propagation()
            >
                <div class="drive-dialog-header">
                    <h2>"Upload files"</h2>
                    <button
                        type="button"
                        class="drive-button drive-dialog-close"
                        aria-label="Close"
                        on:click=move |_| runtime.dispatch_action(DriveAction::DismissOverlay)
                    >
                        "Close"
                    </button>
                </div>
                <div
                    class=move || {
                        if drag_over.get() { "drive-dropzone active" } else { "drive-dropzone" }
                    }
                    on:dragover=move |ev: web_sys::DragEvent| {
                        ev.prevent_default();
                        if !drag_over.get_untracked() {
                            runtime.dispatch_action(DriveAction::SetDragOver { active: true });
                        }
                    }
                    on:dragleave=move |_| {
                        runtime.dispatch_action(DriveAction::SetDragOver { active: false })
                    }
                    on:drop=move |ev: web_sys::DragEvent| {
                        ev.prevent_default();
                        match ev.data_transfer().and_then(|transfer| transfer.files()) {
                            Some(files) => start_upload(runtime, files),
                            None => {
                                runtime.dispatch_action(DriveAction::SetDragOver { active: false })
                            }
                        }
                    }
                    on:click=move |_| {
                        if let Some(input) = file_input.get_untracked() {
                            input.click();
                        }
                    }
                >
                    <p>"Drag and drop files here, or click to select files"</p>
                </div>
                <input
                    type="file"
                    multiple=true
                    hidden=true
                    node_ref=file_input
                    on:change=move |ev| {
                        let input = event_target::<web_sys::HtmlInputElement>(&ev);
                        if let Some(files) = input.files() {
                            start_upload(runtime, files);
                        }
                        input.set_value("");
                    }
                />
                <UploadProgressList state=state />
            </div>
        </div>
    }
}

#[component]
fn UploadProgressList(state: RwSignal<DriveState>) -> impl IntoView {
    let uploads = create_memo(move |_| state.get().uploads);

    view! {
        <Show when=move || !uploads.get().is_empty() fallback=|| ()>
            <div class="drive-upload-summary">{move || upload_summary(&state.get())}</div>
            <ul class="drive-upload-list">
                <For each=move || uploads.get() key=|task| task.id let:task>
                    <UploadRow
                        uploads=uploads
                        task_id=task.id
                        file_name=task.file_name.clone()
                        color=task.color
                    />
                </For>
            </ul>
        </Show>
    }
}

#[component]
fn UploadRow(
    uploads: Memo<Vec<UploadTask>>,
    task_id: UploadId,
    file_name: String,
    color: ColorTag,
) -> impl IntoView {
    let task = create_memo(move |_| uploads.get().into_iter().find(|task| task.id == task_id));
    let progress = move || task.get().map(|task| task.progress).unwrap_or(100);

    view! {
        <li class="drive-upload-row">
            <span class="drive-upload-name">{file_name}</span>
            <div class="drive-upload-track">
                <div
                    class=format!("drive-upload-bar {}", color.css_class())
                    style=move || format!("width:{}%;", progress())
                ></div>
            </div>
            <span class="drive-upload-status">
                {move || task.get().map(|task| status_label(&task)).unwrap_or_default()}
            </span>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use drive_host::DrivePath;
    use pretty_assertions::assert_eq;

    use super::*;

    fn task(id: u64, progress: u8, status: UploadStatus) -> UploadTask {
        let mut task = UploadTask::new(UploadId(id), format!("f{id}"), DrivePath::root(), 0);
        task.progress = progress;
        task.status = status;
        task
    }

    #[test]
    fn summary_reports_mean_progress_then_outcome() {
        let mut state = DriveState::default();
        state.uploads = vec![
            task(1, 100, UploadStatus::Completed),
            task(2, 40, UploadStatus::InProgress),
        ];
        assert_eq!(upload_summary(&state), "Uploading... 70%");

        state.uploads[1].status = UploadStatus::Failed;
        assert_eq!(upload_summary(&state), "Some uploads failed");

        state.uploads.remove(1);
        assert_eq!(upload_summary(&state), "Upload complete");
    }

    #[test]
    fn status_labels_follow_task_status() {
        assert_eq!(status_label(&task(1, 30, UploadStatus::InProgress)), "30%");
        assert_eq!(status_label(&task(1, 100, UploadStatus::Completed)), "Done");
        assert_eq!(status_label(&task(1, 30, UploadStatus::Failed)), "Failed");
    }
}
