//! Drive UI composition: header, entry grid, overlays and the toast.

mod dialogs;
mod entries;
mod uploads;

use leptos::*;

use self::{
    dialogs::{DeleteConfirmDialog, DownloadDialog, EntryContextMenu, NewFolderDialog},
    entries::EntryGrid,
    uploads::UploadPanel,
};
use crate::{
    model::{DriveState, ToastKind, UiMode},
    reducer::DriveAction,
};

pub use crate::runtime_context::{use_drive_runtime, DriveProvider, DriveRuntimeContext};

#[component]
/// Top-level drive view. Must be rendered inside [`DriveProvider`].
pub fn DriveShell() -> impl IntoView {
    let runtime = use_drive_runtime();
    let state = runtime.state;
    let mode = create_memo(move |_| state.get().mode);

    view! {
        <div
            id="drive-shell-root"
            class="drive-shell"
            on:click=move |_| {
                if mode.get_untracked().context_target().is_some() {
                    runtime.dispatch_action(DriveAction::DismissOverlay);
                }
            }
        >
            <DriveHeader runtime=runtime />

            <div class="drive-toolbar">
                <button
                    type="button"
                    class="drive-button drive-button-primary"
                    on:click=move |_| runtime.dispatch_action(DriveAction::ShowUploadPanel)
                >
                    "Upload"
                </button>
                <button
                    type="button"
                    class="drive-button drive-button-secondary"
                    on:click=move |_| runtime.dispatch_action(DriveAction::ShowNewFolderPrompt)
                >
                    "New Folder"
                </button>
            </div>

            <EntryGrid runtime=runtime />

            <Show when=move || matches!(mode.get(), UiMode::UploadPanel { .. }) fallback=|| ()>
                <UploadPanel runtime=runtime />
            </Show>
            <Show when=move || matches!(mode.get(), UiMode::NewFolderPrompt { .. }) fallback=|| ()>
                <NewFolderDialog runtime=runtime />
            </Show>
            <Show when=move || matches!(mode.get(), UiMode::DownloadPrompt { .. }) fallback=|| ()>
                <DownloadDialog runtime=runtime />
            </Show>
            <Show when=move || matches!(mode.get(), UiMode::DeleteConfirm { .. }) fallback=|| ()>
                <DeleteConfirmDialog runtime=runtime />
            </Show>
            <Show when=move || mode.get().context_target().is_some() fallback=|| ()>
                <EntryContextMenu runtime=runtime />
            </Show>

            <DriveToast state=state />
        </div>
    }
}

#[component]
fn DriveHeader(runtime: DriveRuntimeContext) -> impl IntoView {
    let state = runtime.state;
    let path = create_memo(move |_| state.get().path);

    view! {
        <header class="drive-header">
            <Show when=move || !path.get().is_root() fallback=|| ()>
                <button
                    type="button"
                    class="drive-button drive-back"
                    aria-label="Back"
                    on:click=move |_| runtime.dispatch_action(DriveAction::Back)
                >
                    "Back"
                </button>
            </Show>
            <h1 class="drive-title">{move || path.get().folder_name().to_string()}</h1>
            <nav class="drive-breadcrumbs" aria-label="Breadcrumbs">
                <For
                    each=move || path.get().breadcrumbs()
                    key=|(_, crumb)| crumb.clone()
                    let:crumb
                >
                    {
                        let (label, target) = crumb;
                        view! {
                            <button
                                type="button"
                                class="drive-breadcrumb"
                                on:click=move |_| {
                                    runtime.dispatch_action(DriveAction::NavigateTo {
                                        path: target.clone(),
                                    })
                                }
                            >
                                {label}
                            </button>
                        }
                    }
                </For>
            </nav>
        </header>
    }
}

fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "drive-toast drive-toast-success",
        ToastKind::Failure => "drive-toast drive-toast-failure",
    }
}

#[component]
fn DriveToast(state: RwSignal<DriveState>) -> impl IntoView {
    let toast = create_memo(move |_| state.get().toast);

    move || {
        toast.get().map(|toast| {
            view! {
                <div class=toast_class(toast.kind) role="status" aria-live="polite">
                    {toast.message}
                </div>
            }
        })
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}
