use super::*;

fn pending_entry_name(mode: &UiMode) -> String {
    match mode {
        UiMode::DownloadPrompt { entry, .. } | UiMode::DeleteConfirm { entry } => {
            entry.name.clone()
        }
        UiMode::ContextMenu { target, .. } => target.name.clone(),
        _ => String::new(),
    }
}

#[component]
pub(super) fn NewFolderDialog(runtime: DriveRuntimeContext) -> impl IntoView {
    let state = runtime.state;
    let draft = create_memo(move |_| match state.get().mode {
        UiMode::NewFolderPrompt { name } => name,
        _ => String::new(),
    });

    view! {
        <div
            class="drive-overlay"
            on:click=move |_| runtime.dispatch_action(DriveAction::DismissOverlay)
        >
            <div
                class="drive-dialog"
                role="dialog"
                aria-label="Create new folder"
                on:click=|ev| ev.stop_propagation()
            >
                <h2>"Create New Folder"</h2>
                <input
                    type="text"
                    class="drive-input"
                    placeholder="Folder name"
                    autofocus=true
                    prop:value=move || draft.get()
                    on:input=move |ev| {
                        runtime.dispatch_action(DriveAction::SetNewFolderName {
                            name: event_target_value(&ev),
                        })
                    }
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        match ev.key().as_str() {
                            "Enter" => runtime.dispatch_action(DriveAction::ConfirmNewFolder),
                            "Escape" => runtime.dispatch_action(DriveAction::DismissOverlay),
                            _ => {}
                        }
                    }
                />
                <div class="drive-dialog-actions">
                    <button
                        type="button"
                        class="drive-button drive-button-secondary"
                        on:click=move |_| runtime.dispatch_action(DriveAction::DismissOverlay)
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="drive-button drive-button-primary"
                        on:click=move |_| runtime.dispatch_action(DriveAction::ConfirmNewFolder)
                    >
                        "Create"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub(super) fn DownloadDialog(runtime: DriveRuntimeContext) -> impl IntoView {
    let state = runtime.state;
    let name = create_memo(move |_| pending_entry_name(&state.get().mode));
    let progress = create_memo(move |_| match state.get().mode {
        UiMode::DownloadPrompt { run, .. } => run.map(|run| run.percent),
        _ => None,
    });

    view! {
        <div class="drive-overlay">
            <div class="drive-dialog" role="dialog" aria-label="Download file">
                <h2>"Download File"</h2>
                <p>{move || format!("Do you want to download {}?", name.get())}</p>
                <Show when=move || progress.get().is_some() fallback=|| ()>
                    <div class="drive-upload-track" role="progressbar">
                        <div
                            class="drive-upload-bar upload-bar-blue"
                            style=move || format!("width:{}%;", progress.get().unwrap_or(0))
                        ></div>
                    </div>
                    <p class="drive-status">
                        {move || format!("Downloading... {}%", progress.get().unwrap_or(0))}
                    </p>
                </Show>
                <div class="drive-dialog-actions">
                    <button
                        type="button"
                        class="drive-button drive-button-secondary"
                        on:click=move |_| runtime.dispatch_action(DriveAction::CancelDownload)
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="drive-button drive-button-primary"
                        disabled=move || progress.get().is_some()
                        on:click=move |_| runtime.dispatch_action(DriveAction::ConfirmDownload)
                    >
                        "Download"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub(super) fn DeleteConfirmDialog(runtime: DriveRuntimeContext) -> impl IntoView {
    let state = runtime.state;
    let name = create_memo(move |_| pending_entry_name(&state.get().mode));

    view! {
        <div
            class="drive-overlay"
            on:click=move |_| runtime.dispatch_action(DriveAction::CancelDelete)
        >
            <div
                class="drive-dialog"
                role="alertdialog"
                aria-label="Confirm delete"
                on:click=|ev| ev.stop_propagation()
            >
                <h2>"Confirm Delete"</h2>
                <p>{move || format!("Are you sure you want to delete {}?", name.get())}</p>
                <div class="drive-dialog-actions">
                    <button
                        type="button"
                        class="drive-button drive-button-secondary"
                        on:click=move |_| runtime.dispatch_action(DriveAction::CancelDelete)
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="drive-button drive-button-danger"
                        on:click=move |_| runtime.dispatch_action(DriveAction::ConfirmDelete)
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub(super) fn EntryContextMenu(runtime: DriveRuntimeContext) -> impl IntoView {
    let state = runtime.state;
    let menu_style = create_memo(move |_| match state.get().mode {
        UiMode::ContextMenu { position, .. } => {
            format!("left:{}px;top:{}px;", position.x, position.y)
        }
        _ => String::new(),
    });

    view! {
        <div
            id="drive-context-menu"
            class="drive-context-menu"
            role="menu"
            aria-label=move || format!("Actions for {}", pending_entry_name(&state.get().mode))
            style=move || menu_style.get()
            on:click=|ev| ev.stop_propagation()
            on:contextmenu=move |ev: web_sys::MouseEvent| stop_mouse_event(&ev)
        >
            <button
                type="button"
                role="menuitem"
                class="drive-context-menu-item"
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DriveAction::ContextMenuOpen);
                }
            >
                "Open"
            </button>
            <button
                type="button"
                role="menuitem"
                class="drive-context-menu-item drive-context-menu-danger"
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DriveAction::ContextMenuDelete);
                }
            >
                "Delete"
            </button>
        </div>
    }
}
