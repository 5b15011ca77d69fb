use drive_host::DriveEntry;

use super::*;
use crate::model::ScreenPosition;

/// Short badge text for an entry tile.
fn entry_badge(entry: &DriveEntry) -> String {
    if entry.is_folder() {
        return "Folder".to_string();
    }
    entry
        .extension()
        .map(|ext| ext.to_ascii_uppercase())
        .unwrap_or_else(|| "File".to_string())
}

#[component]
pub(super) fn EntryGrid(runtime: DriveRuntimeContext) -> impl IntoView {
    let state = runtime.state;
    let loading = create_memo(move |_| state.get().loading);
    let entries = create_memo(move |_| state.get().visible_entries());

    view! {
        <section class="drive-entries" aria-label="Folder contents">
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="drive-status">"Loading..."</p> }
            >
                <Show
                    when=move || !entries.get().is_empty()
                    fallback=|| view! { <p class="drive-status">"This folder is empty."</p> }
                >
                    <div class="drive-grid" role="list">
                        <For each=move || entries.get() key=|entry| entry.id.clone() let:entry>
                            <EntryTile runtime=runtime entry=entry />
                        </For>
                    </div>
                </Show>
            </Show>
        </section>
    }
}

#[component]
fn EntryTile(runtime: DriveRuntimeContext, entry: DriveEntry) -> impl IntoView {
    let class = if entry.is_folder() {
        "drive-entry drive-entry-folder"
    } else {
        "drive-entry drive-entry-file"
    };
    let badge = entry_badge(&entry);
    let name = entry.name.clone();
    let open_target = entry.clone();
    let menu_target = entry;

    view! {
        <button
            type="button"
            role="listitem"
            class=class
            title=name.clone()
            on:dblclick=move |_| {
                runtime.dispatch_action(DriveAction::OpenEntry {
                    entry: open_target.clone(),
                })
            }
            on:contextmenu=move |ev: web_sys::MouseEvent| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DriveAction::OpenContextMenu {
                    position: ScreenPosition {
                        x: ev.client_x(),
                        y: ev.client_y(),
                    },
                    entry: menu_target.clone(),
                });
            }
        >
            <span class="drive-entry-badge" aria-hidden="true">{badge}</span>
            <span class="drive-entry-name">{name}</span>
        </button>
    }
}
