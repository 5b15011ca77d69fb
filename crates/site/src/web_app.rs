use drive_host_web::build_host_services;
use drive_runtime::{DriveProvider, DriveShell};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="My Drive" />
        <Meta name="description" content="Browser file manager with folders, uploads and downloads." />

        <main class="site-root">
            <DriveEntryPoint />
        </main>
    }
}

#[component]
pub fn DriveEntryPoint() -> impl IntoView {
    view! {
        <DriveProvider host_services=build_host_services()>
            <DriveShell />
        </DriveProvider>
    }
}
