//! Runtime provider and context wiring for the drive UI.
//!
//! This module owns the reducer container, the runtime effect queue and host bootstrap. UI
//! composition stays in [`crate::components`].

use drive_host::DriveHostServices;
use leptos::*;

use crate::{
    effect_executor,
    host::DriveHostContext,
    model::DriveState,
    reducer::{reduce_drive, DriveAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading drive state and dispatching [`DriveAction`] values.
pub struct DriveRuntimeContext {
    /// Host services and host-owned state used to execute runtime effects.
    pub host: StoredValue<DriveHostContext>,
    /// Reactive drive state signal.
    pub state: RwSignal<DriveState>,
    /// Queue of runtime effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DriveAction>,
}

impl DriveRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DriveAction) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`DriveRuntimeContext`] to descendant components and opens the root folder.
pub fn DriveProvider(
    /// Injected browser or in-memory host bundle assembled by the entry layer.
    host_services: DriveHostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(DriveHostContext::new(host_services));
    let state = create_rw_signal(DriveState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DriveAction| {
        let mut drive = state.get_untracked();
        let previous = drive.clone();

        match reduce_drive(&mut drive, action) {
            Ok(new_effects) => {
                if drive != previous {
                    state.set(drive);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("drive reducer error: {err}"),
        }
    });

    let runtime = DriveRuntimeContext {
        host,
        state,
        effects,
        dispatch,
    };

    provide_context(runtime);

    let host_context = host.get_value();
    host_context.install_boot(dispatch);
    effect_executor::install(runtime);
    on_cleanup(move || host_context.shutdown());

    children().into_view()
}

/// Returns the current [`DriveRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DriveProvider`].
pub fn use_drive_runtime() -> DriveRuntimeContext {
    use_context::<DriveRuntimeContext>().expect("DriveRuntimeContext not provided")
}
