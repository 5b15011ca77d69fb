//! Hands queued reducer effects to the host.

use leptos::*;

use crate::runtime_context::DriveRuntimeContext;

/// Runs queued effects in dispatch order whenever the queue becomes non-empty.
pub fn install(runtime: DriveRuntimeContext) {
    create_effect(move |_| {
        if runtime.effects.with(Vec::is_empty) {
            return;
        }

        // Effects dispatched while this batch runs queue behind it.
        let batch = runtime.effects.try_update(std::mem::take).unwrap_or_default();
        let host = runtime.host.get_value();
        for effect in batch {
            host.run_runtime_effect(runtime, effect);
        }
    });
}
