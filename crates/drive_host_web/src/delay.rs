//! `setTimeout`-backed [`Delay`] for progress simulations and toast expiry.

use drive_host::{Delay, DelayFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser delay backed by `window.setTimeout`. Resolves immediately outside `wasm32`.
pub struct TimeoutDelay;

impl Delay for TimeoutDelay {
    fn sleep_ms(&self, ms: u32) -> DelayFuture<'_> {
        Box::pin(sleep(ms))
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(ms: u32) {
    use futures::channel::oneshot;
    use wasm_bindgen::{closure::Closure, JsCast};

    let Some(window) = web_sys::window() else {
        return;
    };
    let (tx, rx) = oneshot::channel::<()>();
    let on_timeout = Closure::once_into_js(move || {
        let _ = tx.send(());
    });
    let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(on_timeout.unchecked_ref(), timeout)
        .is_err()
    {
        return;
    }
    let _ = rx.await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(ms: u32) {
    let _ = ms;
}
