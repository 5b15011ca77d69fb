//! Opens download links in a new browser tab.

use drive_host::{UrlOpener, UrlOpenerFuture};

#[derive(Debug, Clone, Copy, Default)]
/// URL opener backed by `window.open(url, "_blank")`.
pub struct WebUrlOpener;

impl UrlOpener for WebUrlOpener {
    fn open_url<'a>(&'a self, url: &'a str) -> UrlOpenerFuture<'a, Result<(), String>> {
        Box::pin(async move { open_in_new_tab(url) })
    }
}

#[cfg(target_arch = "wasm32")]
fn open_in_new_tab(url: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    match window.open_with_url_and_target(url, "_blank") {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err("new tab was blocked".to_string()),
        Err(err) => Err(format!("window.open failed: {err:?}")),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_in_new_tab(url: &str) -> Result<(), String> {
    Err(format!("cannot open {url} outside the browser"))
}
