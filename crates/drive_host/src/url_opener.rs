//! URL-opening host service used by the download flow.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`UrlOpener`].
pub type UrlOpenerFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that opens a URL in a new browser tab.
pub trait UrlOpener {
    /// Opens `url` outside the drive UI.
    fn open_url<'a>(&'a self, url: &'a str) -> UrlOpenerFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// URL opener for targets without a browser window.
pub struct NoopUrlOpener;

impl UrlOpener for NoopUrlOpener {
    fn open_url<'a>(&'a self, _url: &'a str) -> UrlOpenerFuture<'a, Result<(), String>> {
        Box::pin(async { Err("url opener unavailable".to_string()) })
    }
}

#[derive(Debug, Clone, Default)]
/// URL opener that records every opened URL.
pub struct MemoryUrlOpener {
    opened: Rc<RefCell<Vec<String>>>,
}

impl MemoryUrlOpener {
    /// URLs opened so far, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl UrlOpener for MemoryUrlOpener {
    fn open_url<'a>(&'a self, url: &'a str) -> UrlOpenerFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        })
    }
}
