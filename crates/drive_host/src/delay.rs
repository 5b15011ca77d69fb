//! Timer abstraction so progress simulations can run against a real clock or instantly in tests.

use std::{future::Future, pin::Pin};

/// Object-safe boxed future used by [`Delay`].
pub type DelayFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a>>;

/// Host service that resolves after a delay.
pub trait Delay {
    /// Resolves after roughly `ms` milliseconds.
    fn sleep_ms(&self, ms: u32) -> DelayFuture<'_>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Delay that resolves immediately.
pub struct ImmediateDelay;

impl Delay for ImmediateDelay {
    fn sleep_ms(&self, _ms: u32) -> DelayFuture<'_> {
        Box::pin(async {})
    }
}
