//! Deferred, timed, and queued future helpers
//!
//! Small wrappers over the runtime's primitives: a future completed from the
//! outside ([`Deferred`]), delay and deadline helpers ([`delayed`],
//! [`timeout`]), and a FIFO gate serializing task execution ([`TaskQueue`]).

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tracing::trace;

use crate::errors::{ToolkitError, ToolkitResult};

/// Future completed from the outside through a [`DeferredHandle`]
///
/// Awaiting yields `Err(Canceled)` when the handle is dropped without
/// resolving.
pub struct Deferred<T> {
    receiver: oneshot::Receiver<T>,
}

/// Resolution side of a [`Deferred`]
pub struct DeferredHandle<T> {
    sender: oneshot::Sender<T>,
}

/// Create a deferred value and the handle that resolves it
pub fn deferred<T>() -> (DeferredHandle<T>, Deferred<T>) {
    let (sender, receiver) = oneshot::channel();
    (DeferredHandle { sender }, Deferred { receiver })
}

impl<T> DeferredHandle<T> {
    /// Complete the deferred value
    ///
    /// Has no effect when the awaiting side was already dropped.
    pub fn resolve(self, value: T) {
        let _ = self.sender.send(value);
    }
}

impl<T> Future for Deferred<T> {
    type Output = ToolkitResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().receiver)
            .poll(cx)
            .map(|received| received.map_err(ToolkitError::from))
    }
}

/// Resolve to `value` after the delay elapses
pub async fn delayed<T>(value: T, delay: Duration) -> T {
    tokio::time::sleep(delay).await;
    value
}

/// Await the future, failing with [`ToolkitError::Timeout`] past the limit
pub async fn timeout<F>(limit: Duration, future: F) -> ToolkitResult<F::Output>
where
    F: Future,
{
    tokio::time::timeout(limit, future)
        .await
        .map_err(ToolkitError::from)
}

/// FIFO gate running submitted tasks one at a time
///
/// Tasks submitted concurrently acquire the gate in submission order, so
/// execution is strictly sequential even when the callers are not.
pub struct TaskQueue {
    gate: Mutex<()>,
}

impl TaskQueue {
    /// Create an idle queue
    pub fn new() -> Self {
        Self { gate: Mutex::new(()) }
    }

    /// Run a task once its turn arrives
    pub async fn run<F, Fut>(&self, task: F) -> Fut::Output
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        let _turn = self.gate.lock().await;
        trace!("task acquired queue turn");
        task().await
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
