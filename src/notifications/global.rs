// SPDX-License-Identifier: MPL-2.0
//! Process-wide access to the registered notification queue.
//!
//! Code that has no handle to the queue (data-fetch helpers, background
//! workers) reports through these functions. They forward to the queue set
//! with [`register`] and silently do nothing while none is registered, which
//! keeps them safe to call before start-up or from test harnesses.
//!
//! ```ignore
//! let queue = NotificationQueue::new();
//! global::register(queue.clone());
//!
//! // Anywhere else in the process:
//! global::error("Could not refresh listings");
//!
//! // At shutdown, or at the end of a test:
//! global::unregister();
//! ```

use super::notification::{Content, NotificationId, NotificationPatch};
use super::queue::NotificationQueue;
use super::resolve::ResolveMessages;
use std::fmt;
use std::future::Future;
use std::sync::{PoisonError, RwLock};

/// The queue global calls are forwarded to.
static CURRENT: RwLock<Option<NotificationQueue>> = RwLock::new(None);

/// Makes `queue` the target of global calls.
///
/// Last write wins: returns the previously registered queue, if any.
pub fn register(queue: NotificationQueue) -> Option<NotificationQueue> {
    let previous = CURRENT
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(queue);
    tracing::debug!(replaced = previous.is_some(), "notification queue registered");
    previous
}

/// Clears the registration. Global calls become no-ops.
pub fn unregister() -> Option<NotificationQueue> {
    let previous = CURRENT
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    tracing::debug!(had_queue = previous.is_some(), "notification queue unregistered");
    previous
}

/// Returns a handle to the registered queue.
#[must_use]
pub fn current() -> Option<NotificationQueue> {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[must_use]
pub fn is_registered() -> bool {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

// The lock is released before forwarding so a queue call never runs while
// holding it.
fn forward<R>(op: impl FnOnce(&NotificationQueue) -> R) -> Option<R> {
    let Some(queue) = current() else {
        tracing::trace!("no notification queue registered, call ignored");
        return None;
    };
    Some(op(&queue))
}

pub fn success(content: impl Into<Content>) -> Option<NotificationId> {
    forward(|queue| queue.success(content))
}

pub fn error(content: impl Into<Content>) -> Option<NotificationId> {
    forward(|queue| queue.error(content))
}

pub fn warning(content: impl Into<Content>) -> Option<NotificationId> {
    forward(|queue| queue.warning(content))
}

pub fn info(content: impl Into<Content>) -> Option<NotificationId> {
    forward(|queue| queue.info(content))
}

pub fn pending_notice(content: impl Into<Content>) -> Option<NotificationId> {
    forward(|queue| queue.pending_notice(content))
}

pub fn update(id: NotificationId, patch: NotificationPatch) {
    forward(|queue| queue.update(id, patch));
}

pub fn remove(id: NotificationId) -> bool {
    forward(|queue| queue.remove(id)).unwrap_or(false)
}

/// Tracks `operation` on the registered queue, or just awaits it when none
/// is registered.
///
/// # Errors
///
/// Returns the operation's own error unchanged.
pub async fn resolve<F, T, E>(operation: F, messages: ResolveMessages) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    match current() {
        Some(queue) => queue.resolve(operation, messages).await,
        None => operation.await,
    }
}
