// SPDX-License-Identifier: MPL-2.0
//! Tracking an asynchronous operation with a single notification.
//!
//! A tracked operation moves its notification through
//! `Pending -> Success | Error`. The outcome is always handed back to the
//! caller unchanged, after the notification has been updated.

use super::notification::{Content, Kind, NotificationId, NotificationPatch};
use super::queue::NotificationQueue;
use std::fmt;
use std::future::Future;

/// Text shown for each state of a tracked operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveMessages {
    pub pending: Content,
    pub success: Content,
    /// Used for the error title; its message is replaced by the failure
    /// detail when the error has one.
    pub error: Content,
}

impl ResolveMessages {
    pub fn new(
        pending: impl Into<Content>,
        success: impl Into<Content>,
        error: impl Into<Content>,
    ) -> Self {
        Self {
            pending: pending.into(),
            success: success.into(),
            error: error.into(),
        }
    }
}

/// Removes the pending notification if the tracking future is dropped
/// before the operation completes.
struct PendingGuard<'a> {
    queue: &'a NotificationQueue,
    id: Option<NotificationId>,
}

impl PendingGuard<'_> {
    fn settle(mut self, patch: NotificationPatch) {
        if let Some(id) = self.id.take() {
            self.queue.update(id, patch);
        }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            tracing::debug!(%id, "tracked operation dropped before completion");
            self.queue.remove(id);
        }
    }
}

fn error_content<E: fmt::Display>(fallback: Content, err: &E) -> Content {
    let detail = err.to_string();
    if detail.trim().is_empty() {
        fallback
    } else {
        Content {
            title: fallback.title,
            message: Some(detail),
        }
    }
}

impl NotificationQueue {
    /// Shows a pending notification while `operation` runs, then turns it
    /// into a success or an error.
    ///
    /// On failure the notification message is the error's `Display` output
    /// (when non-empty). The operation's result is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the operation's own error after the notification has been
    /// switched to [`Kind::Error`].
    pub async fn resolve<F, T, E>(&self, operation: F, messages: ResolveMessages) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let ResolveMessages {
            pending,
            success,
            error,
        } = messages;
        self.resolve_with(
            operation,
            pending,
            move |_| success,
            move |err| error_content(error, err),
        )
        .await
    }

    /// Like [`resolve`](Self::resolve), with content computed from the outcome.
    ///
    /// # Errors
    ///
    /// Returns the operation's own error after the notification has been
    /// switched to [`Kind::Error`].
    pub async fn resolve_with<F, T, E, S, R>(
        &self,
        operation: F,
        pending: impl Into<Content>,
        on_success: S,
        on_error: R,
    ) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        S: FnOnce(&T) -> Content,
        R: FnOnce(&E) -> Content,
    {
        let guard = PendingGuard {
            queue: self,
            id: Some(self.pending_notice(pending)),
        };

        let outcome = operation.await;
        let patch = match &outcome {
            Ok(value) => NotificationPatch::new()
                .kind(Kind::Success)
                .content(on_success(value)),
            Err(err) => NotificationPatch::new()
                .kind(Kind::Error)
                .content(on_error(err)),
        };
        guard.settle(patch);
        outcome
    }
}
