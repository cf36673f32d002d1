// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `NotificationQueue` owns the ordered active set and one expiry entry
//! per finite-lifetime notification. Mutations take effect synchronously and
//! are published to subscribers before the call returns. A driver task
//! spawned on the queue's runtime removes notifications whose lifetime has
//! elapsed.

use super::notification::{
    Content, Kind, Lifetime, Notification, NotificationId, NotificationPatch, NotificationRequest,
};
use super::policy::LifetimePolicy;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use std::fmt;
use std::future::poll_fn;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio_util::time::delay_queue::{DelayQueue, Key};

struct Entry {
    notification: Notification,
    /// Expiry handle; `None` while the lifetime is unbounded.
    timer: Option<Key>,
}

/// Result of merging a patch into an active notification.
struct Updated {
    kind: Kind,
    title: String,
    rearmed: bool,
}

struct State {
    /// Display order: oldest first.
    active: Vec<Entry>,
    timers: DelayQueue<NotificationId>,
}

impl State {
    fn new() -> Self {
        Self {
            active: Vec::new(),
            timers: DelayQueue::new(),
        }
    }

    fn position(&self, id: NotificationId) -> Option<usize> {
        self.active
            .iter()
            .position(|entry| entry.notification.id() == id)
    }

    /// Appends a notification, returning whether an expiry entry was armed.
    fn insert(&mut self, notification: Notification) -> bool {
        let timer = notification
            .lifetime()
            .timer_delay()
            .map(|delay| self.timers.insert(notification.id(), delay));
        let armed = timer.is_some();
        self.active.push(Entry {
            notification,
            timer,
        });
        armed
    }

    fn update(
        &mut self,
        id: NotificationId,
        patch: NotificationPatch,
        policy: &LifetimePolicy,
    ) -> Option<Updated> {
        let pos = self.position(id)?;
        let entry = &mut self.active[pos];
        let rearmed = entry.notification.apply(patch, policy);

        if rearmed {
            // The old deadline belongs to the old lifetime; it must never fire.
            if let Some(key) = entry.timer.take() {
                self.timers.remove(&key);
            }
            entry.timer = entry
                .notification
                .lifetime()
                .timer_delay()
                .map(|delay| self.timers.insert(id, delay));
        }

        Some(Updated {
            kind: entry.notification.kind(),
            title: entry.notification.title().to_owned(),
            rearmed,
        })
    }

    fn remove(&mut self, id: NotificationId) -> Option<Notification> {
        let pos = self.position(id)?;
        let entry = self.active.remove(pos);
        if let Some(key) = entry.timer {
            self.timers.remove(&key);
        }
        Some(entry.notification)
    }

    fn snapshot(&self) -> Vec<Notification> {
        self.active
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }
}

struct Shared {
    state: Mutex<State>,
    policy: LifetimePolicy,
    /// Wakes the driver so it polls the delay queue for a new earliest deadline.
    rearm: Notify,
    active_tx: watch::Sender<Vec<Notification>>,
    /// Runtime that owns the timers; entered by callers on foreign threads.
    runtime: Handle,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs under the state lock, so a live `watch::Ref` on a subscriber
    /// blocks every mutation until it is dropped.
    fn publish(&self, state: &State) {
        self.active_tx.send_replace(state.snapshot());
    }

    fn report(&self, event: DiagnosticEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.log(event);
        }
    }

    /// Warnings and errors shown to the user are also logged as diagnostics.
    fn report_severity(&self, kind: Kind, title: &str) {
        let Some(handle) = &self.diagnostics else {
            return;
        };
        match kind {
            Kind::Warning => handle.log_warning(title),
            Kind::Error => handle.log_error(title),
            Kind::Success | Kind::Info | Kind::Pending => {}
        }
    }

    /// Removes every notification whose deadline has passed.
    ///
    /// Expired keys are popped under the same lock as every mutation, so a
    /// key removed by `update`/`remove` can never be observed here.
    fn poll_expired(&self, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.lock();
        let mut expired = Vec::new();
        while let Poll::Ready(Some(item)) = state.timers.poll_expired(cx) {
            let id = item.into_inner();
            if let Some(pos) = state.position(id) {
                state.active.remove(pos);
                expired.push(id);
            }
        }
        if expired.is_empty() {
            return Poll::Pending;
        }
        self.publish(&state);
        drop(state);

        for id in expired {
            tracing::debug!(%id, "notification expired");
            self.report(DiagnosticEventKind::Expired { id });
        }
        Poll::Ready(())
    }
}

async fn expire_loop(shared: Arc<Shared>) {
    loop {
        tokio::select! {
            () = poll_fn(|cx| shared.poll_expired(cx)) => {}
            () = shared.rearm.notified() => {}
        }
    }
}

struct Inner {
    shared: Arc<Shared>,
    driver: JoinHandle<()>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Builder for [`NotificationQueue`].
#[derive(Debug, Default)]
pub struct QueueBuilder {
    policy: LifetimePolicy,
    diagnostics: Option<DiagnosticsHandle>,
    runtime: Option<Handle>,
}

impl QueueBuilder {
    #[must_use]
    pub fn policy(mut self, policy: LifetimePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the diagnostics handle for logging lifecycle events.
    #[must_use]
    pub fn diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    /// Runs timers on `runtime` instead of the current one.
    #[must_use]
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Creates the queue and spawns its expiry driver.
    ///
    /// # Panics
    ///
    /// Panics if no runtime was given and this is called outside a Tokio
    /// runtime.
    pub fn build(self) -> NotificationQueue {
        let runtime = self.runtime.unwrap_or_else(Handle::current);
        let (active_tx, _) = watch::channel(Vec::new());
        let shared = Arc::new(Shared {
            state: Mutex::new(State::new()),
            policy: self.policy,
            rearm: Notify::new(),
            active_tx,
            runtime: runtime.clone(),
            diagnostics: self.diagnostics,
        });
        let driver = runtime.spawn(expire_loop(Arc::clone(&shared)));

        NotificationQueue {
            inner: Arc::new(Inner { shared, driver }),
        }
    }
}

/// Handle to the ordered set of active notifications.
///
/// Cheap to clone; all clones share one active set. Dropping the last clone
/// stops the expiry driver.
#[derive(Clone)]
pub struct NotificationQueue {
    inner: Arc<Inner>,
}

impl NotificationQueue {
    /// Creates a queue with the default lifetime policy.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a queue with a custom lifetime policy.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn with_policy(policy: LifetimePolicy) -> Self {
        Self::builder().policy(policy).build()
    }

    #[must_use]
    pub fn builder() -> QueueBuilder {
        QueueBuilder::default()
    }

    fn shared(&self) -> &Shared {
        &self.inner.shared
    }

    /// Appends a notification and arms its expiry if the lifetime is finite.
    pub fn push(&self, request: NotificationRequest) -> NotificationId {
        let shared = self.shared();
        let notification = Notification::from_request(request, &shared.policy);
        let id = notification.id();
        let kind = notification.kind();
        let title = notification.title().to_owned();

        let armed = {
            let _runtime = shared.runtime.enter();
            let mut state = shared.lock();
            let armed = state.insert(notification);
            shared.publish(&state);
            armed
        };
        if armed {
            shared.rearm.notify_one();
        }

        tracing::debug!(%id, %kind, %title, "notification shown");
        shared.report(DiagnosticEventKind::Shown { id, kind });
        shared.report_severity(kind, &title);
        id
    }

    /// Creates a notification of `kind`.
    ///
    /// `lifetime` overrides the policy default for the kind.
    pub fn enqueue(
        &self,
        kind: Kind,
        title: impl Into<String>,
        message: Option<String>,
        lifetime: Option<Lifetime>,
    ) -> NotificationId {
        let mut request = NotificationRequest::new(
            kind,
            Content {
                title: title.into(),
                message,
            },
        );
        request.lifetime = lifetime;
        self.push(request)
    }

    pub fn success(&self, content: impl Into<Content>) -> NotificationId {
        self.push(NotificationRequest::new(Kind::Success, content))
    }

    pub fn error(&self, content: impl Into<Content>) -> NotificationId {
        self.push(NotificationRequest::new(Kind::Error, content))
    }

    pub fn warning(&self, content: impl Into<Content>) -> NotificationId {
        self.push(NotificationRequest::new(Kind::Warning, content))
    }

    pub fn info(&self, content: impl Into<Content>) -> NotificationId {
        self.push(NotificationRequest::new(Kind::Info, content))
    }

    /// Creates an unbounded notification for an in-flight operation.
    pub fn pending_notice(&self, content: impl Into<Content>) -> NotificationId {
        self.push(NotificationRequest::new(Kind::Pending, content))
    }

    /// Merges `patch` into the notification with `id`.
    ///
    /// Changing the kind or lifetime replaces the expiry, counted from now.
    /// Does nothing if the notification already expired or was removed.
    pub fn update(&self, id: NotificationId, patch: NotificationPatch) {
        let shared = self.shared();
        let updated = {
            let _runtime = shared.runtime.enter();
            let mut state = shared.lock();
            let updated = state.update(id, patch, &shared.policy);
            if updated.is_some() {
                shared.publish(&state);
            }
            updated
        };

        let Some(updated) = updated else {
            tracing::trace!(%id, "update ignored, notification no longer active");
            return;
        };
        tracing::debug!(%id, kind = %updated.kind, rearmed = updated.rearmed, "notification updated");
        if updated.rearmed {
            shared.rearm.notify_one();
            shared.report(DiagnosticEventKind::Changed {
                id,
                kind: updated.kind,
            });
            shared.report_severity(updated.kind, &updated.title);
        }
    }

    /// Removes a notification by its ID and cancels its expiry.
    ///
    /// Returns `true` if the notification was found and removed.
    pub fn remove(&self, id: NotificationId) -> bool {
        let shared = self.shared();
        let removed = {
            let _runtime = shared.runtime.enter();
            let mut state = shared.lock();
            let removed = state.remove(id).is_some();
            if removed {
                shared.publish(&state);
            }
            removed
        };

        if removed {
            tracing::debug!(%id, "notification dismissed");
            shared.report(DiagnosticEventKind::Dismissed { id });
        }
        removed
    }

    /// Removes every notification for which `keep` returns `false`.
    ///
    /// `keep` runs on a snapshot with no lock held, so it may call back into
    /// the queue. Returns the number of notifications removed.
    pub fn retain(&self, mut keep: impl FnMut(&Notification) -> bool) -> usize {
        let doomed: Vec<NotificationId> = self
            .snapshot()
            .iter()
            .filter(|notification| !keep(notification))
            .map(Notification::id)
            .collect();
        if doomed.is_empty() {
            return 0;
        }

        let shared = self.shared();
        let removed: Vec<NotificationId> = {
            let _runtime = shared.runtime.enter();
            let mut state = shared.lock();
            // Ids that expired since the snapshot are skipped.
            let removed: Vec<NotificationId> = doomed
                .into_iter()
                .filter(|id| state.remove(*id).is_some())
                .collect();
            if !removed.is_empty() {
                shared.publish(&state);
            }
            removed
        };

        for id in &removed {
            tracing::debug!(%id, "notification dismissed");
            shared.report(DiagnosticEventKind::Dismissed { id: *id });
        }
        removed.len()
    }

    /// Removes all notifications.
    pub fn clear(&self) {
        self.retain(|_| false);
    }

    /// Returns a copy of the active set in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.shared().lock().snapshot()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        let state = self.shared().lock();
        state
            .position(id)
            .map(|pos| state.active[pos].notification.clone())
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.shared().lock().position(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared().lock().active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribes to the active set. The receiver sees every change.
    ///
    /// Clone the set out of the receiver (or drop the borrow) before calling
    /// back into the queue: mutations publish while holding the state lock,
    /// so calling `remove` with a `borrow()` still alive deadlocks.
    ///
    /// ```no_run
    /// # use toast_queue::NotificationQueue;
    /// # async fn render(queue: NotificationQueue) {
    /// let mut active = queue.subscribe();
    /// while active.changed().await.is_ok() {
    ///     let shown = active.borrow_and_update().clone();
    ///     if let Some(oldest) = shown.first() {
    ///         queue.remove(oldest.id());
    ///     }
    /// }
    /// # }
    /// ```
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.shared().active_tx.subscribe()
    }

    #[must_use]
    pub fn policy(&self) -> &LifetimePolicy {
        &self.shared().policy
    }

    /// Returns whether both handles point at the same queue.
    #[must_use]
    pub fn same_queue(&self, other: &NotificationQueue) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationQueue")
            .field("active", &self.len())
            .field("policy", self.policy())
            .finish_non_exhaustive()
    }
}
