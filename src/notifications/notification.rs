// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, the `Kind` and `Lifetime`
//! enums, and the request/patch builders used to create and change
//! notifications through the queue.

use super::policy::LifetimePolicy;
use crate::config::MAX_TIMER_MS;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Unique identifier for a notification.
///
/// Ids come from a process-wide counter and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Severity of a notification. Determines its default lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// Operation completed successfully (short lifetime).
    #[default]
    Success,
    /// Error requiring attention (longest lifetime).
    Error,
    /// Warning that doesn't block operation (medium lifetime).
    Warning,
    /// Informational message (medium lifetime).
    Info,
    /// In-flight operation; stays until resolved.
    Pending,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::Success,
        Kind::Error,
        Kind::Warning,
        Kind::Info,
        Kind::Pending,
    ];

    /// Human-readable label, also used as the title fallback.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Kind::Success => "Success",
            Kind::Error => "Error",
            Kind::Warning => "Warning",
            Kind::Info => "Info",
            Kind::Pending => "Working",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How long a notification stays in the active set absent manual removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Removed automatically once the duration has elapsed.
    After(Duration),
    /// Stays until removed or updated to a finite lifetime.
    Unbounded,
}

impl Lifetime {
    /// Returns the duration if finite.
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self {
            Lifetime::After(d) => Some(d),
            Lifetime::Unbounded => None,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        matches!(self, Lifetime::After(_))
    }

    /// Delay to arm an expiry timer with, capped at [`MAX_TIMER_MS`].
    #[must_use]
    pub fn timer_delay(self) -> Option<Duration> {
        self.duration()
            .map(|d| d.min(Duration::from_millis(MAX_TIMER_MS)))
    }
}

impl From<Duration> for Lifetime {
    fn from(duration: Duration) -> Self {
        Lifetime::After(duration)
    }
}

/// A single user-triggered follow-up attached to a notification.
///
/// Invoking the action does not dismiss the notification.
#[derive(Clone)]
pub struct Action {
    label: String,
    callback: Arc<dyn Fn() + Send + Sync>,
}

impl Action {
    pub fn new(label: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            callback: Arc::new(callback),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the callback. Called by the renderer when the user activates it.
    pub fn invoke(&self) {
        (self.callback)();
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Display text of a notification: a headline and optional detail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub title: String,
    pub message: Option<String>,
}

impl Content {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl From<&str> for Content {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for Content {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}

/// Everything needed to enqueue a notification.
///
/// The lifetime defaults to the queue's policy for the kind unless set.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub(crate) kind: Kind,
    pub(crate) content: Content,
    pub(crate) lifetime: Option<Lifetime>,
    pub(crate) action: Option<Action>,
}

impl NotificationRequest {
    pub fn new(kind: Kind, content: impl Into<Content>) -> Self {
        Self {
            kind,
            content: content.into(),
            lifetime: None,
            action: None,
        }
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.content.message = Some(message.into());
        self
    }

    /// Overrides the kind's default lifetime.
    #[must_use]
    pub fn lifetime(mut self, lifetime: impl Into<Lifetime>) -> Self {
        self.lifetime = Some(lifetime.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

/// A partial update merged into an active notification.
///
/// Fields left unset keep their current value. Setting `kind` without
/// `lifetime` resets the lifetime to the new kind's default.
#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    kind: Option<Kind>,
    title: Option<String>,
    message: Option<Option<String>>,
    lifetime: Option<Lifetime>,
    action: Option<Option<Action>>,
}

impl NotificationPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(Some(message.into()));
        self
    }

    #[must_use]
    pub fn clear_message(mut self) -> Self {
        self.message = Some(None);
        self
    }

    /// Replaces title and message together; a missing message clears it.
    #[must_use]
    pub fn content(mut self, content: impl Into<Content>) -> Self {
        let content = content.into();
        self.title = Some(content.title);
        self.message = Some(content.message);
        self
    }

    #[must_use]
    pub fn lifetime(mut self, lifetime: impl Into<Lifetime>) -> Self {
        self.lifetime = Some(lifetime.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(Some(action));
        self
    }

    #[must_use]
    pub fn clear_action(mut self) -> Self {
        self.action = Some(None);
        self
    }

    /// Whether applying this patch replaces the expiry timer.
    #[must_use]
    pub fn rearms(&self) -> bool {
        self.kind.is_some() || self.lifetime.is_some()
    }
}

/// A notification in the active set.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    title: String,
    message: Option<String>,
    lifetime: Lifetime,
    action: Option<Action>,
    created_at: Instant,
    /// Last mutation; equals `created_at` until the first update.
    updated_at: Instant,
}

impl Notification {
    pub(crate) fn from_request(request: NotificationRequest, policy: &LifetimePolicy) -> Self {
        let NotificationRequest {
            kind,
            content,
            lifetime,
            action,
        } = request;
        let now = Instant::now();
        Self {
            id: NotificationId::new(),
            kind,
            title: normalize_title(&content.title).unwrap_or_else(|| kind.label().to_owned()),
            message: content.message,
            lifetime: lifetime.unwrap_or_else(|| policy.lifetime_for(kind)),
            action,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges a patch. Returns `true` if the lifetime was recomputed and the
    /// caller must replace the expiry timer.
    pub(crate) fn apply(&mut self, patch: NotificationPatch, policy: &LifetimePolicy) -> bool {
        let rearm = patch.rearms();
        let NotificationPatch {
            kind,
            title,
            message,
            lifetime,
            action,
        } = patch;

        if let Some(kind) = kind {
            self.kind = kind;
        }
        // An empty title would leave nothing to render; keep the old one.
        if let Some(title) = title.as_deref().and_then(normalize_title) {
            self.title = title;
        }
        if let Some(message) = message {
            self.message = message;
        }
        if let Some(action) = action {
            self.action = action;
        }
        if rearm {
            self.lifetime = lifetime.unwrap_or_else(|| policy.lifetime_for(self.kind));
        }
        self.updated_at = Instant::now();
        rearm
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> Instant {
        self.updated_at
    }

    /// Returns the age of this notification.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn policy() -> LifetimePolicy {
        LifetimePolicy::default()
    }

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::from_request(NotificationRequest::new(Kind::Success, "a"), &policy());
        let n2 = Notification::from_request(NotificationRequest::new(Kind::Success, "a"), &policy());
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn request_without_lifetime_uses_policy_default() {
        let n = Notification::from_request(NotificationRequest::new(Kind::Error, "x"), &policy());
        assert_eq!(n.lifetime(), policy().lifetime_for(Kind::Error));
    }

    #[test]
    fn pending_requests_are_unbounded() {
        let n = Notification::from_request(NotificationRequest::new(Kind::Pending, "x"), &policy());
        assert_eq!(n.lifetime(), Lifetime::Unbounded);
    }

    #[test]
    fn request_lifetime_overrides_policy() {
        let n = Notification::from_request(
            NotificationRequest::new(Kind::Success, "x").lifetime(Duration::from_secs(42)),
            &policy(),
        );
        assert_eq!(n.lifetime(), Lifetime::After(Duration::from_secs(42)));
    }

    #[test]
    fn blank_title_falls_back_to_kind_label() {
        let n = Notification::from_request(NotificationRequest::new(Kind::Warning, "   "), &policy());
        assert_eq!(n.title(), "Warning");
    }

    #[test]
    fn kind_patch_keeps_title_and_resets_lifetime() {
        let mut n = Notification::from_request(NotificationRequest::new(Kind::Error, "X"), &policy());
        let rearm = n.apply(NotificationPatch::new().kind(Kind::Success), &policy());

        assert!(rearm);
        assert_eq!(n.title(), "X");
        assert_eq!(n.kind(), Kind::Success);
        assert_eq!(n.lifetime(), policy().lifetime_for(Kind::Success));
    }

    #[test]
    fn explicit_lifetime_wins_over_new_kind_default() {
        let mut n =
            Notification::from_request(NotificationRequest::new(Kind::Pending, "x"), &policy());
        n.apply(
            NotificationPatch::new()
                .kind(Kind::Success)
                .lifetime(Duration::from_millis(10)),
            &policy(),
        );
        assert_eq!(n.lifetime(), Lifetime::After(Duration::from_millis(10)));
    }

    #[test]
    fn text_only_patch_does_not_rearm() {
        let mut n = Notification::from_request(
            NotificationRequest::new(Kind::Info, "x").message("old"),
            &policy(),
        );
        let before = n.lifetime();
        let rearm = n.apply(NotificationPatch::new().title("y").clear_message(), &policy());

        assert!(!rearm);
        assert_eq!(n.title(), "y");
        assert_eq!(n.message(), None);
        assert_eq!(n.lifetime(), before);
    }

    #[test]
    fn empty_title_patch_is_ignored() {
        let mut n = Notification::from_request(NotificationRequest::new(Kind::Info, "keep"), &policy());
        n.apply(NotificationPatch::new().title(""), &policy());
        assert_eq!(n.title(), "keep");
    }

    #[test]
    fn content_patch_without_message_clears_it() {
        let mut n = Notification::from_request(
            NotificationRequest::new(Kind::Pending, "Saving").message("please wait"),
            &policy(),
        );
        n.apply(NotificationPatch::new().content("Saved"), &policy());
        assert_eq!(n.title(), "Saved");
        assert_eq!(n.message(), None);
    }

    #[test]
    fn action_invocation_runs_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let action = Action::new("Undo", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        action.invoke();
        action.invoke();

        assert_eq!(action.label(), "Undo");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(format!("{action:?}").contains("Undo"));
    }

    #[test]
    fn timer_delay_caps_oversized_lifetimes() {
        let cap = Duration::from_millis(MAX_TIMER_MS);
        assert_eq!(
            Lifetime::After(Duration::from_secs(5)).timer_delay(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            Lifetime::After(Duration::from_secs(100_000_000)).timer_delay(),
            Some(cap)
        );
        assert_eq!(Lifetime::After(Duration::MAX).timer_delay(), Some(cap));
        assert_eq!(Lifetime::Unbounded.timer_delay(), None);
    }

    #[test]
    fn kind_labels_are_distinct() {
        for (i, a) in Kind::ALL.iter().enumerate() {
            for b in &Kind::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
