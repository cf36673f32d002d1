// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for notification activity tracking.

use std::time::Instant;

use crate::notifications::{Kind, NotificationId};

/// What happened to a notification, or what it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEventKind {
    /// A notification entered the active set.
    Shown { id: NotificationId, kind: Kind },

    /// A notification's kind or lifetime changed (e.g. pending resolved).
    Changed { id: NotificationId, kind: Kind },

    /// A notification reached the end of its lifetime.
    Expired { id: NotificationId },

    /// A notification was removed by a caller or the user.
    Dismissed { id: NotificationId },

    /// A warning was shown to the user.
    Warning { message: String },

    /// An error was shown to the user.
    Error { message: String },
}

/// A timestamped diagnostic event.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event was created (monotonic).
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped with the current instant.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    /// Returns the notification this event refers to, if any.
    #[must_use]
    pub fn notification_id(&self) -> Option<NotificationId> {
        match &self.kind {
            DiagnosticEventKind::Shown { id, .. }
            | DiagnosticEventKind::Changed { id, .. }
            | DiagnosticEventKind::Expired { id }
            | DiagnosticEventKind::Dismissed { id } => Some(*id),
            DiagnosticEventKind::Warning { .. } | DiagnosticEventKind::Error { .. } => None,
        }
    }
}
