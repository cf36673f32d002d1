// SPDX-License-Identifier: MPL-2.0
//! `toast_queue` is a process-wide toast notification queue.
//!
//! It keeps the ordered set of active notifications, expires them on
//! per-kind timers, links asynchronous operations to a pending notification
//! that resolves into success or error, and lets code without a queue handle
//! report through a global accessor.

#![doc(html_root_url = "https://docs.rs/toast_queue/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notifications;

pub use notifications::{
    global, Action, Content, Kind, Lifetime, LifetimePolicy, Notification, NotificationId,
    NotificationPatch, NotificationQueue, NotificationRequest, ResolveMessages,
};
