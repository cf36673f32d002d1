// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue for user feedback.
//!
//! This module provides a non-intrusive notification system following
//! toast/snackbar UX patterns. Notifications appear temporarily to inform
//! users about the outcome of actions (profile saved, upload failed) without
//! blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - `Notification` entity, `Kind`, `Lifetime`, request and patch builders
//! - [`policy`] - `LifetimePolicy`, the default lifetime per kind
//! - [`queue`] - `NotificationQueue` for the active set and its expiry timers
//! - [`resolve`] - tracking an async operation with one notification
//! - [`global`] - process-wide accessor for code without a queue handle
//!
//! # Usage
//!
//! ```no_run
//! use toast_queue::notifications::{NotificationPatch, NotificationQueue, ResolveMessages};
//!
//! # async fn save_profile() -> Result<(), String> { Ok(()) }
//! # async fn run() -> Result<(), String> {
//! let queue = NotificationQueue::new();
//!
//! let id = queue.success("Listing published");
//! queue.update(id, NotificationPatch::new().message("Visible to investors"));
//!
//! queue
//!     .resolve(save_profile(), ResolveMessages::new("Saving", "Profile saved", "Save failed"))
//!     .await?;
//!
//! // A renderer follows the active set:
//! let mut active = queue.subscribe();
//! active.changed().await.ok();
//! for toast in active.borrow().iter() {
//!     println!("{}: {}", toast.kind(), toast.title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design Considerations
//!
//! - Lifetimes: ~3s for success, ~5s for info/warnings, ~8s for errors,
//!   pending stays until resolved
//! - Unknown or expired ids are ignored by every operation
//! - Display order is insertion order

pub mod global;
pub mod notification;
pub mod policy;
pub mod queue;
pub mod resolve;

pub use notification::{
    Action, Content, Kind, Lifetime, Notification, NotificationId, NotificationPatch,
    NotificationRequest,
};
pub use policy::LifetimePolicy;
pub use queue::{NotificationQueue, QueueBuilder};
pub use resolve::ResolveMessages;
