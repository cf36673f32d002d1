// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording notification activity.
//!
//! This module captures what the queue showed, changed, expired, and
//! dismissed, storing events in a memory-bounded circular buffer so a host
//! application can inspect recent user-facing feedback when an issue is
//! reported.
//!
//! # Architecture
//!
//! - [`DiagnosticsHandle`]: Cheap, cloneable, non-blocking event sender
//! - [`DiagnosticsCollector`]: Drains events into the buffer
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`BufferCapacity`]: Newtype for validated buffer capacity bounds

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
