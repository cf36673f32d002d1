// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Lifetimes**: Auto-dismiss delay per notification kind
//! - **Diagnostics**: Event buffer capacity bounds

// ==========================================================================
// Lifetime Defaults
// ==========================================================================

/// Default lifetime of a success notification (in milliseconds).
pub const DEFAULT_SUCCESS_LIFETIME_MS: u64 = 3_000;

/// Default lifetime of an info notification (in milliseconds).
pub const DEFAULT_INFO_LIFETIME_MS: u64 = 5_000;

/// Default lifetime of a warning notification (in milliseconds).
pub const DEFAULT_WARNING_LIFETIME_MS: u64 = 5_000;

/// Default lifetime of an error notification (in milliseconds).
/// Errors stay longer so the detail can be read.
pub const DEFAULT_ERROR_LIFETIME_MS: u64 = 8_000;

/// Minimum configurable lifetime (in milliseconds).
pub const MIN_LIFETIME_MS: u64 = 500;

/// Maximum configurable lifetime (in milliseconds).
pub const MAX_LIFETIME_MS: u64 = 60_000;

/// Longest delay armed for an expiry timer (in milliseconds), one year.
/// Longer lifetimes, including `Duration::MAX`, are armed at this value.
pub const MAX_TIMER_MS: u64 = 365 * 24 * 60 * 60 * 1_000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Lifetime validation
    assert!(MIN_LIFETIME_MS > 0);
    assert!(MAX_LIFETIME_MS >= MIN_LIFETIME_MS);
    assert!(DEFAULT_SUCCESS_LIFETIME_MS >= MIN_LIFETIME_MS);
    assert!(DEFAULT_ERROR_LIFETIME_MS <= MAX_LIFETIME_MS);
    assert!(DEFAULT_INFO_LIFETIME_MS >= DEFAULT_SUCCESS_LIFETIME_MS);
    assert!(DEFAULT_WARNING_LIFETIME_MS >= DEFAULT_SUCCESS_LIFETIME_MS);
    assert!(DEFAULT_ERROR_LIFETIME_MS > DEFAULT_WARNING_LIFETIME_MS);
    assert!(DEFAULT_ERROR_LIFETIME_MS > DEFAULT_INFO_LIFETIME_MS);
    assert!(MAX_TIMER_MS >= MAX_LIFETIME_MS);

    // Diagnostics validation
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
