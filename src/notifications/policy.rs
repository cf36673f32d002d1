// SPDX-License-Identifier: MPL-2.0
//! Default lifetime per notification kind.

use super::notification::{Kind, Lifetime};
use crate::config::{
    NotificationsConfig, DEFAULT_ERROR_LIFETIME_MS, DEFAULT_INFO_LIFETIME_MS,
    DEFAULT_SUCCESS_LIFETIME_MS, DEFAULT_WARNING_LIFETIME_MS, MAX_LIFETIME_MS, MIN_LIFETIME_MS,
};
use std::time::Duration;

/// Lifetime table consulted when a notification is created, or when an
/// update changes its kind without an explicit lifetime.
///
/// Pending is not configurable: it is always [`Lifetime::Unbounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifetimePolicy {
    success: Duration,
    info: Duration,
    warning: Duration,
    error: Duration,
}

impl Default for LifetimePolicy {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(DEFAULT_SUCCESS_LIFETIME_MS),
            info: Duration::from_millis(DEFAULT_INFO_LIFETIME_MS),
            warning: Duration::from_millis(DEFAULT_WARNING_LIFETIME_MS),
            error: Duration::from_millis(DEFAULT_ERROR_LIFETIME_MS),
        }
    }
}

impl LifetimePolicy {
    /// Builds a policy from config, clamping each value to the allowed range.
    #[must_use]
    pub fn from_config(config: &NotificationsConfig) -> Self {
        let pick = |value: Option<u64>, default: u64| {
            Duration::from_millis(value.unwrap_or(default).clamp(MIN_LIFETIME_MS, MAX_LIFETIME_MS))
        };
        Self {
            success: pick(config.success_ms, DEFAULT_SUCCESS_LIFETIME_MS),
            info: pick(config.info_ms, DEFAULT_INFO_LIFETIME_MS),
            warning: pick(config.warning_ms, DEFAULT_WARNING_LIFETIME_MS),
            error: pick(config.error_ms, DEFAULT_ERROR_LIFETIME_MS),
        }
    }

    #[must_use]
    pub fn with_success(mut self, duration: Duration) -> Self {
        self.success = duration;
        self
    }

    #[must_use]
    pub fn with_info(mut self, duration: Duration) -> Self {
        self.info = duration;
        self
    }

    #[must_use]
    pub fn with_warning(mut self, duration: Duration) -> Self {
        self.warning = duration;
        self
    }

    #[must_use]
    pub fn with_error(mut self, duration: Duration) -> Self {
        self.error = duration;
        self
    }

    /// Returns the default lifetime for `kind`.
    #[must_use]
    pub fn lifetime_for(&self, kind: Kind) -> Lifetime {
        match kind {
            Kind::Success => Lifetime::After(self.success),
            Kind::Info => Lifetime::After(self.info),
            Kind::Warning => Lifetime::After(self.warning),
            Kind::Error => Lifetime::After(self.error),
            Kind::Pending => Lifetime::Unbounded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_always_unbounded() {
        assert_eq!(
            LifetimePolicy::default().lifetime_for(Kind::Pending),
            Lifetime::Unbounded
        );
    }

    #[test]
    fn error_outlasts_every_other_kind() {
        let policy = LifetimePolicy::default();
        let error = policy.lifetime_for(Kind::Error).duration().unwrap();
        for kind in [Kind::Success, Kind::Info, Kind::Warning] {
            assert!(policy.lifetime_for(kind).duration().unwrap() < error);
        }
    }

    #[test]
    fn from_config_clamps_out_of_range_values() {
        let policy = LifetimePolicy::from_config(&NotificationsConfig {
            success_ms: Some(1),
            info_ms: None,
            warning_ms: Some(u64::MAX),
            error_ms: Some(10_000),
        });

        assert_eq!(
            policy.lifetime_for(Kind::Success),
            Lifetime::After(Duration::from_millis(MIN_LIFETIME_MS))
        );
        assert_eq!(
            policy.lifetime_for(Kind::Info),
            Lifetime::After(Duration::from_millis(DEFAULT_INFO_LIFETIME_MS))
        );
        assert_eq!(
            policy.lifetime_for(Kind::Warning),
            Lifetime::After(Duration::from_millis(MAX_LIFETIME_MS))
        );
        assert_eq!(
            policy.lifetime_for(Kind::Error),
            Lifetime::After(Duration::from_secs(10))
        );
    }

    #[test]
    fn default_config_matches_default_policy() {
        assert_eq!(
            LifetimePolicy::from_config(&NotificationsConfig::default()),
            LifetimePolicy::default()
        );
    }

    #[test]
    fn overrides_replace_single_kind() {
        let policy = LifetimePolicy::default().with_warning(Duration::from_secs(1));
        assert_eq!(
            policy.lifetime_for(Kind::Warning),
            Lifetime::After(Duration::from_secs(1))
        );
        assert_eq!(
            policy.lifetime_for(Kind::Success),
            LifetimePolicy::default().lifetime_for(Kind::Success)
        );
    }
}
