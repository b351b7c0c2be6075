use std::time::Duration as StdDuration;

use serde::Deserialize;
use time::Duration;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EstateCoreConfig {
    pub visit_config: VisitConfig,
    pub notification_config: NotificationConfig,
    pub sweep_config: SweepConfig,
    pub status_config: StatusConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisitConfig {
    /// How long a request stays decidable after submission.
    pub request_window: Duration,
    /// Validity of a minted gate credential, counted from the grant.
    pub credential_window: Duration,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationConfig {
    pub max_attempts: u32,
    pub attempt_timeout: StdDuration,
    pub retry_backoff: StdDuration,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SweepConfig {
    pub enabled: bool,
    pub interval: StdDuration,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusConfig {
    pub poll_interval: StdDuration,
}

impl EstateCoreConfig {
    /// Rejects values the services cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.sweep_config.enabled && self.sweep_config.interval.is_zero() {
            return Err("sweepConfig.interval must be greater than zero".to_string());
        }
        if self.status_config.poll_interval.is_zero() {
            return Err("statusConfig.pollInterval must be greater than zero".to_string());
        }
        if !self.visit_config.request_window.is_positive() {
            return Err("visitConfig.requestWindow must be positive".to_string());
        }
        if !self.visit_config.credential_window.is_positive() {
            return Err("visitConfig.credentialWindow must be positive".to_string());
        }

        Ok(())
    }
}

impl Default for VisitConfig {
    fn default() -> Self {
        Self {
            request_window: Duration::hours(24),
            credential_window: Duration::hours(2),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: StdDuration::from_secs(5),
            retry_backoff: StdDuration::from_millis(500),
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: StdDuration::from_secs(300),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            poll_interval: StdDuration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: EstateCoreConfig = serde_json::from_str(
            r#"{ "notificationConfig": { "maxAttempts": 5 }, "sweepConfig": { "enabled": false } }"#,
        )
        .unwrap();

        assert_eq!(config.notification_config.max_attempts, 5);
        assert_eq!(
            config.notification_config.attempt_timeout,
            StdDuration::from_secs(5)
        );
        assert!(!config.sweep_config.enabled);
        assert_eq!(config.visit_config.request_window, Duration::hours(24));
        assert_eq!(config.visit_config.credential_window, Duration::hours(2));
        assert_eq!(config.status_config.poll_interval, StdDuration::from_secs(10));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_sweep_interval_fails_validation() {
        let config: EstateCoreConfig = serde_json::from_str(
            r#"{ "sweepConfig": { "interval": { "secs": 0, "nanos": 0 } } }"#,
        )
        .unwrap();

        assert_eq!(config.sweep_config.interval, StdDuration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_interval_is_accepted_when_sweep_is_disabled() {
        let config: EstateCoreConfig = serde_json::from_str(
            r#"{ "sweepConfig": { "enabled": false, "interval": { "secs": 0, "nanos": 0 } } }"#,
        )
        .unwrap();

        assert_eq!(config.validate(), Ok(()));
    }
}
