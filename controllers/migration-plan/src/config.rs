//! Controller configuration.
//!
//! All settings come from environment variables; the controller has no
//! command line surface.

use crate::error::ControllerError;
use cluster_client::DEFAULT_FIELD_MANAGER;
use std::time::Duration;

const DEFAULT_RESYNC_INTERVAL_SECS: u64 = 300;
const DEFAULT_PASS_TIMEOUT_SECS: u64 = 60;
const DEFAULT_BACKOFF_MIN_SECS: u64 = 5;
const DEFAULT_BACKOFF_MAX_SECS: u64 = 300;

/// Runtime settings for the MigrationPlan Controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Namespace whose plans are watched; `None` watches all namespaces
    pub watch_namespace: Option<String>,
    /// Requeue delay after a successful pass
    pub resync_interval: Duration,
    /// Deadline for a single pass
    pub pass_timeout: Duration,
    /// Server-side-apply field manager for the output ConfigMap
    pub field_manager: String,
    /// Fibonacci error backoff bounds, in seconds
    pub backoff_min_secs: u64,
    pub backoff_max_secs: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            watch_namespace: None,
            resync_interval: Duration::from_secs(DEFAULT_RESYNC_INTERVAL_SECS),
            pass_timeout: Duration::from_secs(DEFAULT_PASS_TIMEOUT_SECS),
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            backoff_min_secs: DEFAULT_BACKOFF_MIN_SECS,
            backoff_max_secs: DEFAULT_BACKOFF_MAX_SECS,
        }
    }
}

impl ControllerConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let seconds = |key: &str, default: u64| -> Result<u64, ControllerError> {
            match lookup(key) {
                None => Ok(default),
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    ControllerError::InvalidConfig(format!("{key} must be a whole number of seconds, got {raw:?}"))
                }),
            }
        };

        let resync = seconds("RESYNC_INTERVAL_SECS", DEFAULT_RESYNC_INTERVAL_SECS)?;
        let timeout = seconds("PASS_TIMEOUT_SECS", DEFAULT_PASS_TIMEOUT_SECS)?;
        let backoff_min_secs = seconds("ERROR_BACKOFF_MIN_SECS", DEFAULT_BACKOFF_MIN_SECS)?;
        let backoff_max_secs = seconds("ERROR_BACKOFF_MAX_SECS", DEFAULT_BACKOFF_MAX_SECS)?;

        if timeout == 0 {
            return Err(ControllerError::InvalidConfig("PASS_TIMEOUT_SECS must be greater than zero".to_string()));
        }
        if backoff_min_secs == 0 || backoff_min_secs > backoff_max_secs {
            return Err(ControllerError::InvalidConfig(format!(
                "error backoff bounds are invalid: min {backoff_min_secs}s, max {backoff_max_secs}s"
            )));
        }

        Ok(Self {
            watch_namespace: lookup("WATCH_NAMESPACE").filter(|ns| !ns.trim().is_empty()),
            resync_interval: Duration::from_secs(resync),
            pass_timeout: Duration::from_secs(timeout),
            field_manager: lookup("FIELD_MANAGER")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.field_manager),
            backoff_min_secs,
            backoff_max_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ControllerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ControllerConfig::default());
        assert_eq!(config.field_manager, "migration-plan-controller");
    }

    #[test]
    fn test_reads_overrides() {
        let config = ControllerConfig::from_lookup(lookup(&[
            ("WATCH_NAMESPACE", "migrations"),
            ("RESYNC_INTERVAL_SECS", "30"),
            ("PASS_TIMEOUT_SECS", "10"),
            ("FIELD_MANAGER", "custom"),
        ]))
        .unwrap();
        assert_eq!(config.watch_namespace.as_deref(), Some("migrations"));
        assert_eq!(config.resync_interval, Duration::from_secs(30));
        assert_eq!(config.pass_timeout, Duration::from_secs(10));
        assert_eq!(config.field_manager, "custom");
    }

    #[test]
    fn test_rejects_non_numeric_interval() {
        let result = ControllerConfig::from_lookup(lookup(&[("RESYNC_INTERVAL_SECS", "soon")]));
        assert!(matches!(result, Err(ControllerError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_inverted_backoff_bounds() {
        let result = ControllerConfig::from_lookup(lookup(&[
            ("ERROR_BACKOFF_MIN_SECS", "60"),
            ("ERROR_BACKOFF_MAX_SECS", "10"),
        ]));
        assert!(matches!(result, Err(ControllerError::InvalidConfig(_))));
    }
}
