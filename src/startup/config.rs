//! Guard configuration.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::liveness::{DEFAULT_LAUNCH_KEY, DEFAULT_STALENESS_THRESHOLD};
use crate::purge::KeyFilter;

/// Default secure namespace (the app's bundle identifier).
pub const DEFAULT_SERVICE_ID: &str = "com.example.vela";

/// Env var overriding the staleness threshold, in seconds.
pub const ENV_THRESHOLD_SECS: &str = "REINSTALL_GUARD_THRESHOLD_SECS";
/// Env var overriding the secure namespace.
pub const ENV_SERVICE_ID: &str = "REINSTALL_GUARD_SERVICE_ID";
/// Env var overriding the data directory used by the file stores.
pub const ENV_DATA_DIR: &str = "REINSTALL_GUARD_DATA_DIR";

const DATA_DIR_NAME: &str = "reinstall-guard";

/// Whether the secure store is wiped together with the app.
///
/// Detection assumes both stores share the preference store's lifetime:
/// they survive restarts and vanish on uninstall. A secure store that
/// outlives the app (the Apple keychain) breaks that assumption, and the
/// guard reports its verdicts as unsound there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureStoreRetention {
    /// Secure records are erased on uninstall, same as preferences
    ErasedOnUninstall,
    /// Secure records outlive an uninstall
    SurvivesUninstall,
}

impl SecureStoreRetention {
    /// The retention of the platform's native secure store.
    pub fn for_current_platform() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            SecureStoreRetention::SurvivesUninstall
        } else {
            SecureStoreRetention::ErasedOnUninstall
        }
    }
}

/// Configuration for the reinstall guard.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use reinstall_guard::startup::GuardConfig;
///
/// let config = GuardConfig::default()
///     .with_threshold(Duration::from_secs(3 * 24 * 60 * 60))
///     .with_service_id("com.example.app");
/// assert_eq!(config.service_id, "com.example.app");
/// ```
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Marks older than this trigger a purge (default: 7 days)
    pub threshold: Duration,
    /// Preference key holding the launch mark
    pub launch_key: String,
    /// Secure namespace cleared on purge
    pub service_id: String,
    /// Which preference keys count as credentials
    pub filter: KeyFilter,
    /// Uninstall behavior of the secure store
    pub retention: SecureStoreRetention,
    /// Directory for the file-backed stores (default: platform data dir)
    pub data_dir: Option<PathBuf>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_STALENESS_THRESHOLD,
            launch_key: DEFAULT_LAUNCH_KEY.to_string(),
            service_id: DEFAULT_SERVICE_ID.to_string(),
            filter: KeyFilter::default(),
            retention: SecureStoreRetention::for_current_platform(),
            data_dir: None,
        }
    }
}

impl GuardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_launch_key(mut self, key: impl Into<String>) -> Self {
        self.launch_key = key.into();
        self
    }

    pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = service_id.into();
        self
    }

    pub fn with_filter(mut self, filter: KeyFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_retention(mut self, retention: SecureStoreRetention) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Defaults overridden by `REINSTALL_GUARD_*` environment variables.
    ///
    /// Invalid values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ENV_THRESHOLD_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.threshold = Duration::from_secs(secs),
                _ => warn!(value = %raw, "Ignoring invalid {}", ENV_THRESHOLD_SECS),
            }
        }

        if let Ok(service_id) = std::env::var(ENV_SERVICE_ID) {
            if service_id.trim().is_empty() {
                warn!("Ignoring empty {}", ENV_SERVICE_ID);
            } else {
                config.service_id = service_id.trim().to_string();
            }
        }

        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            if !dir.trim().is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        config
    }

    /// Directory for the file stores.
    ///
    /// Falls back to `./.reinstall-guard` when the platform has no data dir.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join(DATA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(format!(".{}", DATA_DIR_NAME)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(ENV_THRESHOLD_SECS);
        std::env::remove_var(ENV_SERVICE_ID);
        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn test_defaults() {
        let config = GuardConfig::default();
        assert_eq!(config.threshold, Duration::from_secs(604_800));
        assert_eq!(config.launch_key, "last_app_launch");
        assert_eq!(config.service_id, "com.example.vela");
        assert_eq!(config.filter, KeyFilter::default());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_builder() {
        let config = GuardConfig::new()
            .with_threshold(Duration::from_secs(60))
            .with_launch_key("mark")
            .with_service_id("svc")
            .with_retention(SecureStoreRetention::SurvivesUninstall)
            .with_data_dir("/tmp/guard");

        assert_eq!(config.threshold, Duration::from_secs(60));
        assert_eq!(config.launch_key, "mark");
        assert_eq!(config.service_id, "svc");
        assert_eq!(config.retention, SecureStoreRetention::SurvivesUninstall);
        assert_eq!(config.resolved_data_dir(), PathBuf::from("/tmp/guard"));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var(ENV_THRESHOLD_SECS, "3600");
        std::env::set_var(ENV_SERVICE_ID, " com.example.app ");
        std::env::set_var(ENV_DATA_DIR, "/tmp/guard-env");

        let config = GuardConfig::from_env();
        clear_env();

        assert_eq!(config.threshold, Duration::from_secs(3600));
        assert_eq!(config.service_id, "com.example.app");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/guard-env")));
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_invalid_values() {
        clear_env();
        std::env::set_var(ENV_THRESHOLD_SECS, "a week");
        std::env::set_var(ENV_SERVICE_ID, "   ");

        let config = GuardConfig::from_env();
        clear_env();

        assert_eq!(config.threshold, DEFAULT_STALENESS_THRESHOLD);
        assert_eq!(config.service_id, DEFAULT_SERVICE_ID);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_zero_threshold() {
        clear_env();
        std::env::set_var(ENV_THRESHOLD_SECS, "0");
        let config = GuardConfig::from_env();
        clear_env();
        assert_eq!(config.threshold, DEFAULT_STALENESS_THRESHOLD);
    }

    #[test]
    fn test_resolved_data_dir_default_ends_with_app_name() {
        let dir = GuardConfig::default().resolved_data_dir();
        assert!(dir.ends_with("reinstall-guard") || dir.ends_with(".reinstall-guard"));
    }
}
