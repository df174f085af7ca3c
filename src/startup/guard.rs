//! The startup hook: evaluate, purge if stale, record the launch.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::config::{GuardConfig, SecureStoreRetention};
use crate::adapters::{FilePreferenceStore, FileSecureStore, KeychainSecureStore};
use crate::error::GuardError;
use crate::liveness::{LaunchMark, LivenessTracker, StalenessVerdict};
use crate::purge::{CredentialPurger, PurgePlan, PurgeReport};
use crate::traits::{PreferenceStore, SecureStore};

/// Held across read-evaluate-purge-write so concurrent entry points can't
/// both read the old mark and lose a reinstall detection.
static LAUNCH_LOCK: Mutex<()> = Mutex::new(());

/// What happened during one guarded startup.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupOutcome {
    pub verdict: StalenessVerdict,
    /// Present only when the verdict was `Fresh`
    pub purge: Option<PurgeReport>,
    /// Whether the new launch mark was persisted
    pub mark_recorded: bool,
    /// False when the secure store survives uninstall on this platform
    pub detection_sound: bool,
    /// Every non-fatal error hit along the way
    pub errors: Vec<GuardError>,
}

impl StartupOutcome {
    pub fn purged(&self) -> bool {
        self.purge.is_some()
    }
}

/// Read-only view of the guard state, for diagnostics and dry runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuardStatus {
    pub last_launch: Option<DateTime<Utc>>,
    pub elapsed_secs: Option<f64>,
    pub threshold_secs: u64,
    pub would_purge: bool,
    pub plan: Option<PurgePlan>,
    pub detection_sound: bool,
}

/// Runs the reinstall check once per process start.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use reinstall_guard::adapters::mock::{InMemoryPreferences, InMemorySecureStore};
/// use reinstall_guard::liveness::StalenessVerdict;
/// use reinstall_guard::startup::{GuardConfig, ReinstallGuard};
///
/// let guard = ReinstallGuard::new(
///     &GuardConfig::default(),
///     Arc::new(InMemoryPreferences::new()),
///     Arc::new(InMemorySecureStore::new()),
/// );
/// let outcome = guard.run(chrono::Utc::now());
/// assert_eq!(outcome.verdict, StalenessVerdict::Continuing);
/// assert!(outcome.mark_recorded);
/// ```
pub struct ReinstallGuard {
    tracker: LivenessTracker,
    purger: CredentialPurger,
    retention: SecureStoreRetention,
}

impl ReinstallGuard {
    /// Build a guard over injected stores.
    pub fn new(
        config: &GuardConfig,
        preferences: Arc<dyn PreferenceStore>,
        secure: Arc<dyn SecureStore>,
    ) -> Self {
        let tracker = LivenessTracker::new(Arc::clone(&preferences))
            .with_threshold(config.threshold)
            .with_launch_key(config.launch_key.clone());
        let purger = CredentialPurger::new(preferences, secure, config.service_id.clone())
            .with_filter(config.filter.clone());

        Self {
            tracker,
            purger,
            retention: config.retention,
        }
    }

    /// Build a guard over the platform stores: a JSON preference file under
    /// the data directory, and the login keychain on macOS or a file-backed
    /// secure store elsewhere.
    pub fn with_platform_stores(config: &GuardConfig) -> Self {
        let data_dir = config.resolved_data_dir();
        let preferences: Arc<dyn PreferenceStore> = Arc::new(FilePreferenceStore::new(&data_dir));
        let secure: Arc<dyn SecureStore> = if cfg!(target_os = "macos") {
            Arc::new(KeychainSecureStore::new())
        } else {
            Arc::new(FileSecureStore::new(&data_dir))
        };
        Self::new(config, preferences, secure)
    }

    pub fn tracker(&self) -> &LivenessTracker {
        &self.tracker
    }

    pub fn purger(&self) -> &CredentialPurger {
        &self.purger
    }

    fn detection_sound(&self) -> bool {
        self.retention == SecureStoreRetention::ErasedOnUninstall
    }

    /// Evaluate, purge when stale, then record `now` as the launch mark.
    ///
    /// Never fails and never panics on store errors.
    pub fn run(&self, now: DateTime<Utc>) -> StartupOutcome {
        let _lock = LAUNCH_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut errors = Vec::new();
        let detection_sound = self.detection_sound();
        if !detection_sound {
            warn!(
                "Secure store survives uninstall on this platform; reinstall detection is unsound"
            );
        }

        let mark = match self.tracker.last_launch() {
            Ok(mark) => mark,
            Err(e) => {
                warn!(error = %e, "Launch mark unreadable, treating as first launch");
                errors.push(e);
                None
            }
        };
        let verdict = self.tracker.verdict_for(mark, now);

        let purge = if verdict.is_fresh() {
            info!("Fresh install detected, clearing cached credentials");
            let report = self.purger.purge_all();
            collect_purge_errors(&report, &mut errors);
            Some(report)
        } else {
            None
        };

        let mark_recorded = match self.tracker.record_launch(now) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to record launch mark");
                errors.push(e);
                false
            }
        };

        StartupOutcome {
            verdict,
            purge,
            mark_recorded,
            detection_sound,
            errors,
        }
    }

    /// Report what [`run`](Self::run) would do at `now` without writing.
    pub fn status(&self, now: DateTime<Utc>) -> Result<GuardStatus, GuardError> {
        let mark: Option<LaunchMark> = self.tracker.last_launch()?;
        let verdict = self.tracker.verdict_for(mark, now);
        let plan = if verdict.is_fresh() {
            Some(self.purger.plan()?)
        } else {
            None
        };

        Ok(GuardStatus {
            last_launch: mark.and_then(|m| m.as_datetime()),
            elapsed_secs: mark.map(|m| m.elapsed_secs(now)),
            threshold_secs: self.tracker.threshold().as_secs(),
            would_purge: verdict.is_fresh(),
            plan,
            detection_sound: self.detection_sound(),
        })
    }
}

fn collect_purge_errors(report: &PurgeReport, errors: &mut Vec<GuardError>) {
    use crate::error::StoreKind;
    use crate::purge::SecurePassOutcome;

    if let Some(message) = &report.preferences.enumeration_error {
        errors.push(GuardError::PurgeStore {
            store: StoreKind::Preferences,
            message: message.clone(),
        });
    }
    for (key, message) in &report.preferences.failed {
        errors.push(GuardError::PurgeStore {
            store: StoreKind::Preferences,
            message: format!("{}: {}", key, message),
        });
    }
    if let SecurePassOutcome::Failed(message) = &report.secure_store {
        errors.push(GuardError::PurgeStore {
            store: StoreKind::Secure,
            message: message.clone(),
        });
    }
}
