//! Launch tracking and the fresh-install decision.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::mark::LaunchMark;
use super::{DEFAULT_LAUNCH_KEY, DEFAULT_STALENESS_THRESHOLD};
use crate::error::{GuardError, GuardResult};
use crate::traits::PreferenceStore;

/// Outcome of evaluating the launch mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalenessVerdict {
    /// The mark is older than the threshold; treat this as a reinstall
    Fresh,
    /// First launch, or the install has been running recently
    Continuing,
}

impl StalenessVerdict {
    /// True for [`StalenessVerdict::Fresh`].
    pub fn is_fresh(&self) -> bool {
        matches!(self, StalenessVerdict::Fresh)
    }
}

/// Reads and advances the launch mark.
pub struct LivenessTracker {
    store: Arc<dyn PreferenceStore>,
    launch_key: String,
    threshold: Duration,
}

impl LivenessTracker {
    /// Create a tracker with the default key and a 7 day threshold.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            launch_key: DEFAULT_LAUNCH_KEY.to_string(),
            threshold: DEFAULT_STALENESS_THRESHOLD,
        }
    }

    /// Set the staleness threshold.
    pub fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the preference key holding the mark.
    pub fn with_launch_key(mut self, key: impl Into<String>) -> Self {
        self.launch_key = key.into();
        self
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn launch_key(&self) -> &str {
        &self.launch_key
    }

    /// Read the stored mark.
    ///
    /// A stored value that isn't a number is reported as no mark.
    pub fn last_launch(&self) -> GuardResult<Option<LaunchMark>> {
        let value = self
            .store
            .get(&self.launch_key)
            .map_err(GuardError::StoreRead)?;

        Ok(value.and_then(|value| {
            let mark = LaunchMark::from_value(&value);
            if mark.is_none() {
                warn!(key = %self.launch_key, %value, "Ignoring malformed launch mark");
            }
            mark
        }))
    }

    /// Decide whether this start looks like a reinstall.
    ///
    /// Read failures fail open to [`StalenessVerdict::Continuing`].
    pub fn evaluate(&self, now: DateTime<Utc>) -> StalenessVerdict {
        let mark = match self.last_launch() {
            Ok(mark) => mark,
            Err(e) => {
                warn!(error = %e, "Launch mark unreadable, treating as first launch");
                None
            }
        };
        self.verdict_for(mark, now)
    }

    /// The decision for an already-loaded mark.
    pub fn verdict_for(&self, mark: Option<LaunchMark>, now: DateTime<Utc>) -> StalenessVerdict {
        let Some(mark) = mark else {
            debug!("No launch mark, first launch");
            return StalenessVerdict::Continuing;
        };

        let elapsed = mark.elapsed_secs(now);
        if elapsed > self.threshold.as_secs_f64() {
            info!(
                elapsed_secs = elapsed,
                threshold_secs = self.threshold.as_secs(),
                "Launch mark is stale, treating as fresh install"
            );
            StalenessVerdict::Fresh
        } else {
            debug!(elapsed_secs = elapsed, "Launch mark is recent");
            StalenessVerdict::Continuing
        }
    }

    /// Overwrite the mark with `now`.
    pub fn record_launch(&self, now: DateTime<Utc>) -> GuardResult<()> {
        let mark = LaunchMark::at(now);
        self.store
            .set(&self.launch_key, mark.to_value())
            .map_err(GuardError::StoreWrite)?;
        debug!(epoch_seconds = mark.epoch_seconds, "Recorded launch mark");
        Ok(())
    }
}
