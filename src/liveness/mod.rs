//! Install liveness tracking.
//!
//! A single timestamp in the preference store records the last process
//! start. Preference stores survive restarts but not an uninstall, so a mark
//! that exists yet is older than the threshold means the app was most
//! likely removed and installed again with its keychain items left behind.
//!
//! # Components
//!
//! - [`mark`] - The persisted [`LaunchMark`]
//! - [`tracker`] - [`LivenessTracker`] and its [`StalenessVerdict`]

pub mod mark;
pub mod tracker;

use std::time::Duration;

pub use mark::LaunchMark;
pub use tracker::{LivenessTracker, StalenessVerdict};

/// Preference key holding the launch mark.
pub const DEFAULT_LAUNCH_KEY: &str = "last_app_launch";

/// Marks older than this are treated as a reinstall.
pub const DEFAULT_STALENESS_THRESHOLD: Duration = Duration::from_secs(7 * 24 * 60 * 60);
