//! Startup hook for reinstall detection.
//!
//! The host calls [`ReinstallGuard::run`] once, early in startup and before
//! any feature module reads credentials. The call never fails; everything
//! that went wrong is listed in the returned [`StartupOutcome`].
//!
//! # Components
//!
//! - [`config`] - [`GuardConfig`] and platform retention
//! - [`guard`] - [`ReinstallGuard`] orchestration
//!
//! # Usage
//!
//! ```no_run
//! use reinstall_guard::startup::{GuardConfig, ReinstallGuard};
//!
//! let guard = ReinstallGuard::with_platform_stores(&GuardConfig::from_env());
//! let outcome = guard.run(chrono::Utc::now());
//! if outcome.purged() {
//!     println!("cleared stale credentials");
//! }
//! ```

pub mod config;
pub mod guard;

pub use config::{GuardConfig, SecureStoreRetention, DEFAULT_SERVICE_ID};
pub use guard::{GuardStatus, ReinstallGuard, StartupOutcome};
