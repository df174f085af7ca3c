//! Reinstall guard - detects app reinstalls from launch timing and purges
//! cached credentials left behind by the previous install.
//!
//! This library exposes modules for use in integration tests and host apps.

pub mod adapters;
pub mod cli;
pub mod error;
pub mod liveness;
pub mod purge;
pub mod startup;
pub mod traits;
