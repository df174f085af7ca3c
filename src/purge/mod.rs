//! Credential purge.
//!
//! Runs when the liveness tracker decides the install is fresh. Matching
//! preference keys are deleted one by one; the secure namespace is dropped
//! as a whole.
//!
//! # Components
//!
//! - [`rules`] - [`KeyMatchRule`] and [`KeyFilter`]
//! - [`purger`] - [`CredentialPurger`]
//! - [`report`] - [`PurgeReport`] and [`PurgePlan`]

pub mod purger;
pub mod report;
pub mod rules;

pub use purger::CredentialPurger;
pub use report::{PreferencePassOutcome, PurgePlan, PurgeReport, SecurePassOutcome};
pub use rules::{KeyFilter, KeyMatchRule};
