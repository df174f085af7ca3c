//! Trait abstractions for the two storage collaborators.
//!
//! The tracker and the purger never reach for a global store. Both are
//! constructed with these traits so tests can swap in in-memory fakes.
//!
//! # Traits
//!
//! - [`PreferenceStore`] - General key/value preference storage
//! - [`SecureStore`] - Keychain-like storage, cleared per service namespace

pub mod preferences;
pub mod secure_store;

pub use preferences::{PreferenceError, PreferenceStore, PreferenceValue};
pub use secure_store::{SecureStore, SecureStoreError};
