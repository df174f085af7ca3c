//! Mock implementations for testing.
//!
//! In-memory stores with failure injection, so the guard can be exercised
//! without touching the file system or the system keychain.
//!
//! # Available Mocks
//!
//! - [`InMemoryPreferences`] - Preference store backed by a map
//! - [`InMemorySecureStore`] - Secure store backed by nested maps

pub mod preferences;
pub mod secure_store;

pub use preferences::InMemoryPreferences;
pub use secure_store::InMemorySecureStore;
