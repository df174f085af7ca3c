//! Concrete implementations of the storage traits.
//!
//! # Adapters
//!
//! - [`FilePreferenceStore`] - JSON file preference store
//! - [`FileSecureStore`] - One JSON file per secure namespace
//! - [`KeychainSecureStore`] - macOS login keychain via the `security` tool
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides in-memory doubles:
//! - [`mock::InMemoryPreferences`]
//! - [`mock::InMemorySecureStore`]

pub mod file_preferences;
pub mod file_secure_store;
pub mod keychain;
pub mod mock;

pub use file_preferences::FilePreferenceStore;
pub use file_secure_store::FileSecureStore;
pub use keychain::KeychainSecureStore;
pub use mock::{InMemoryPreferences, InMemorySecureStore};
