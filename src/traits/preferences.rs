//! Preference store trait abstraction.
//!
//! The general preference store holds loosely-typed key/value pairs that
//! survive process restarts but not an app uninstall (UserDefaults,
//! SharedPreferences, or the JSON file adapter on desktop).

use std::collections::BTreeSet;

/// Value type held by a preference store.
pub type PreferenceValue = serde_json::Value;

/// Preference store operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceError {
    /// Failed to read from the store
    Read(String),
    /// Failed to write a key
    Write(String),
    /// Failed to delete a key
    Delete(String),
    /// The store could not be reached at all
    Unavailable(String),
    /// Stored data could not be (de)serialized
    Serialization(String),
}

impl std::fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferenceError::Read(msg) => write!(f, "Failed to read preferences: {}", msg),
            PreferenceError::Write(msg) => write!(f, "Failed to write preference: {}", msg),
            PreferenceError::Delete(msg) => write!(f, "Failed to delete preference: {}", msg),
            PreferenceError::Unavailable(msg) => {
                write!(f, "Preference store unavailable: {}", msg)
            }
            PreferenceError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for PreferenceError {}

/// Trait for the general preference store.
///
/// Implementations are shared across the tracker and the purger through an
/// `Arc`, so they must be `Send + Sync` and use interior mutability.
///
/// # Example
///
/// ```
/// use reinstall_guard::adapters::mock::InMemoryPreferences;
/// use reinstall_guard::traits::PreferenceStore;
///
/// let store = InMemoryPreferences::new();
/// store.set("theme", serde_json::json!("dark")).unwrap();
/// assert!(store.all_keys().unwrap().contains("theme"));
/// ```
pub trait PreferenceStore: Send + Sync {
    /// Read a single value.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if the key is absent
    /// - `Err(error)` if the store could not be read
    fn get(&self, key: &str) -> Result<Option<PreferenceValue>, PreferenceError>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: PreferenceValue) -> Result<(), PreferenceError>;

    /// Enumerate every key currently stored.
    fn all_keys(&self) -> Result<BTreeSet<String>, PreferenceError>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), PreferenceError>;
}
