//! In-memory preference store for testing.
//!
//! Stores values in a shared map, so tests can seed a store, hand a clone to
//! the guard, and inspect the result afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use crate::traits::{PreferenceError, PreferenceStore, PreferenceValue};

/// In-memory preference store for testing.
///
/// # Example
///
/// ```
/// use reinstall_guard::adapters::mock::InMemoryPreferences;
/// use reinstall_guard::traits::PreferenceStore;
///
/// let store = InMemoryPreferences::with_entries([("flutter.x", serde_json::json!(1))]);
/// store.delete("flutter.x").unwrap();
/// assert!(store.snapshot().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferences {
    entries: Arc<Mutex<BTreeMap<String, PreferenceValue>>>,
    read_should_fail: Arc<Mutex<bool>>,
    write_should_fail: Arc<Mutex<bool>>,
    /// Keys whose deletion is rejected
    undeletable: Arc<Mutex<BTreeSet<String>>>,
}

impl InMemoryPreferences {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with entries.
    pub fn with_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PreferenceValue)>,
    {
        let store = Self::new();
        {
            let mut map = store.entries.lock().unwrap();
            for (key, value) in entries {
                map.insert(key.into(), value);
            }
        }
        store
    }

    /// Make `get` and `all_keys` fail, simulating an unreachable store.
    pub fn set_read_should_fail(&self, should_fail: bool) {
        *self.read_should_fail.lock().unwrap() = should_fail;
    }

    /// Make `set` fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Make `delete` fail for a single key.
    pub fn reject_delete_of(&self, key: &str) {
        self.undeletable.lock().unwrap().insert(key.to_string());
    }

    /// Copy of the current contents (for test assertions).
    pub fn snapshot(&self) -> BTreeMap<String, PreferenceValue> {
        self.entries.lock().unwrap().clone()
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<PreferenceValue>, PreferenceError> {
        if *self.read_should_fail.lock().unwrap() {
            return Err(PreferenceError::Unavailable("Mock read failure".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: PreferenceValue) -> Result<(), PreferenceError> {
        if *self.write_should_fail.lock().unwrap() {
            return Err(PreferenceError::Write("Mock write failure".to_string()));
        }
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn all_keys(&self) -> Result<BTreeSet<String>, PreferenceError> {
        if *self.read_should_fail.lock().unwrap() {
            return Err(PreferenceError::Unavailable("Mock read failure".to_string()));
        }
        Ok(self.entries.lock().unwrap().keys().cloned().collect())
    }

    fn delete(&self, key: &str) -> Result<(), PreferenceError> {
        if self.undeletable.lock().unwrap().contains(key) {
            return Err(PreferenceError::Delete(format!("Mock delete failure for {}", key)));
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
