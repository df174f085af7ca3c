//! In-memory secure store for testing.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::traits::{SecureStore, SecureStoreError};

/// In-memory secure store keyed by service id, then by account.
///
/// Record payloads are plain strings; the guard never looks inside them.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecureStore {
    namespaces: Arc<Mutex<BTreeMap<String, BTreeMap<String, String>>>>,
    delete_should_fail: Arc<Mutex<bool>>,
    delete_calls: Arc<Mutex<Vec<String>>>,
}

impl InMemorySecureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under `service_id` / `account`.
    pub fn insert(&self, service_id: &str, account: &str, secret: &str) {
        self.namespaces
            .lock()
            .unwrap()
            .entry(service_id.to_string())
            .or_default()
            .insert(account.to_string(), secret.to_string());
    }

    /// Number of records in a namespace.
    pub fn len(&self, service_id: &str) -> usize {
        self.namespaces
            .lock()
            .unwrap()
            .get(service_id)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }

    /// True when the namespace holds no records.
    pub fn is_empty(&self, service_id: &str) -> bool {
        self.len(service_id) == 0
    }

    /// Simulate an unreachable keychain.
    pub fn set_delete_should_fail(&self, should_fail: bool) {
        *self.delete_should_fail.lock().unwrap() = should_fail;
    }

    /// Service ids passed to `delete_namespace`, in call order.
    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }
}

impl SecureStore for InMemorySecureStore {
    fn delete_namespace(&self, service_id: &str) -> Result<(), SecureStoreError> {
        self.delete_calls.lock().unwrap().push(service_id.to_string());

        if *self.delete_should_fail.lock().unwrap() {
            return Err(SecureStoreError::Unavailable(
                "Mock keychain unavailable".to_string(),
            ));
        }

        self.namespaces.lock().unwrap().remove(service_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_namespace_only_touches_that_service() {
        let store = InMemorySecureStore::new();
        store.insert("com.example.vela", "access", "a");
        store.insert("com.example.vela", "refresh", "r");
        store.insert("com.other", "access", "x");

        store.delete_namespace("com.example.vela").unwrap();

        assert!(store.is_empty("com.example.vela"));
        assert_eq!(store.len("com.other"), 1);
    }

    #[test]
    fn test_delete_empty_namespace_is_ok() {
        let store = InMemorySecureStore::new();
        assert!(store.delete_namespace("missing").is_ok());
    }

    #[test]
    fn test_delete_failure_keeps_records() {
        let store = InMemorySecureStore::new();
        store.insert("svc", "a", "1");
        store.set_delete_should_fail(true);

        assert!(matches!(
            store.delete_namespace("svc"),
            Err(SecureStoreError::Unavailable(_))
        ));
        assert_eq!(store.len("svc"), 1);
        assert_eq!(store.delete_calls(), vec!["svc".to_string()]);
    }
}
