//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use reinstall_guard::adapters::mock::{InMemoryPreferences, InMemorySecureStore};
use reinstall_guard::startup::{GuardConfig, ReinstallGuard, SecureStoreRetention};

pub const SERVICE: &str = "com.example.vela";
pub const NOW: i64 = 1_700_000_000;
pub const DAY: i64 = 24 * 60 * 60;

/// UTC instant at `secs` since epoch.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Config with platform retention pinned, so results don't depend on the
/// machine running the tests.
pub fn test_config() -> GuardConfig {
    GuardConfig::default().with_retention(SecureStoreRetention::ErasedOnUninstall)
}

/// Guard over clones of the given in-memory stores.
pub fn guard_over(prefs: &InMemoryPreferences, secure: &InMemorySecureStore) -> ReinstallGuard {
    ReinstallGuard::new(
        &test_config(),
        Arc::new(prefs.clone()),
        Arc::new(secure.clone()),
    )
}

/// Secure store holding `count` records under [`SERVICE`].
pub fn secure_with_records(count: usize) -> InMemorySecureStore {
    let secure = InMemorySecureStore::new();
    for i in 0..count {
        secure.insert(SERVICE, &format!("account-{}", i), &format!("secret-{}", i));
    }
    secure
}
