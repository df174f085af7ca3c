//! Error types for the reinstall guard.
//!
//! None of these ever reach the host. The guard logs them and degrades to
//! the harmless choice: no purge when the mark can't be read, a stale mark
//! when it can't be written, and a partial purge when one store fails.

use thiserror::Error;

use crate::traits::{PreferenceError, SecureStoreError};

/// Which collaborator an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// General preference store
    Preferences,
    /// Keychain-like secure store
    Secure,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Preferences => write!(f, "preference store"),
            StoreKind::Secure => write!(f, "secure store"),
        }
    }
}

/// Errors raised inside the guard.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GuardError {
    /// The launch mark could not be read
    #[error("Failed to read launch mark: {0}")]
    StoreRead(#[source] PreferenceError),

    /// The launch mark could not be written
    #[error("Failed to record launch mark: {0}")]
    StoreWrite(#[source] PreferenceError),

    /// A purge pass against one store failed
    #[error("Purge of {store} failed: {message}")]
    PurgeStore { store: StoreKind, message: String },
}

impl GuardError {
    /// The store the error came from.
    pub fn store(&self) -> StoreKind {
        match self {
            GuardError::StoreRead(_) | GuardError::StoreWrite(_) => StoreKind::Preferences,
            GuardError::PurgeStore { store, .. } => *store,
        }
    }
}

impl From<SecureStoreError> for GuardError {
    fn from(err: SecureStoreError) -> Self {
        GuardError::PurgeStore {
            store: StoreKind::Secure,
            message: err.to_string(),
        }
    }
}

/// Result alias for guard operations.
pub type GuardResult<T> = Result<T, GuardError>;
