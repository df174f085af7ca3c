//! Secure store trait abstraction.
//!
//! The secure store (keychain, keystore) is opaque to the guard. The only
//! operation it needs is dropping everything scoped to one service id.

/// Secure store operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SecureStoreError {
    /// Access to the namespace was refused (locked keychain, cancelled prompt)
    AccessDenied(String),
    /// The store could not be reached at all
    Unavailable(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for SecureStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecureStoreError::AccessDenied(msg) => {
                write!(f, "Secure store access denied: {}", msg)
            }
            SecureStoreError::Unavailable(msg) => write!(f, "Secure store unavailable: {}", msg),
            SecureStoreError::Other(msg) => write!(f, "Secure store error: {}", msg),
        }
    }
}

impl std::error::Error for SecureStoreError {}

/// Trait for the secure credential store.
///
/// Deletion is all-or-nothing per namespace; there is no selective-delete
/// contract. An already-empty namespace must return `Ok(())`.
pub trait SecureStore: Send + Sync {
    /// Delete every record scoped to `service_id`.
    fn delete_namespace(&self, service_id: &str) -> Result<(), SecureStoreError>;
}
