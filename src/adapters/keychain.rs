//! macOS Keychain secure store adapter.
//!
//! Clears generic-password items through the `security` command-line
//! utility. `security delete-generic-password` removes one matching item per
//! call, so the adapter repeats the call until the keychain reports that no
//! item is left for the service.

use std::process::Command;

use tracing::debug;

use crate::traits::{SecureStore, SecureStoreError};

/// Upper bound on delete calls for one namespace.
const MAX_DELETE_ROUNDS: usize = 256;

/// Result of a single `security delete-generic-password` call.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteAttempt {
    /// One item was removed
    Deleted,
    /// No item matched the service
    NotFound,
    /// The user cancelled the Keychain prompt, or interaction is disallowed
    UserCancelled,
    /// Error running the security command
    Error(String),
}

/// Secure store backed by the login keychain.
#[derive(Debug, Clone)]
pub struct KeychainSecureStore {
    program: String,
}

impl KeychainSecureStore {
    /// Use the system `security` binary.
    pub fn new() -> Self {
        Self::with_program("security")
    }

    /// Use a different binary with the same CLI (useful for tests).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn delete_one(&self, service_id: &str) -> DeleteAttempt {
        let output = Command::new(&self.program)
            .args(["delete-generic-password", "-s", service_id])
            .output();

        match output {
            Ok(out) if out.status.success() => DeleteAttempt::Deleted,
            Ok(out) => classify_security_stderr(&String::from_utf8_lossy(&out.stderr)),
            Err(e) => DeleteAttempt::Error(format!("Failed to run security command: {}", e)),
        }
    }
}

impl Default for KeychainSecureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureStore for KeychainSecureStore {
    fn delete_namespace(&self, service_id: &str) -> Result<(), SecureStoreError> {
        for round in 0..MAX_DELETE_ROUNDS {
            match self.delete_one(service_id) {
                DeleteAttempt::Deleted => continue,
                DeleteAttempt::NotFound => {
                    debug!(service_id, deleted = round, "Keychain namespace cleared");
                    return Ok(());
                }
                DeleteAttempt::UserCancelled => {
                    return Err(SecureStoreError::AccessDenied(
                        "Keychain access was cancelled".to_string(),
                    ));
                }
                DeleteAttempt::Error(msg) => return Err(SecureStoreError::Unavailable(msg)),
            }
        }

        Err(SecureStoreError::Other(format!(
            "Keychain still reports items for {} after {} deletions",
            service_id, MAX_DELETE_ROUNDS
        )))
    }
}

/// Map the stderr of a failed `security` call to a [`DeleteAttempt`].
pub fn classify_security_stderr(stderr: &str) -> DeleteAttempt {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("could not be found") {
        DeleteAttempt::NotFound
    } else if stderr_lower.contains("user interaction is not allowed")
        || stderr_lower.contains("authorization cancelled")
        || stderr_lower.contains("user canceled")
    {
        DeleteAttempt::UserCancelled
    } else if stderr.trim().is_empty() {
        // Non-zero exit with no message; the tool does this when nothing matched
        DeleteAttempt::NotFound
    } else {
        DeleteAttempt::Error(stderr.trim().to_string())
    }
}
