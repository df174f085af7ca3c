//! Purge results handed back to the caller for logging.

use serde::Serialize;

/// What the preference-store pass did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreferencePassOutcome {
    /// Keys that were deleted, in sorted order
    pub deleted: Vec<String>,
    /// Keys whose deletion failed, with the error message
    pub failed: Vec<(String, String)>,
    /// Set when the keys could not be enumerated at all
    pub enumeration_error: Option<String>,
}

impl PreferencePassOutcome {
    /// True when every matching key was deleted.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.enumeration_error.is_none()
    }
}

/// What the secure-store pass did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum SecurePassOutcome {
    /// The namespace is empty now
    Cleared,
    /// The namespace could not be deleted
    Failed(String),
}

impl SecurePassOutcome {
    pub fn is_cleared(&self) -> bool {
        matches!(self, SecurePassOutcome::Cleared)
    }
}

/// Combined result of both purge passes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurgeReport {
    pub preferences: PreferencePassOutcome,
    pub secure_store: SecurePassOutcome,
}

impl PurgeReport {
    /// True when both passes succeeded in full.
    pub fn is_complete(&self) -> bool {
        self.preferences.is_complete() && self.secure_store.is_cleared()
    }
}

/// Keys the preference pass would delete, computed without deleting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PurgePlan {
    pub preference_keys: Vec<String>,
    /// Secure namespace that would be cleared
    pub service_id: String,
}
