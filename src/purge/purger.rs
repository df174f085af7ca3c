//! Credential purge across the preference store and the secure store.

use std::sync::Arc;

use tracing::{info, warn};

use super::report::{PreferencePassOutcome, PurgePlan, PurgeReport, SecurePassOutcome};
use super::rules::KeyFilter;
use crate::error::{GuardError, StoreKind};
use crate::traits::{PreferenceStore, SecureStore};

/// Deletes cached credentials from both stores.
///
/// Both passes always run, preference store first. Failures are collected
/// into the [`PurgeReport`]; nothing is returned as an error.
pub struct CredentialPurger {
    preferences: Arc<dyn PreferenceStore>,
    secure: Arc<dyn SecureStore>,
    service_id: String,
    filter: KeyFilter,
}

impl CredentialPurger {
    /// Create a purger using the default key filter.
    pub fn new(
        preferences: Arc<dyn PreferenceStore>,
        secure: Arc<dyn SecureStore>,
        service_id: impl Into<String>,
    ) -> Self {
        Self {
            preferences,
            secure,
            service_id: service_id.into(),
            filter: KeyFilter::default(),
        }
    }

    /// Replace the key filter.
    pub fn with_filter(mut self, filter: KeyFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn filter(&self) -> &KeyFilter {
        &self.filter
    }

    /// Keys that [`purge_all`](Self::purge_all) would delete right now.
    pub fn plan(&self) -> Result<PurgePlan, GuardError> {
        let keys = self
            .preferences
            .all_keys()
            .map_err(|e| GuardError::PurgeStore {
                store: StoreKind::Preferences,
                message: e.to_string(),
            })?;

        Ok(PurgePlan {
            preference_keys: self.filter.select(&keys),
            service_id: self.service_id.clone(),
        })
    }

    /// Run both passes and report what happened.
    pub fn purge_all(&self) -> PurgeReport {
        let preferences = self.purge_preferences();
        let secure_store = self.purge_secure_store();

        let report = PurgeReport {
            preferences,
            secure_store,
        };
        info!(
            deleted_keys = report.preferences.deleted.len(),
            failed_keys = report.preferences.failed.len(),
            secure_cleared = report.secure_store.is_cleared(),
            "Credential purge finished"
        );
        report
    }

    fn purge_preferences(&self) -> PreferencePassOutcome {
        let mut outcome = PreferencePassOutcome::default();

        let keys = match self.preferences.all_keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Could not enumerate preference keys, skipping preference purge");
                outcome.enumeration_error = Some(e.to_string());
                return outcome;
            }
        };

        for key in self.filter.select(&keys) {
            match self.preferences.delete(&key) {
                Ok(()) => outcome.deleted.push(key),
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to delete preference");
                    outcome.failed.push((key, e.to_string()));
                }
            }
        }

        outcome
    }

    fn purge_secure_store(&self) -> SecurePassOutcome {
        match self.secure.delete_namespace(&self.service_id) {
            Ok(()) => SecurePassOutcome::Cleared,
            Err(e) => {
                let err = GuardError::from(e);
                warn!(service_id = %self.service_id, error = %err, "Secure store purge failed");
                SecurePassOutcome::Failed(err.to_string())
            }
        }
    }
}
