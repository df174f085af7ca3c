//! File-based preference store adapter.
//!
//! Preferences live in a single JSON object at `<data_dir>/preferences.json`.
//! Every write rewrites the whole file, which is fine for the handful of
//! keys a preference store holds. Writes go to a sibling temp file that is
//! then renamed over the target, so a crash mid-write leaves the previous
//! contents intact.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::traits::{PreferenceError, PreferenceStore, PreferenceValue};

/// The preferences file name.
const PREFERENCES_FILE: &str = "preferences.json";

/// Staging file for atomic rewrites, next to the preferences file.
const PREFERENCES_TMP_FILE: &str = "preferences.json.tmp";

/// File-based preference store.
///
/// # Example
///
/// ```no_run
/// use reinstall_guard::adapters::FilePreferenceStore;
/// use reinstall_guard::traits::PreferenceStore;
///
/// let store = FilePreferenceStore::new("/tmp/reinstall-guard");
/// store.set("theme", serde_json::json!("dark"))?;
/// # Ok::<(), reinstall_guard::traits::PreferenceError>(())
/// ```
#[derive(Debug)]
pub struct FilePreferenceStore {
    /// Path to the preferences file.
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Create a store rooted at `data_dir`. Nothing is touched on disk until
    /// the first write.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(PREFERENCES_FILE),
            lock: Mutex::new(()),
        }
    }

    /// Get the path to the preferences file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, PreferenceValue>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| PreferenceError::Read(format!("{}: {}", self.path.display(), e)))?;

        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| PreferenceError::Serialization(e.to_string()))
    }

    /// Load for a read-modify-write cycle.
    ///
    /// Unparseable contents count as empty, so the write replaces them.
    fn load_for_write(&self) -> Result<BTreeMap<String, PreferenceValue>, PreferenceError> {
        match self.load() {
            Err(PreferenceError::Serialization(e)) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Preferences file is corrupt, rewriting it from scratch"
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn store(
        &self,
        entries: &BTreeMap<String, PreferenceValue>,
        on_error: fn(String) -> PreferenceError,
    ) -> Result<(), PreferenceError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        if !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| on_error(format!("{}: {}", parent.display(), e)))?;
        }

        let tmp_path = parent.join(PREFERENCES_TMP_FILE);
        let file = File::create(&tmp_path)
            .map_err(|e| on_error(format!("{}: {}", tmp_path.display(), e)))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)
            .map_err(|e| PreferenceError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| on_error(format!("{}: {}", tmp_path.display(), e)))?;
        drop(writer);

        fs::rename(&tmp_path, &self.path)
            .map_err(|e| on_error(format!("{}: {}", self.path.display(), e)))
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<PreferenceValue>, PreferenceError> {
        let _guard = self.guard();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: PreferenceValue) -> Result<(), PreferenceError> {
        let _guard = self.guard();
        let mut entries = self.load_for_write()?;
        entries.insert(key.to_string(), value);
        self.store(&entries, PreferenceError::Write)
    }

    fn all_keys(&self) -> Result<BTreeSet<String>, PreferenceError> {
        let _guard = self.guard();
        Ok(self.load()?.into_keys().collect())
    }

    fn delete(&self, key: &str) -> Result<(), PreferenceError> {
        let _guard = self.guard();
        let mut entries = self.load_for_write()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.store(&entries, PreferenceError::Delete)
    }
}
