//! File-based secure store adapter.
//!
//! Used on platforms without a system keychain. Each service namespace is one
//! JSON file under `<data_dir>/secure/`, so clearing a namespace is a single
//! file removal.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::traits::{SecureStore, SecureStoreError};

/// The secure store directory name.
const SECURE_DIR: &str = "secure";

/// File-based secure store.
#[derive(Debug)]
pub struct FileSecureStore {
    root: PathBuf,
}

impl FileSecureStore {
    /// Create a store rooted at `<data_dir>/secure`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root: data_dir.as_ref().join(SECURE_DIR),
        }
    }

    /// Path of the file backing `service_id`.
    ///
    /// Path separators in the id are replaced so a service id can never
    /// escape the secure directory.
    pub fn namespace_path(&self, service_id: &str) -> PathBuf {
        let file_name: String = service_id
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.root.join(format!("{}.json", file_name))
    }

    /// Read every record of a namespace. A missing namespace is empty.
    pub fn records(&self, service_id: &str) -> Result<BTreeMap<String, String>, SecureStoreError> {
        let path = self.namespace_path(service_id);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(classify_io_error(&path, e)),
        };

        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SecureStoreError::Other(format!("{}: {}", path.display(), e)))
    }

    /// Store a record, creating the namespace if needed.
    pub fn put(
        &self,
        service_id: &str,
        account: &str,
        secret: &str,
    ) -> Result<(), SecureStoreError> {
        let mut records = self.records(service_id)?;
        records.insert(account.to_string(), secret.to_string());

        fs::create_dir_all(&self.root).map_err(|e| classify_io_error(&self.root, e))?;

        let path = self.namespace_path(service_id);
        let file = File::create(&path).map_err(|e| classify_io_error(&path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &records)
            .map_err(|e| SecureStoreError::Other(e.to_string()))?;
        writer.flush().map_err(|e| classify_io_error(&path, e))
    }
}

impl SecureStore for FileSecureStore {
    fn delete_namespace(&self, service_id: &str) -> Result<(), SecureStoreError> {
        let path = self.namespace_path(service_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(classify_io_error(&path, e)),
        }
    }
}

fn classify_io_error(path: &Path, err: std::io::Error) -> SecureStoreError {
    match err.kind() {
        ErrorKind::PermissionDenied => {
            SecureStoreError::AccessDenied(format!("{}: {}", path.display(), err))
        }
        _ => SecureStoreError::Unavailable(format!("{}: {}", path.display(), err)),
    }
}
