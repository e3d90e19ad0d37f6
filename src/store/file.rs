//! Directory-backed key-value store.
//!
//! Each key is one file inside the store directory. Key bytes outside
//! `[A-Za-z0-9_-]` are written as `%XX`, so `table_size::users` lives in
//! `table_size%3A%3Ausers.json`.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, StoreError};

const EXTENSION: &str = "json";

/// Key-value store persisted as files in a directory.
///
/// Writes are atomic via a `.tmp` intermediate file and `rename`.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `base_path`.
    ///
    /// Leftover `.tmp` files from interrupted writes are removed.
    pub fn open(base_path: impl Into<PathBuf>) -> io::Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        if let Ok(entries) = fs::read_dir(&base_path) {
            for entry in entries.flatten() {
                if entry.path().extension().is_some_and(|ext| ext == "tmp") {
                    debug!(path = %entry.path().display(), "removing stale temp file");
                    let _ = fs::remove_file(entry.path());
                }
            }
        }

        Ok(Self { base_path })
    }

    /// Directory holding the entries.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the file path for a key.
    fn entry_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        let mut name = String::with_capacity(key.len() + EXTENSION.len() + 1);
        for b in key.bytes() {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
                name.push(b as char);
            } else {
                let _ = write!(name, "%{:02X}", b);
            }
        }
        name.push('.');
        name.push_str(EXTENSION);
        Ok(self.base_path.join(name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
