//! Persistence of column widths.
//!
//! Widths are kept in a key-value backend under `table_size::<table id>`, as a
//! flat JSON object mapping column identifier to width. The `KeyValueStore`
//! trait lets the table work against the in-memory backend in tests and the
//! file backend in the binary.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::column::{Column, ColumnId};

/// Prefix of every stored width map key.
pub const KEY_PREFIX: &str = "table_size::";

/// Saved widths for one table: column identifier -> width.
pub type WidthMap = BTreeMap<ColumnId, u16>;

/// Error type for store backends.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error reading or writing an entry.
    Io(std::io::Error),
    /// Stored entry is not a flat string -> number object.
    Json(serde_json::Error),
    /// Key cannot be stored by this backend.
    InvalidKey(String),
    /// Backend lock was poisoned by a panicking writer.
    Poisoned,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {}", e),
            StoreError::Json(e) => write!(f, "malformed width map: {}", e),
            StoreError::InvalidKey(key) => write!(f, "invalid store key '{}'", key),
            StoreError::Poisoned => write!(f, "store lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Abstraction for string key-value storage.
///
/// Implementations must be safe to share between table instances; entries
/// written by one handle are visible to every other handle on the same
/// backend.
pub trait KeyValueStore: Send + Sync {
    /// Reads an entry. Returns `Ok(None)` if the key is not present.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes an entry, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes an entry. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Backend whose every operation fails, for exercising error paths.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Poisoned)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::InvalidKey(key.to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("read-only")))
    }
}

/// Column width persistence on top of a `KeyValueStore`.
///
/// Cloning yields another handle to the same backend.
#[derive(Clone)]
pub struct WidthStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for WidthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidthStore").finish_non_exhaustive()
    }
}

impl Default for WidthStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl WidthStore {
    /// Wraps a backend.
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Creates a store backed by a fresh in-memory map.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Returns the backend key for a table identity.
    pub fn storage_key(table_id: &str) -> String {
        format!("{}{}", KEY_PREFIX, table_id)
    }

    /// Loads saved widths, reporting failures.
    ///
    /// Entries whose value is not a positive number fitting in `u16` after
    /// rounding are skipped; anything that is not a flat object of numbers
    /// is an error.
    pub fn try_load(&self, table_id: &str) -> Result<Option<WidthMap>, StoreError> {
        if table_id.is_empty() {
            return Ok(None);
        }
        let Some(raw) = self.backend.get(&Self::storage_key(table_id))? else {
            return Ok(None);
        };
        let parsed: BTreeMap<ColumnId, f64> = serde_json::from_str(&raw)?;
        let widths = parsed
            .into_iter()
            .filter_map(|(id, w)| {
                let w = w.round();
                (1.0..=f64::from(u16::MAX))
                    .contains(&w)
                    .then_some((id, w as u16))
            })
            .collect();
        Ok(Some(widths))
    }

    /// Loads saved widths for a table.
    ///
    /// Any read or parse failure yields `None`.
    pub fn load(&self, table_id: &str) -> Option<WidthMap> {
        match self.try_load(table_id) {
            Ok(widths) => widths,
            Err(e) => {
                warn!(table = table_id, error = %e, "ignoring saved column widths");
                None
            }
        }
    }

    /// Saves the widths of `columns`, reporting failures.
    ///
    /// Every column with an identifier and a non-zero width is included,
    /// whether or not it is resizable. An empty result removes the entry.
    pub fn try_save<A>(&self, table_id: &str, columns: &[Column<A>]) -> Result<(), StoreError> {
        if table_id.is_empty() {
            return Ok(());
        }
        let widths = width_map(columns);
        let key = Self::storage_key(table_id);
        if widths.is_empty() {
            debug!(table = table_id, "no column widths left, removing entry");
            return self.backend.remove(&key);
        }
        let json = serde_json::to_string(&widths)?;
        self.backend.set(&key, &json)
    }

    /// Saves the widths of `columns`.
    ///
    /// Write failures are logged and dropped; the caller keeps its
    /// in-memory widths.
    pub fn save<A>(&self, table_id: &str, columns: &[Column<A>]) {
        if let Err(e) = self.try_save(table_id, columns) {
            warn!(table = table_id, error = %e, "failed to save column widths");
        }
    }

    /// Removes the saved widths of a table.
    pub fn clear(&self, table_id: &str) -> Result<(), StoreError> {
        if table_id.is_empty() {
            return Ok(());
        }
        self.backend.remove(&Self::storage_key(table_id))
    }
}

/// Builds the persisted map from a column list.
pub fn width_map<A>(columns: &[Column<A>]) -> WidthMap {
    columns
        .iter()
        .filter_map(|col| Some((col.id()?.to_string(), col.effective_width()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<Column> {
        vec![
            Column::new("Name", 100).with_key("name"),
            Column::new("Age", 50).with_key("age").with_resizable(false),
        ]
    }

    #[test]
    fn test_storage_key_format() {
        assert_eq!(WidthStore::storage_key("users"), "table_size::users");
    }

    #[test]
    fn test_save_then_load() {
        let store = WidthStore::in_memory();
        store.save("users", &users());

        let widths = store.load("users").unwrap();
        assert_eq!(widths.get("name"), Some(&100));
        assert_eq!(widths.get("age"), Some(&50));
    }

    #[test]
    fn test_save_writes_flat_json() {
        let mem = MemoryStore::new();
        let store = WidthStore::new(mem.clone());
        store.save("users", &users());

        let raw = mem.get("table_size::users").unwrap().unwrap();
        assert_eq!(raw, r#"{"age":50,"name":100}"#);
    }

    #[test]
    fn test_save_skips_unsized_and_unnamed() {
        let store = WidthStore::in_memory();
        let cols: Vec<Column> = vec![
            Column::new("Name", 100),
            Column::without_width("Notes"),
            Column::new("", 30),
            Column::new("Zero", 0),
        ];
        store.save("t", &cols);

        let widths = store.load("t").unwrap();
        assert_eq!(widths.len(), 1);
        assert_eq!(widths.get("Name"), Some(&100));
    }

    #[test]
    fn test_empty_result_removes_entry() {
        let mem = MemoryStore::new();
        let store = WidthStore::new(mem.clone());
        store.save("users", &users());
        assert!(mem.get("table_size::users").unwrap().is_some());

        let cols: Vec<Column> = vec![Column::without_width("Notes")];
        store.save("users", &cols);
        assert!(mem.get("table_size::users").unwrap().is_none());
        assert!(store.load("users").is_none());
    }

    #[test]
    fn test_failing_backend_is_swallowed() {
        let store = WidthStore::new(FailingStore);

        store.save("users", &users());
        assert!(store.try_save("users", &users()).is_err());
        let cols: Vec<Column> = vec![Column::without_width("Notes")];
        assert!(store.try_save("users", &cols).is_err());

        assert!(store.load("users").is_none());
        assert!(store.try_load("users").is_err());
        assert!(store.clear("users").is_err());
    }

    #[test]
    fn test_empty_table_id_is_noop() {
        let mem = MemoryStore::new();
        let store = WidthStore::new(mem.clone());
        store.save("", &users());
        assert!(mem.is_empty());
        assert!(store.load("").is_none());
    }

    #[test]
    fn test_corrupt_entry_reads_as_absent() {
        let mem = MemoryStore::new();
        mem.set("table_size::users", "{not json").unwrap();
        let store = WidthStore::new(mem.clone());

        assert!(store.try_load("users").is_err());
        assert!(store.load("users").is_none());

        mem.set("table_size::users", r#"{"name":"wide"}"#).unwrap();
        assert!(store.load("users").is_none());

        mem.set("table_size::users", "[1,2]").unwrap();
        assert!(store.load("users").is_none());
    }

    #[test]
    fn test_fractional_and_invalid_widths() {
        let mem = MemoryStore::new();
        mem.set(
            "table_size::t",
            r#"{"a":130.4,"b":0,"c":-5,"d":99999999,"e":12}"#,
        )
        .unwrap();
        let widths = WidthStore::new(mem).load("t").unwrap();

        assert_eq!(widths.get("a"), Some(&130));
        assert_eq!(widths.get("e"), Some(&12));
        assert_eq!(widths.len(), 2);
    }

    #[test]
    fn test_clear() {
        let store = WidthStore::in_memory();
        store.save("users", &users());
        store.clear("users").unwrap();
        assert!(store.load("users").is_none());
        // Clearing twice is fine
        store.clear("users").unwrap();
    }

    #[test]
    fn test_tables_do_not_collide() {
        let store = WidthStore::in_memory();
        store.save("a", &users());
        let cols: Vec<Column> = vec![Column::new("Name", 7).with_key("name")];
        store.save("b", &cols);

        assert_eq!(store.load("a").unwrap().get("name"), Some(&100));
        assert_eq!(store.load("b").unwrap().get("name"), Some(&7));
    }
}
