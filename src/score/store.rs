//! Persistent integer key/value storage.
//!
//! Scores and the chosen grid size are plain integers under string keys.
//! `MemoryStore` keeps them in process; `JsonFileStore` writes them to a
//! JSON object on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::core::Result;

/// Integer settings that survive process restarts.
pub trait KeyValueStore {
    fn get_int(&self, key: &str) -> Option<i64>;

    fn set_int(&mut self, key: &str, value: i64);

    /// Push pending writes to durable storage.
    fn flush(&mut self) -> Result<()>;
}

/// In-process store. `flush` is a no-op.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, i64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Store backed by a JSON file.
///
/// ```no_run
/// use matchit::score::{JsonFileStore, KeyValueStore};
///
/// let mut store = JsonFileStore::open("prefs.json")?;
/// store.set_int("rows", 4);
/// store.flush()?;
/// # Ok::<(), matchit::core::MatchError>(())
/// ```
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchError;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("matchit-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_int("rows"), None);

        store.set_int("rows", 5);
        store.set_int("rows", 6);
        assert_eq!(store.get_int("rows"), Some(6));
        assert!(store.flush().is_ok());
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get_int("anything"), None);
    }

    #[test]
    fn test_json_store_persists() {
        let path = temp_path("persist");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set_int("cols", 3);
        store.set_int("player_score", -2);
        store.flush().unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get_int("cols"), Some(3));
        assert_eq!(reopened.get_int("player_score"), Some(-2));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let path = temp_path("garbage");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, MatchError::Serialization(_)));

        fs::remove_file(&path).unwrap();
    }
}
