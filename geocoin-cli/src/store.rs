//! JSON-file key-value store.
//!
//! Persists the whole key space as one JSON object, written through on
//! every mutation. That is plenty for a game save of a few hundred small
//! blobs and keeps the file hand-inspectable.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use geocoin::KeyValueStore;
use tracing::warn;

/// File-backed implementation of the persistence collaborator.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`, creating parent directories as needed.
    ///
    /// A missing file starts empty; a corrupt file is logged and replaced
    /// on the next write rather than aborting the game.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt save file, starting fresh");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };

        Ok(Self { path, entries })
    }

    /// The file this store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let blob = match serde_json::to_string_pretty(&self.entries) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "failed to encode save file");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, blob) {
            warn!(path = %self.path.display(), error = %e, "failed to write save file");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set("playerPosition", r#"{"lat":1.0,"lng":2.0}"#);
            store.set("collectedCoins", "7");
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("collectedCoins").as_deref(), Some("7"));
        assert_eq!(
            store.get("playerPosition").as_deref(),
            Some(r#"{"lat":1.0,"lng":2.0}"#)
        );
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nope.json")).unwrap();
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "definitely not json").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_clear_empties_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("a", "1");
        store.clear();
        drop(store);

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("a"), None);
    }
}
