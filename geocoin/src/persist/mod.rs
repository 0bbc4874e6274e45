//! Persistence collaborator and the bridge on top of it.
//!
//! The external store is an abstract string-keyed blob store; the core
//! imposes no storage opinions beyond that. [`PersistenceBridge`] maps game
//! state onto the key namespace:
//!
//! - `"playerPosition"` - JSON position object
//! - `"collectedCoins"` - integer
//! - `"movementHistory"` - JSON array of positions
//! - one key per cell (`"i,j"`) - the cache memento blob
//!
//! Malformed blobs surface as [`PersistError::Corrupt`]; callers fall back
//! to defaults instead of propagating. Writes are last-write-wins per key
//! with no transactional guarantee.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use crate::coord::{CellId, Position};

/// Key for the persisted player position.
pub const KEY_PLAYER_POSITION: &str = "playerPosition";

/// Key for the persisted inventory tally.
pub const KEY_COLLECTED_COINS: &str = "collectedCoins";

/// Key for the persisted movement trail.
pub const KEY_MOVEMENT_HISTORY: &str = "movementHistory";

/// Errors raised while reading persisted state.
#[derive(Debug, Error)]
pub enum PersistError {
    /// A stored blob did not decode. Callers treat the value as absent.
    #[error("Corrupt persisted value under {key:?}: {detail}")]
    Corrupt { key: String, detail: String },
}

/// Abstract string-keyed persistence collaborator.
///
/// Implementations decide where blobs live (browser local storage, a JSON
/// file, memory). Keys are short strings; values are opaque blobs the core
/// has already encoded.
pub trait KeyValueStore {
    /// Read the blob under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write the blob under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Delete the blob under `key`, if any.
    fn remove(&mut self, key: &str);

    /// Delete everything.
    fn clear(&mut self);
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Persisted player state as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    /// Last persisted position.
    pub position: Position,
    /// Inventory tally.
    pub collected: u32,
    /// Movement trail, oldest first.
    pub trail: Vec<Position>,
}

/// Maps game state onto the key-value collaborator.
pub struct PersistenceBridge {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceBridge").finish_non_exhaustive()
    }
}

impl PersistenceBridge {
    /// Wrap a key-value store.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist a cache memento under its cell key.
    pub fn save_cache(&mut self, cell: CellId, memento: &str) {
        self.store.set(&cell.key(), memento);
    }

    /// Read the stored memento for a cell, if any.
    ///
    /// The blob is opaque here; decoding (and corruption detection) happens
    /// in the cache store's restore.
    pub fn load_cache(&self, cell: CellId) -> Option<String> {
        self.store.get(&cell.key())
    }

    /// Persist position, tally and trail.
    ///
    /// Encoding failures are logged and skipped; the previous value for the
    /// affected key survives.
    pub fn save_player(&mut self, record: &PlayerRecord) {
        match serde_json::to_string(&record.position) {
            Ok(blob) => self.store.set(KEY_PLAYER_POSITION, &blob),
            Err(e) => warn!(error = %e, "failed to encode player position"),
        }
        self.store
            .set(KEY_COLLECTED_COINS, &record.collected.to_string());
        match serde_json::to_string(&record.trail) {
            Ok(blob) => self.store.set(KEY_MOVEMENT_HISTORY, &blob),
            Err(e) => warn!(error = %e, "failed to encode movement trail"),
        }
    }

    /// Load persisted player state.
    ///
    /// Returns `Ok(None)` when no position was ever saved. A missing tally
    /// or trail defaults (zero, empty) without being an error.
    ///
    /// # Errors
    ///
    /// `PersistError::Corrupt` when a present blob does not decode; the
    /// caller falls back to a fresh player state.
    pub fn load_player(&self) -> Result<Option<PlayerRecord>, PersistError> {
        let Some(blob) = self.store.get(KEY_PLAYER_POSITION) else {
            return Ok(None);
        };
        let position: Position = decode(KEY_PLAYER_POSITION, &blob)?;

        let collected = match self.store.get(KEY_COLLECTED_COINS) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| PersistError::Corrupt {
                key: KEY_COLLECTED_COINS.to_string(),
                detail: e.to_string(),
            })?,
            None => 0,
        };

        let trail = match self.store.get(KEY_MOVEMENT_HISTORY) {
            Some(raw) => decode(KEY_MOVEMENT_HISTORY, &raw)?,
            None => Vec::new(),
        };

        Ok(Some(PlayerRecord {
            position,
            collected,
            trail,
        }))
    }

    /// Wipe every persisted key: player state and all cache mementos.
    pub fn clear_all(&mut self) {
        self.store.clear();
    }
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, blob: &str) -> Result<T, PersistError> {
    serde_json::from_str(blob).map_err(|e| PersistError::Corrupt {
        key: key.to_string(),
        detail: e.to_string(),
    })
}
