//! Cache entities and the authoritative cache store.
//!
//! The [`CacheStore`] is the single table mapping cell identifiers to cache
//! objects. It owns every `Cache` in the process: creation happens here (on
//! first visit, behind a probabilistic spawn gate), and memento
//! encoding/restoring happens here so that coin origin references can be
//! resolved against the full table.
//!
//! Caches are never deleted once created; leaving the visibility window only
//! retracts their marker. Revisiting a cell therefore restores its exact
//! state.

mod coin;
mod memento;

pub use coin::{coin_id, Coin};
pub use memento::MementoError;

use std::collections::HashMap;

use tracing::debug;

use crate::coord::{CellId, Position};
use crate::rng::GameRng;
use memento::{CacheMemento, CoinRecord};

/// A coin cache placed on one grid cell.
///
/// Cell and position are fixed at creation; the coin collection is the only
/// mutable field. Coin order is insertion order and is used only for display.
#[derive(Debug, Clone)]
pub struct Cache {
    cell: CellId,
    position: Position,
    /// Coins currently held, in insertion order.
    pub coins: Vec<Coin>,
}

impl Cache {
    fn new(cell: CellId, position: Position, coins: Vec<Coin>) -> Self {
        Self {
            cell,
            position,
            coins,
        }
    }

    /// The cell this cache occupies.
    pub fn cell(&self) -> CellId {
        self.cell
    }

    /// The cache's representative geographic position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of coins currently held.
    pub fn coin_count(&self) -> usize {
        self.coins.len()
    }
}

/// Authoritative mapping from cell identifier to cache.
///
/// At most one `Cache` exists per cell for the lifetime of the store; the
/// backing map enforces the uniqueness invariant. Generation parameters are
/// fixed at construction so every spawn decision made by one store draws
/// from the same configuration.
#[derive(Debug)]
pub struct CacheStore {
    caches: HashMap<CellId, Cache>,
    spawn_probability: f64,
    max_initial_coins: u32,
}

impl CacheStore {
    /// Create a store with the given generation parameters.
    ///
    /// `spawn_probability` is clamped into `[0, 1]`.
    pub fn new(spawn_probability: f64, max_initial_coins: u32) -> Self {
        Self {
            caches: HashMap::new(),
            spawn_probability: spawn_probability.clamp(0.0, 1.0),
            max_initial_coins,
        }
    }

    /// Number of caches created so far.
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    /// Whether no cache has been created yet.
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Whether a cache exists at the given cell.
    pub fn contains(&self, cell: CellId) -> bool {
        self.caches.contains_key(&cell)
    }

    /// Look up the cache at a cell.
    pub fn get(&self, cell: CellId) -> Option<&Cache> {
        self.caches.get(&cell)
    }

    /// Look up the cache at a cell, mutably.
    pub fn get_mut(&mut self, cell: CellId) -> Option<&mut Cache> {
        self.caches.get_mut(&cell)
    }

    /// Return the cache at `cell`, creating it on first visit.
    ///
    /// When the cell has no cache yet, a Bernoulli trial with the configured
    /// spawn probability decides whether one appears. `None` is the normal
    /// negative result, not an error, and leaves no entry behind; a later
    /// visit rolls again. On success the cache starts with a uniform random
    /// stock of `0..=max_initial_coins` coins, serials counting from zero.
    pub fn get_or_create(
        &mut self,
        cell: CellId,
        position: Position,
        rng: &mut GameRng,
    ) -> Option<&mut Cache> {
        if !self.caches.contains_key(&cell) {
            if !rng.spawn_roll(self.spawn_probability) {
                return None;
            }
            let count = rng.initial_coins(self.max_initial_coins);
            let coins = (0..count).map(|serial| Coin::mint(cell, serial)).collect();
            debug!(cell = %cell, coins = count, "spawned cache");
            self.caches.insert(cell, Cache::new(cell, position, coins));
        }
        self.caches.get_mut(&cell)
    }

    /// Encode a cache's coin collection as an opaque memento string.
    ///
    /// The cache's identity and position are deliberately not encoded; both
    /// follow from the cell key the memento is stored under.
    pub fn encode_memento(cache: &Cache) -> Result<String, MementoError> {
        let memento = CacheMemento {
            coins: cache
                .coins
                .iter()
                .map(|coin| CoinRecord {
                    id: coin.id.clone(),
                    serial: coin.serial,
                    origin_id: coin.origin.key(),
                })
                .collect(),
        };
        memento.encode()
    }

    /// Replace the coin collection of the cache at `cell` from a memento.
    ///
    /// Each decoded coin's origin id is resolved against the store; when no
    /// cache is registered under that id (a forward reference during bulk
    /// restore, or a key that no longer parses) the origin falls back to the
    /// cell being restored. Restoring the same memento twice yields the same
    /// coin set.
    ///
    /// # Errors
    ///
    /// Returns `MementoError::Json` on a malformed blob (the cache is left
    /// untouched) and `MementoError::UnknownCell` if no cache exists at
    /// `cell`.
    pub fn restore(&mut self, cell: CellId, blob: &str) -> Result<(), MementoError> {
        let memento = CacheMemento::decode(blob)?;

        let coins: Vec<Coin> = memento
            .coins
            .into_iter()
            .map(|record| {
                let origin = record
                    .origin_id
                    .parse::<CellId>()
                    .ok()
                    .filter(|id| self.caches.contains_key(id))
                    .unwrap_or(cell);
                Coin {
                    id: record.id,
                    serial: record.serial,
                    origin,
                }
            })
            .collect();

        let cache = self
            .caches
            .get_mut(&cell)
            .ok_or(MementoError::UnknownCell(cell))?;
        cache.coins = coins;
        Ok(())
    }

    /// Drop every cache. Only used by a full game reset.
    pub fn clear(&mut self) {
        self.caches.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_always_spawning() -> CacheStore {
        CacheStore::new(1.0, 5)
    }

    fn cell() -> CellId {
        CellId::new(100, -200)
    }

    fn position() -> Position {
        Position::new(0.00001, -0.00002)
    }

    #[test]
    fn test_get_or_create_returns_same_cache() {
        let mut store = store_always_spawning();
        let mut rng = GameRng::from_seed_u64(1);

        let first_count = store
            .get_or_create(cell(), position(), &mut rng)
            .expect("probability 1.0 must spawn")
            .coin_count();
        let second_count = store
            .get_or_create(cell(), position(), &mut rng)
            .expect("existing cache must be returned")
            .coin_count();

        assert_eq!(first_count, second_count);
        assert_eq!(store.len(), 1, "no duplicate cache per cell");
    }

    #[test]
    fn test_no_spawn_leaves_no_entry() {
        let mut store = CacheStore::new(0.0, 5);
        let mut rng = GameRng::from_seed_u64(1);

        assert!(store.get_or_create(cell(), position(), &mut rng).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_initial_coins_have_sequential_serials() {
        let mut store = store_always_spawning();
        let mut rng = GameRng::from_seed_u64(42);

        let cache = store.get_or_create(cell(), position(), &mut rng).unwrap();
        for (expected, coin) in cache.coins.iter().enumerate() {
            assert_eq!(coin.serial, expected as u32);
            assert_eq!(coin.origin, cell());
            assert_eq!(coin.id, coin_id(cell(), expected as u32));
        }
    }

    #[test]
    fn test_memento_roundtrip() {
        let mut store = store_always_spawning();
        let mut rng = GameRng::from_seed_u64(3);

        let cache = store.get_or_create(cell(), position(), &mut rng).unwrap();
        let before = cache.coins.clone();
        let blob = CacheStore::encode_memento(cache).unwrap();

        store.restore(cell(), &blob).unwrap();
        assert_eq!(store.get(cell()).unwrap().coins, before);
    }

    #[test]
    fn test_restore_is_idempotent() {
        let mut store = store_always_spawning();
        let mut rng = GameRng::from_seed_u64(3);

        let cache = store.get_or_create(cell(), position(), &mut rng).unwrap();
        let blob = CacheStore::encode_memento(cache).unwrap();

        store.restore(cell(), &blob).unwrap();
        let once = store.get(cell()).unwrap().coins.clone();
        store.restore(cell(), &blob).unwrap();
        assert_eq!(store.get(cell()).unwrap().coins, once);
    }

    #[test]
    fn test_restore_resolves_known_origin() {
        let mut store = store_always_spawning();
        let mut rng = GameRng::from_seed_u64(3);
        let other = CellId::new(7, 7);

        store.get_or_create(cell(), position(), &mut rng).unwrap();
        store
            .get_or_create(other, Position::new(0.0, 0.0), &mut rng)
            .unwrap();

        // A coin deposited here that was minted at `other`.
        let blob = format!(
            r#"{{"coins":[{{"id":"7:7#0","serial":0,"originId":"{}"}}]}}"#,
            other.key()
        );
        store.restore(cell(), &blob).unwrap();
        assert_eq!(store.get(cell()).unwrap().coins[0].origin, other);
    }

    #[test]
    fn test_restore_falls_back_to_own_cell_for_unknown_origin() {
        let mut store = store_always_spawning();
        let mut rng = GameRng::from_seed_u64(3);

        store.get_or_create(cell(), position(), &mut rng).unwrap();

        // Origin cell was never registered in this store.
        let blob = r#"{"coins":[{"id":"9:9#0","serial":0,"originId":"9,9"}]}"#;
        store.restore(cell(), blob).unwrap();
        assert_eq!(store.get(cell()).unwrap().coins[0].origin, cell());
    }

    #[test]
    fn test_restore_rejects_malformed_blob_without_mutating() {
        let mut store = store_always_spawning();
        let mut rng = GameRng::from_seed_u64(3);

        let before = store
            .get_or_create(cell(), position(), &mut rng)
            .unwrap()
            .coins
            .clone();

        let result = store.restore(cell(), "{broken");
        assert!(matches!(result, Err(MementoError::Json(_))));
        assert_eq!(store.get(cell()).unwrap().coins, before);
    }

    #[test]
    fn test_restore_unknown_cell_errors() {
        let mut store = store_always_spawning();
        let result = store.restore(cell(), r#"{"coins":[]}"#);
        assert!(matches!(result, Err(MementoError::UnknownCell(_))));
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_preserves_coin_triples(
                seed in 0u64..1000,
                i in -1_000_000i64..1_000_000,
                j in -1_000_000i64..1_000_000
            ) {
                let mut store = CacheStore::new(1.0, 16);
                let mut rng = GameRng::from_seed_u64(seed);
                let cell = CellId::new(i, j);

                let cache = store
                    .get_or_create(cell, Position::new(0.0, 0.0), &mut rng)
                    .unwrap();
                let before = cache.coins.clone();
                let blob = CacheStore::encode_memento(cache).unwrap();

                store.restore(cell, &blob).unwrap();
                prop_assert_eq!(&store.get(cell).unwrap().coins, &before);
            }
        }
    }
}
