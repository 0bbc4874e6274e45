//! Player coin inventory.
//!
//! Collected coins are folded into a plain integer tally: once gathered,
//! coins lose their individual identity. Depositing mints fresh coins in the
//! target cache rather than restoring the originals. Both transfers complete
//! in one step; no partial state is observable.

use tracing::debug;

use crate::cache::{Cache, Coin};

/// The player's inventory tally and its transfer operations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CoinLedger {
    collected: u32,
}

impl CoinLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger holding a restored tally.
    pub fn with_collected(collected: u32) -> Self {
        Self { collected }
    }

    /// Current inventory count.
    pub fn collected(&self) -> u32 {
        self.collected
    }

    /// Move every coin out of `cache` into the inventory.
    ///
    /// Clears the cache's collection and returns the number of coins moved.
    pub fn collect_all(&mut self, cache: &mut Cache) -> u32 {
        let moved = cache.coins.len() as u32;
        cache.coins.clear();
        self.collected += moved;
        debug!(cell = %cache.cell(), moved, total = self.collected, "collected coins");
        moved
    }

    /// Mint the whole inventory as fresh coins in `cache`.
    ///
    /// Serials continue from the cache's existing coin count so freshly
    /// minted ids never collide with coins already present. Zeroes the
    /// tally and returns the number of coins deposited.
    pub fn deposit_all(&mut self, cache: &mut Cache) -> u32 {
        let deposited = self.collected;
        let next_serial = cache.coins.len() as u32;
        let cell = cache.cell();
        cache
            .coins
            .extend((0..deposited).map(|k| Coin::mint(cell, next_serial + k)));
        self.collected = 0;
        debug!(cell = %cell, deposited, "deposited coins");
        deposited
    }

    /// Reset the tally to zero.
    pub fn reset(&mut self) {
        self.collected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::coord::{CellId, Position};
    use crate::rng::GameRng;

    fn cache_with_coins(store: &mut CacheStore, cell: CellId) -> &mut Cache {
        let mut rng = GameRng::from_seed_u64(11);
        store
            .get_or_create(cell, Position::new(0.0, 0.0), &mut rng)
            .expect("probability 1.0 must spawn")
    }

    #[test]
    fn test_collect_all_empties_the_cache() {
        let mut store = CacheStore::new(1.0, 5);
        let cache = cache_with_coins(&mut store, CellId::new(1, 2));
        let had = cache.coin_count() as u32;

        let mut ledger = CoinLedger::new();
        let moved = ledger.collect_all(cache);

        assert_eq!(moved, had);
        assert_eq!(ledger.collected(), had);
        assert_eq!(cache.coin_count(), 0);
    }

    #[test]
    fn test_collect_then_deposit_conserves_count() {
        let mut store = CacheStore::new(1.0, 5);
        let cache = cache_with_coins(&mut store, CellId::new(1, 2));
        let before = cache.coin_count();

        let mut ledger = CoinLedger::new();
        ledger.collect_all(cache);
        ledger.deposit_all(cache);

        assert_eq!(cache.coin_count(), before);
        assert_eq!(ledger.collected(), 0);
    }

    #[test]
    fn test_deposit_serials_continue_from_existing_count() {
        let mut store = CacheStore::new(1.0, 5);
        let target = CellId::new(9, 9);
        let cache = cache_with_coins(&mut store, target);
        let existing = cache.coin_count() as u32;

        let mut ledger = CoinLedger::with_collected(3);
        ledger.deposit_all(cache);

        let serials: Vec<u32> = cache.coins.iter().map(|c| c.serial).collect();
        assert_eq!(
            &serials[existing as usize..],
            &[existing, existing + 1, existing + 2]
        );
        assert!(cache.coins.iter().all(|c| c.origin == target));
    }

    #[test]
    fn test_deposit_of_empty_inventory_is_a_noop() {
        let mut store = CacheStore::new(1.0, 5);
        let cache = cache_with_coins(&mut store, CellId::new(0, 1));
        let before = cache.coins.clone();

        let mut ledger = CoinLedger::new();
        assert_eq!(ledger.deposit_all(cache), 0);
        assert_eq!(cache.coins, before);
    }

    #[test]
    fn test_collect_accumulates_across_caches() {
        let mut store = CacheStore::new(1.0, 5);
        let mut ledger = CoinLedger::new();

        let a = cache_with_coins(&mut store, CellId::new(1, 0));
        let from_a = ledger.collect_all(a);
        let b = cache_with_coins(&mut store, CellId::new(2, 0));
        let from_b = ledger.collect_all(b);

        assert_eq!(ledger.collected(), from_a + from_b);
    }
}
