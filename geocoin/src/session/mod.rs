//! Game session orchestration.
//!
//! [`GameSession`] wires the cache store, visibility window, limiter, ledger
//! and persistence bridge to the two external collaborators (world view,
//! key-value store) and exposes the user-facing actions: movement,
//! geolocation, collect, deposit and reset.
//!
//! Every mutating operation validates its input first, applies all state
//! changes, and finishes with the persistence write, as one atomic step from
//! the caller's perspective. The session assumes a cooperative
//! single-threaded event loop: operations run to completion before the next
//! event is processed, so no locking is needed.

mod config;
mod error;

pub use config::{
    Direction, GameConfig, DEFAULT_MAX_INITIAL_COINS, DEFAULT_MAX_VISIBLE, DEFAULT_ORIGIN,
    DEFAULT_SPAWN_PROBABILITY, DEFAULT_WINDOW_RADIUS,
};
pub use error::GameError;

use tracing::{debug, info, warn};

use crate::cache::{CacheStore, Coin};
use crate::coord::{CellId, Grid, Position};
use crate::ledger::CoinLedger;
use crate::persist::{KeyValueStore, PersistenceBridge, PlayerRecord};
use crate::rng::GameRng;
use crate::view::WorldView;
use crate::window::{CacheLimiter, VisibilityWindow, VisibleSet};

/// Read-only description of one visible cache, for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheSummary {
    /// Cell of the cache.
    pub cell: CellId,
    /// Geographic position of the cache.
    pub position: Position,
    /// Number of coins it currently holds.
    pub coins: usize,
}

/// A running game, generic over the rendering collaborator.
pub struct GameSession<V: WorldView> {
    config: GameConfig,
    grid: Grid,
    store: CacheStore,
    window: VisibilityWindow,
    limiter: CacheLimiter,
    ledger: CoinLedger,
    bridge: PersistenceBridge,
    view: V,
    rng: GameRng,
    position: Position,
    trail: Vec<Position>,
    visible: VisibleSet,
    watching_location: bool,
}

impl<V: WorldView> GameSession<V> {
    /// Start a session against the given collaborators.
    ///
    /// Persisted player state is restored when present; a corrupt record is
    /// logged and replaced by defaults. The first window reconciliation runs
    /// before this returns, so the view already shows the initial markers.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Coord` if the configured origin (or a persisted
    /// position) is not a finite coordinate.
    pub fn new(
        config: GameConfig,
        view: V,
        store: Box<dyn KeyValueStore>,
        rng: GameRng,
    ) -> Result<Self, GameError> {
        let bridge = PersistenceBridge::new(store);

        let (position, collected, trail) = match bridge.load_player() {
            Ok(Some(record)) => (record.position, record.collected, record.trail),
            Ok(None) => (config.origin, 0, Vec::new()),
            Err(e) => {
                warn!(error = %e, "corrupt player state, starting fresh");
                (config.origin, 0, Vec::new())
            }
        };

        let mut session = Self {
            grid: Grid::new(config.cell_size, config.scale),
            store: CacheStore::new(config.spawn_probability, config.max_initial_coins),
            window: VisibilityWindow::new(config.window_radius),
            limiter: CacheLimiter::new(config.max_visible),
            ledger: CoinLedger::with_collected(collected),
            bridge,
            view,
            rng,
            position,
            trail,
            visible: VisibleSet::new(),
            watching_location: false,
            config,
        };

        // Fail fast on a non-finite origin before any marker is placed.
        session.grid.cell_of(position.lat, position.lng)?;

        session.view.set_player_marker(session.position);
        session.view.set_trail(&session.trail);
        session.view.center_on(session.position);
        session.reconcile()?;

        info!(position = %session.position, collected, "session started");
        Ok(session)
    }

    /// Step the player one cell in the given direction.
    pub fn move_by(&mut self, direction: Direction) -> Result<(), GameError> {
        let (dlat, dlng) = direction.offset(self.config.cell_size);
        self.apply_position(self.position.lat + dlat, self.position.lng + dlng)
    }

    /// Move the player to an absolute position.
    pub fn set_position(&mut self, lat: f64, lng: f64) -> Result<(), GameError> {
        self.apply_position(lat, lng)
    }

    /// Toggle geolocation following. Returns the new state.
    pub fn toggle_geolocation(&mut self) -> bool {
        self.watching_location = !self.watching_location;
        info!(watching = self.watching_location, "geolocation toggled");
        self.watching_location
    }

    /// Feed a geolocation fix into the session.
    ///
    /// Ignored (returning `Ok(false)`) while geolocation following is off,
    /// so a stray late callback cannot move the player.
    pub fn geolocation_update(&mut self, lat: f64, lng: f64) -> Result<bool, GameError> {
        if !self.watching_location {
            return Ok(false);
        }
        self.apply_position(lat, lng)?;
        Ok(true)
    }

    /// Record that geolocation is unavailable or was denied.
    ///
    /// Non-fatal: the notice is logged and the session returns to manual
    /// movement.
    pub fn geolocation_failed(&mut self, notice: &str) {
        warn!(notice, "geolocation unavailable, continuing in manual mode");
        self.watching_location = false;
    }

    /// Collect every coin from the cache at `cell` into the inventory.
    ///
    /// A stale cell (evicted from view between popup-open and button-press,
    /// or never materialized) is a no-op returning zero.
    pub fn collect(&mut self, cell: CellId) -> u32 {
        if !self.visible.contains(cell) {
            debug!(cell = %cell, "collect on a cell not in view ignored");
            return 0;
        }
        let Some(cache) = self.store.get_mut(cell) else {
            debug!(cell = %cell, "collect on an unknown cache ignored");
            return 0;
        };
        let moved = self.ledger.collect_all(cache);
        self.persist_cache(cell);
        self.save_player();
        moved
    }

    /// Deposit the whole inventory into the cache at `cell`.
    ///
    /// Stale cells are a no-op returning zero, like [`GameSession::collect`].
    pub fn deposit(&mut self, cell: CellId) -> u32 {
        if !self.visible.contains(cell) {
            debug!(cell = %cell, "deposit on a cell not in view ignored");
            return 0;
        }
        let Some(cache) = self.store.get_mut(cell) else {
            debug!(cell = %cell, "deposit on an unknown cache ignored");
            return 0;
        };
        let deposited = self.ledger.deposit_all(cache);
        self.persist_cache(cell);
        self.save_player();
        deposited
    }

    /// Wipe all persisted and in-memory state and start over.
    ///
    /// Confirmation is the caller's job: the UI asks the player before
    /// invoking this. Afterwards the player is back at the configured
    /// origin with an empty inventory and trail, and the world regenerates
    /// on the spot.
    pub fn reset(&mut self) -> Result<(), GameError> {
        info!("resetting game state");
        self.bridge.clear_all();
        self.ledger.reset();
        self.trail.clear();
        self.position = self.config.origin;
        self.watching_location = false;

        for entry in self.visible.drain() {
            self.view.remove_marker(entry.marker);
        }
        self.store.clear();

        self.view.set_player_marker(self.position);
        self.view.set_trail(&self.trail);
        self.view.center_on(self.position);
        self.reconcile()
    }

    /// Current player position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current inventory tally.
    pub fn collected_coins(&self) -> u32 {
        self.ledger.collected()
    }

    /// The movement trail, oldest first.
    pub fn trail(&self) -> &[Position] {
        &self.trail
    }

    /// Whether geolocation following is on.
    pub fn is_watching_location(&self) -> bool {
        self.watching_location
    }

    /// The session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The rendering collaborator.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The rendering collaborator, mutably (for frontend-side updates).
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Currently visible caches, oldest-materialized first.
    pub fn visible_caches(&self) -> Vec<CacheSummary> {
        self.visible
            .iter()
            .filter_map(|entry| self.store.get(entry.cell))
            .map(|cache| CacheSummary {
                cell: cache.cell(),
                position: cache.position(),
                coins: cache.coin_count(),
            })
            .collect()
    }

    /// The coins held by a visible cache, in insertion order.
    ///
    /// `None` for cells that are not currently materialized.
    pub fn cache_coins(&self, cell: CellId) -> Option<&[Coin]> {
        if !self.visible.contains(cell) {
            return None;
        }
        self.store.get(cell).map(|cache| cache.coins.as_slice())
    }

    /// Validate, move, re-render, reconcile, persist: one atomic step.
    fn apply_position(&mut self, lat: f64, lng: f64) -> Result<(), GameError> {
        // Indexing validates finiteness before any state is touched.
        self.grid.cell_of(lat, lng)?;

        self.position = Position::new(lat, lng);
        self.trail.push(self.position);
        self.view.set_player_marker(self.position);
        self.view.set_trail(&self.trail);
        self.view.center_on(self.position);
        self.reconcile()?;
        self.save_player();
        Ok(())
    }

    /// Bring the materialized set in line with the window around the player.
    ///
    /// Out-of-window markers are retracted first (their caches survive in
    /// the store). Missing in-window cells are then materialized in raster
    /// order (created or restored from their persisted memento) until the
    /// cap is hit; cells skipped by the cap are reconsidered on the next
    /// movement. The limiter runs last as a backstop for a cap lowered
    /// mid-session.
    fn reconcile(&mut self) -> Result<(), GameError> {
        let center = self.grid.cell_of(self.position.lat, self.position.lng)?;

        let stale: Vec<CellId> = self
            .visible
            .cells()
            .filter(|cell| !self.window.contains(center, *cell))
            .collect();
        for cell in stale {
            if let Some(marker) = self.visible.remove(cell) {
                self.view.remove_marker(marker);
                debug!(cell = %cell, "retracted out-of-window cache");
            }
        }

        for cell in self.window.target_cells(center) {
            if self.limiter.at_capacity(&self.visible) {
                debug!("visible cache cap reached, deferring remaining cells");
                break;
            }
            if self.visible.contains(cell) {
                continue;
            }
            let position = self.grid.cell_center(cell);
            if self
                .store
                .get_or_create(cell, position, &mut self.rng)
                .is_none()
            {
                continue;
            }
            if let Some(memento) = self.bridge.load_cache(cell) {
                if let Err(e) = self.store.restore(cell, &memento) {
                    warn!(cell = %cell, error = %e, "corrupt cache memento, keeping generated state");
                }
            }
            let marker = self.view.add_marker(cell, position);
            self.visible.insert(cell, marker);
        }

        self.limiter.enforce(&mut self.visible, &mut self.view);
        Ok(())
    }

    /// Persist the memento of the cache at `cell`.
    fn persist_cache(&mut self, cell: CellId) {
        let Some(cache) = self.store.get(cell) else {
            return;
        };
        match CacheStore::encode_memento(cache) {
            Ok(memento) => self.bridge.save_cache(cell, &memento),
            Err(e) => warn!(cell = %cell, error = %e, "failed to encode cache memento"),
        }
    }

    /// Persist position, tally and trail.
    fn save_player(&mut self) {
        self.bridge.save_player(&PlayerRecord {
            position: self.position,
            collected: self.ledger.collected(),
            trail: self.trail.clone(),
        });
    }
}
