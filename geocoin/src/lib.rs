//! Geocoin - a grid-based coin-caching game core.
//!
//! This library implements the cache-state subsystem of a location game: a
//! player moves on an unbounded map grid, discovers procedurally-placed
//! caches holding coins, and moves coins between caches and a personal
//! inventory. Rendering and input stay outside; frontends plug in through
//! the [`view::WorldView`] and [`persist::KeyValueStore`] collaborator
//! traits and drive everything through a [`session::GameSession`].
//!
//! # Architecture
//!
//! - [`coord`] - deterministic indexing of continuous coordinates into grid
//!   cells
//! - [`cache`] - the authoritative cell → cache table, lazy procedural
//!   generation and the memento protocol
//! - [`window`] - the bounded visibility window and the FIFO cap on
//!   materialized caches
//! - [`ledger`] - the player's coin inventory and its transfer operations
//! - [`persist`] - the persistence bridge over an abstract key-value store
//! - [`session`] - the orchestrator tying the pieces to the collaborators

pub mod cache;
pub mod coord;
pub mod ledger;
pub mod persist;
pub mod rng;
pub mod session;
pub mod view;
pub mod window;

pub use cache::{Cache, CacheStore, Coin, MementoError};
pub use coord::{CellId, CoordError, Grid, Position};
pub use ledger::CoinLedger;
pub use persist::{KeyValueStore, MemoryStore, PersistenceBridge, PersistError, PlayerRecord};
pub use rng::GameRng;
pub use session::{CacheSummary, Direction, GameConfig, GameError, GameSession};
pub use view::{MarkerHandle, NullView, WorldView};
pub use window::{CacheLimiter, VisibilityWindow, VisibleSet};
