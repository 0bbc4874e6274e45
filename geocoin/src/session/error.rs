//! Session-level error type.

use thiserror::Error;

use crate::cache::MementoError;
use crate::coord::CoordError;
use crate::persist::PersistError;

/// Errors surfaced by game session operations.
///
/// Each variant aborts only the single operation that raised it; the
/// session validates before mutating, so no partial update is left behind.
#[derive(Debug, Error)]
pub enum GameError {
    /// Coordinate indexing failed (non-finite input).
    #[error("Coordinate indexing failed: {0}")]
    Coord(#[from] CoordError),

    /// A cache memento could not be encoded or decoded.
    #[error("Cache memento failed: {0}")]
    Memento(#[from] MementoError),

    /// Persisted state could not be read.
    #[error("Persisted state unreadable: {0}")]
    Persist(#[from] PersistError),
}
