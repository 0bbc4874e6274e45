//! Bounded visibility window around the player.
//!
//! The window computes which cells are close enough to the player to carry a
//! materialized cache, and the [`VisibleSet`] tracks which of those cells
//! currently have a marker in the world view. Reconciliation between the two
//! is driven by the game session; eviction above the cap lives in
//! [`limiter`].
//!
//! # Ordering
//!
//! Target cells are enumerated in a fixed raster order: latitude offset in
//! the outer loop, longitude offset in the inner loop, both ascending. Given
//! a fixed random source, generation over a window is therefore
//! reproducible, and the first cells to materialize are always the
//! lexicographically smallest offsets.

mod limiter;

pub use limiter::CacheLimiter;

use crate::coord::CellId;
use crate::view::MarkerHandle;

/// Square Chebyshev neighborhood of a configurable radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityWindow {
    radius: u32,
}

impl VisibilityWindow {
    /// Create a window extending `radius` cells in every direction.
    ///
    /// The neighborhood is a square of side `2 * radius + 1`.
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    /// The configured radius.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Whether `cell` lies within the window centered on `center`.
    ///
    /// Distance is Chebyshev (grid) distance.
    pub fn contains(&self, center: CellId, cell: CellId) -> bool {
        let di = (cell.i - center.i).unsigned_abs();
        let dj = (cell.j - center.j).unsigned_abs();
        di.max(dj) <= u64::from(self.radius)
    }

    /// Every cell of the window centered on `center`, in raster order.
    pub fn target_cells(&self, center: CellId) -> Vec<CellId> {
        let r = i64::from(self.radius);
        let side = (2 * r + 1) as usize;
        let mut cells = Vec::with_capacity(side * side);
        for di in -r..=r {
            for dj in -r..=r {
                cells.push(CellId::new(center.i + di, center.j + dj));
            }
        }
        cells
    }
}

/// One materialized cache: its cell and the marker the view handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleEntry {
    /// Cell of the materialized cache.
    pub cell: CellId,
    /// Handle of the marker shown for it.
    pub marker: MarkerHandle,
}

/// Insertion-ordered set of currently materialized caches.
///
/// Insertion order doubles as eviction order: the limiter removes
/// oldest-added entries first, and nothing re-orders an entry after
/// insertion.
#[derive(Debug, Default)]
pub struct VisibleSet {
    entries: Vec<VisibleEntry>,
}

impl VisibleSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of materialized caches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is materialized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `cell` is currently materialized.
    pub fn contains(&self, cell: CellId) -> bool {
        self.entries.iter().any(|entry| entry.cell == cell)
    }

    /// Record a newly materialized cell. Ignored if already present.
    pub fn insert(&mut self, cell: CellId, marker: MarkerHandle) {
        if !self.contains(cell) {
            self.entries.push(VisibleEntry { cell, marker });
        }
    }

    /// Remove a cell, returning its marker handle for retraction.
    pub fn remove(&mut self, cell: CellId) -> Option<MarkerHandle> {
        let index = self.entries.iter().position(|entry| entry.cell == cell)?;
        Some(self.entries.remove(index).marker)
    }

    /// Remove and return the oldest-added entry.
    pub fn pop_oldest(&mut self) -> Option<VisibleEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Remove every entry, yielding them in insertion order.
    pub fn drain(&mut self) -> impl Iterator<Item = VisibleEntry> + '_ {
        self.entries.drain(..)
    }

    /// Cells currently materialized, in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.entries.iter().map(|entry| entry.cell)
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &VisibleEntry> {
        self.entries.iter()
    }
}
