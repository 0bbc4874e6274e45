//! World view collaborator interface.
//!
//! The core never renders anything itself. A frontend implements
//! [`WorldView`] over whatever map widget it uses (a browser map, a
//! terminal, a test recorder) and the session calls it to place and retract
//! markers. The core never reads rendering state back; marker handles exist
//! only so a marker added earlier can be removed later.

use crate::coord::{CellId, Position};

/// Opaque handle for a cache marker, minted by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Rendering collaborator driven by the game session.
pub trait WorldView {
    /// Show a marker for the cache at `cell`. The returned handle is passed
    /// back to [`WorldView::remove_marker`] when the cache leaves view.
    fn add_marker(&mut self, cell: CellId, position: Position) -> MarkerHandle;

    /// Retract a marker added earlier.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Move the player marker.
    fn set_player_marker(&mut self, position: Position);

    /// Replace the rendered movement trail.
    fn set_trail(&mut self, trail: &[Position]);

    /// Center the viewport on a position.
    fn center_on(&mut self, position: Position);
}

/// A view that renders nothing.
///
/// Useful for headless sessions and tests that only care about core state.
/// Handles are minted sequentially so retraction bookkeeping stays valid.
#[derive(Debug, Default)]
pub struct NullView {
    next_handle: u64,
}

impl NullView {
    /// Create a no-op view.
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorldView for NullView {
    fn add_marker(&mut self, _cell: CellId, _position: Position) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn remove_marker(&mut self, _handle: MarkerHandle) {}

    fn set_player_marker(&mut self, _position: Position) {}

    fn set_trail(&mut self, _trail: &[Position]) {}

    fn center_on(&mut self, _position: Position) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_view_mints_distinct_handles() {
        let mut view = NullView::new();
        let a = view.add_marker(CellId::new(0, 0), Position::new(0.0, 0.0));
        let b = view.add_marker(CellId::new(0, 1), Position::new(0.0, 0.0001));
        assert_ne!(a, b);
    }
}
