//! Console world view.
//!
//! Announces what a map widget would render: caches appearing and leaving
//! view as the player moves. Popup content is not pushed through the view;
//! the play loop queries the session directly when the player looks around.

use std::collections::HashMap;

use geocoin::{CellId, MarkerHandle, Position, WorldView};

/// Terminal implementation of the rendering collaborator.
#[derive(Debug, Default)]
pub struct ConsoleView {
    next_handle: u64,
    markers: HashMap<MarkerHandle, CellId>,
    /// Suppresses per-marker output during bulk updates (session start).
    pub quiet: bool,
}

impl ConsoleView {
    /// Create a console view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of markers currently on the map.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

impl WorldView for ConsoleView {
    fn add_marker(&mut self, cell: CellId, _position: Position) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.markers.insert(handle, cell);
        if !self.quiet {
            println!("  a cache appeared at {cell}");
        }
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        if let Some(cell) = self.markers.remove(&handle) {
            if !self.quiet {
                println!("  the cache at {cell} left view");
            }
        }
    }

    fn set_player_marker(&mut self, _position: Position) {}

    fn set_trail(&mut self, _trail: &[Position]) {}

    fn center_on(&mut self, _position: Position) {}
}
