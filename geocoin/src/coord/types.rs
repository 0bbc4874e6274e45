//! Coordinate types shared across the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by coordinate conversion and cell-key parsing.
#[derive(Debug, Error)]
pub enum CoordError {
    /// Latitude is NaN or infinite.
    #[error("Invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude is NaN or infinite.
    #[error("Invalid longitude: {0}")]
    InvalidLongitude(f64),

    /// A cell key string did not have the canonical `"i,j"` form.
    #[error("Malformed cell key: {0:?}")]
    MalformedKey(String),
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Position {
    /// Create a new position.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Identifier of one grid cell.
///
/// Cells are addressed by a pair of integers derived from latitude and
/// longitude (see [`Grid::cell_of`](super::Grid::cell_of)). The canonical
/// string form is `"i,j"` and is used both as the persistence key for a
/// cache and inside coin identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    /// Latitude-derived index.
    pub i: i64,
    /// Longitude-derived index.
    pub j: i64,
}

impl CellId {
    /// Create a new cell identifier.
    pub fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }

    /// The canonical `"i,j"` key for this cell.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.i, self.j)
    }
}

impl FromStr for CellId {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordError::MalformedKey(s.to_string());
        let (i, j) = s.split_once(',').ok_or_else(malformed)?;
        Ok(Self {
            i: i.trim().parse().map_err(|_| malformed())?,
            j: j.trim().parse().map_err(|_| malformed())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_key_format() {
        let cell = CellId::new(3698949380, -12206277129);
        assert_eq!(cell.key(), "3698949380,-12206277129");
    }

    #[test]
    fn test_cell_key_parses_back() {
        let cell = CellId::new(-42, 17);
        let parsed: CellId = cell.key().parse().unwrap();
        assert_eq!(parsed, cell);
    }

    #[test]
    fn test_malformed_key_is_rejected() {
        for bad in ["", "12", "a,b", "1,2,3", "1;2"] {
            let result: Result<CellId, _> = bad.parse();
            assert!(
                matches!(result, Err(CoordError::MalformedKey(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_position_display() {
        let pos = Position::new(36.98949379578401, -122.06277128548504);
        assert_eq!(pos.to_string(), "(36.989494, -122.062771)");
    }
}
