//! Coin identity and minting.
//!
//! A coin is identified by the cell of the cache it was minted in plus a
//! per-cache serial number. The combined id (`"i:j#serial"`) is globally
//! unique; the serial alone is unique only within one cache.

use crate::coord::CellId;

/// A single coin held by a cache.
///
/// `origin` is a plain cell identifier, not a reference to the cache object:
/// it exists for serialization bookkeeping and never controls the origin
/// cache's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    /// Globally unique identifier, `"i:j#serial"`.
    pub id: String,
    /// Serial number within the minting cache.
    pub serial: u32,
    /// Cell of the cache this coin was minted in.
    pub origin: CellId,
}

impl Coin {
    /// Mint a coin for the given origin cell and serial.
    ///
    /// Deterministic: minting twice with the same arguments yields equal
    /// coins. Callers avoid accidental collisions by continuing serials from
    /// the cache's current coin count.
    pub fn mint(origin: CellId, serial: u32) -> Self {
        Self {
            id: coin_id(origin, serial),
            serial,
            origin,
        }
    }
}

/// Derive the globally unique coin id for an origin cell and serial.
pub fn coin_id(origin: CellId, serial: u32) -> String {
    format!("{}:{}#{}", origin.i, origin.j, serial)
}
