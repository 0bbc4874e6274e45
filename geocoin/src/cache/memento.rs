//! Cache memento wire format.
//!
//! A memento is an opaque JSON string encoding a cache's coin collection:
//!
//! ```json
//! {"coins":[{"id":"1:2#0","serial":0,"originId":"1,2"}]}
//! ```
//!
//! The cache's own identity and position are not encoded; both are
//! re-derivable from the cell key the memento is stored under. There is no
//! version field; a reader treating absence as version 0 stays compatible.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while encoding or decoding a memento.
#[derive(Debug, Error)]
pub enum MementoError {
    /// The memento string is not valid JSON of the expected shape.
    #[error("Malformed cache memento: {0}")]
    Json(#[from] serde_json::Error),

    /// Restore was asked for a cell with no registered cache.
    #[error("No cache registered for cell {0}")]
    UnknownCell(crate::coord::CellId),
}

/// Serialized form of a cache's coin collection.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CacheMemento {
    pub coins: Vec<CoinRecord>,
}

/// Serialized form of a single coin.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CoinRecord {
    pub id: String,
    pub serial: u32,
    #[serde(rename = "originId")]
    pub origin_id: String,
}

impl CacheMemento {
    pub(crate) fn encode(&self) -> Result<String, MementoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub(crate) fn decode(blob: &str) -> Result<Self, MementoError> {
        Ok(serde_json::from_str(blob)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_field_names() {
        let memento = CacheMemento {
            coins: vec![CoinRecord {
                id: "1:2#0".to_string(),
                serial: 0,
                origin_id: "1,2".to_string(),
            }],
        };
        let blob = memento.encode().unwrap();
        assert_eq!(blob, r#"{"coins":[{"id":"1:2#0","serial":0,"originId":"1,2"}]}"#);
    }

    #[test]
    fn test_decode_empty_collection() {
        let memento = CacheMemento::decode(r#"{"coins":[]}"#).unwrap();
        assert!(memento.coins.is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(CacheMemento::decode("not json").is_err());
        assert!(CacheMemento::decode(r#"{"coins":"nope"}"#).is_err());
    }
}
