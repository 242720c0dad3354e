use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the engine.
///
/// Returned by [`GeoSearch::stats`](crate::GeoSearch::stats); counts reflect the
/// structures as built or restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub cities: usize,
    /// Number of 1- and 2-character prefixes in the name index.
    pub index_keys: usize,
    /// Cities with a usable geohash (reverse-geocodable).
    pub geohashed: usize,
}
