// crates/geobed-core/src/search/reverse.rs

//! Coordinates → nearest known city, by shared geohash prefix.

use crate::geohash::{self, shared_prefix_len};
use crate::index::GeohashIndex;
use crate::model::City;
use crate::store::CityStore;
use serde::Serialize;

/// Candidates must share at least this many leading characters.
pub const CELL_PREFIX: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReverseMatch<'a> {
    pub city: &'a City,
    pub position: usize,
    /// Leading geohash characters shared with the query point.
    pub shared_prefix: usize,
}

/// `true` for finite coordinates inside the WGS84 range.
pub fn is_valid_point(lat: f64, lng: f64) -> bool {
    lat.is_finite() && lng.is_finite() && lat.abs() <= 90.0 && lng.abs() <= 180.0
}

/// Finds the city whose geohash shares the longest prefix with the point.
///
/// Only the point's two-character cell is examined. Ties go to the larger
/// population, then to the lower store position. `None` for invalid points,
/// for the origin (unknown-location sentinel) and for empty cells.
pub fn reverse_geocode<'a>(
    store: &'a CityStore,
    index: &GeohashIndex,
    lat: f64,
    lng: f64,
) -> Option<ReverseMatch<'a>> {
    if !is_valid_point(lat, lng) {
        return None;
    }
    let target = geohash::encode(lat, lng);
    if target == geohash::ORIGIN {
        return None;
    }

    let cities = store.as_slice();
    let mut best: Option<ReverseMatch<'a>> = None;
    for &position in index.bucket(cities, &target[..CELL_PREFIX]) {
        let city = &cities[position];
        let shared = shared_prefix_len(&city.geohash, &target);

        let better = match &best {
            None => true,
            Some(b) => {
                (shared, city.population, std::cmp::Reverse(position))
                    > (b.shared_prefix, b.city.population, std::cmp::Reverse(b.position))
            }
        };
        if better {
            best = Some(ReverseMatch {
                city,
                position,
                shared_prefix: shared,
            });
        }
    }
    best
}
