// crates/geobed-core/src/index.rs

//! # Indexes over the city store
//!
//! - [`NameIndex`]: approximate prefix buckets bounding forward-geocoding
//!   scans. Persisted alongside the store.
//! - [`GeohashIndex`]: store positions ordered by geohash, so the reverse
//!   geocoder can jump to a two-character cell. Cheap to derive, never
//!   persisted.
//!
//! Neither bracket is exact. Every consumer re-scores what it enumerates.

use crate::model::City;
use crate::store::CityStore;
use crate::text::prev_char;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

/// Highest store position reached by each 1- and 2-character name prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameIndex {
    bounds: BTreeMap<String, usize>,
}

impl NameIndex {
    /// Single pass over the sorted store. Equal prefixes are contiguous after
    /// the sort, so the last write for a key is its upper bound.
    pub fn build(store: &CityStore) -> Self {
        let mut bounds = BTreeMap::new();
        for (pos, city) in store.iter().enumerate() {
            let mut chars = city.name_folded.char_indices();
            let Some((_, first)) = chars.next() else {
                continue;
            };
            bounds.insert(first.to_string(), pos);
            if let Some((i, second)) = chars.next() {
                let end = i + second.len_utf8();
                bounds.insert(city.name_folded[..end].to_string(), pos);
            }
        }
        Self { bounds }
    }

    /// Recorded upper bound (inclusive) for a prefix.
    pub fn bound(&self, prefix: &str) -> Option<usize> {
        self.bounds.get(prefix).copied()
    }

    /// Number of recorded prefixes.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Scan bracket for names starting with `prefix` in a store of `len`
    /// entries.
    ///
    /// Starts at the bound of the alphabetically previous prefix (last char
    /// stepped back one code point, 0 when unset) and ends just past this
    /// prefix's bound, or at `len` when it is unset. Always within
    /// `0..=len` and never inverted.
    pub fn range(&self, prefix: &str, len: usize) -> Range<usize> {
        let Some(last) = prefix.chars().last() else {
            return 0..len;
        };
        let end = self
            .bound(prefix)
            .map_or(len, |b| b.saturating_add(1))
            .min(len);

        let stem = &prefix[..prefix.len() - last.len_utf8()];
        let start = prev_char(last)
            .and_then(|p| self.bound(&format!("{stem}{p}")))
            .unwrap_or(0)
            .min(end);

        start..end
    }

    /// Bracket keyed on the first character of an already folded token.
    pub fn range_for_token(&self, folded_token: &str, len: usize) -> Range<usize> {
        match folded_token.chars().next() {
            Some(c) => {
                let mut buf = [0u8; 4];
                self.range(c.encode_utf8(&mut buf), len)
            }
            None => 0..0,
        }
    }

    /// A restored index must not point past the restored store.
    pub fn is_consistent_with(&self, len: usize) -> bool {
        self.bounds.values().all(|&b| b < len)
    }
}

/// Sorts and coalesces brackets so each position is visited once.
pub fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.retain(|r| !r.is_empty());
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for r in ranges {
        match merged.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }
    merged
}

/// Store positions of every geohashed city, ordered by (geohash, position).
#[derive(Clone, Debug, Default)]
pub struct GeohashIndex {
    positions: Vec<usize>,
}

impl GeohashIndex {
    pub fn build(store: &CityStore) -> Self {
        let cities = store.as_slice();
        let mut positions: Vec<usize> = (0..cities.len())
            .filter(|&p| !cities[p].geohash.is_empty())
            .collect();
        positions.sort_by(|&a, &b| cities[a].geohash.cmp(&cities[b].geohash).then(a.cmp(&b)));
        Self { positions }
    }

    /// Positions whose geohash starts with `prefix`, ascending by geohash.
    pub fn bucket<'a>(&'a self, cities: &[City], prefix: &str) -> &'a [usize] {
        let key = |p: &usize| cities[*p].geohash.as_str();
        let lo = self.positions.partition_point(|p| key(p) < prefix);
        let hi = lo
            + self.positions[lo..].partition_point(|p| key(p).starts_with(prefix));
        &self.positions[lo..hi]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
