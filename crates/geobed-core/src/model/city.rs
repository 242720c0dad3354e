// crates/geobed-core/src/model/city.rs
use crate::geohash;
use crate::text::fold_key;
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};

/// A city record, unified across the Geonames and MaxMind feeds.
///
/// `City::default()` is the sentinel "no result" record returned for empty
/// queries and degenerate coordinates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Display form.
    pub name: String,
    /// Search key, see [`fold_key`]. The store is sorted on this.
    pub name_folded: String,
    /// Raw comma-separated alternate names (Geonames only).
    pub alt_names: String,
    /// ISO-3166 alpha-2.
    pub country: String,
    /// Admin1 code (US state, ...).
    pub region: String,
    pub lat: f64,
    pub lng: f64,
    /// 0 when unknown.
    pub population: u32,
    /// 12 characters, empty when the coordinates are unknown.
    pub geohash: String,
}

impl City {
    /// Builds a record, deriving the search key and geohash.
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        region: impl Into<String>,
        lat: f64,
        lng: f64,
        population: u32,
    ) -> Self {
        let name = name.into();
        Self {
            name_folded: fold_key(&name),
            name,
            alt_names: String::new(),
            country: country.into(),
            region: region.into(),
            lat,
            lng,
            population,
            geohash: geohash::encode_known(lat, lng),
        }
    }

    pub fn with_alt_names(mut self, alt_names: impl Into<String>) -> Self {
        self.alt_names = alt_names.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn geohash(&self) -> &str {
        &self.geohash
    }

    /// Alternate names, split on commas and trimmed.
    pub fn alt_names(&self) -> impl Iterator<Item = &str> {
        self.alt_names
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `true` for the sentinel record.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl NameMatch for City {
    fn name_str(&self) -> &str {
        &self.name
    }

    fn folded_name(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed(&self.name_folded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_key_and_geohash() {
        let c = City::new("Zürich", "CH", "ZH", 47.36667, 8.55, 341_730);
        assert_eq!(c.name_folded, "zurich");
        assert_eq!(c.geohash.len(), geohash::PRECISION);
        assert!(!c.is_empty());
    }

    #[test]
    fn origin_coordinates_leave_geohash_empty() {
        let c = City::new("Nowhere", "XX", "", 0.0, 0.0, 0);
        assert!(c.geohash.is_empty());
    }

    #[test]
    fn alt_names_split_on_commas() {
        let c = City::new("Paris", "FR", "11", 48.85341, 2.3488, 2_138_551)
            .with_alt_names("Lutece, Parigi,,Paris City");
        let alts: Vec<_> = c.alt_names().collect();
        assert_eq!(alts, ["Lutece", "Parigi", "Paris City"]);
    }

    #[test]
    fn default_is_the_sentinel() {
        let c = City::default();
        assert!(c.is_empty());
        assert_eq!(c.population, 0);
    }
}
