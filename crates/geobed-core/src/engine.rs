// crates/geobed-core/src/engine.rs
use crate::common::DbStats;
use crate::index::{GeohashIndex, NameIndex};
use crate::model::{City, Country, CountryTable};
use crate::search::{self, GeocodeMatch, ReverseMatch};
use crate::store::CityStore;
use crate::traits::GeoSearch;

/// The geocoder: a sorted city store, the country table and the two
/// indexes over the store.
///
/// Everything is built once (see [`Geobed::new`]) and never mutated
/// afterwards, so a shared reference can be queried from any number of
/// threads.
#[derive(Debug, Clone)]
pub struct Geobed {
    pub(crate) cities: CityStore,
    pub(crate) countries: CountryTable,
    pub(crate) name_index: NameIndex,
    pub(crate) geohash_index: GeohashIndex,
}

impl Geobed {
    /// Builds an engine from in-memory records: sorts, drops nameless
    /// entries and indexes. No I/O.
    pub fn from_parts(cities: Vec<City>, countries: Vec<Country>) -> Self {
        let cities = CityStore::from_unsorted(cities);
        let name_index = NameIndex::build(&cities);
        Self::assemble(cities, CountryTable::new(countries), name_index)
    }

    /// Joins already built (or restored) structures and derives the geohash
    /// index.
    pub(crate) fn assemble(
        cities: CityStore,
        countries: CountryTable,
        name_index: NameIndex,
    ) -> Self {
        let geohash_index = GeohashIndex::build(&cities);
        Self {
            cities,
            countries,
            name_index,
            geohash_index,
        }
    }

    pub fn cities(&self) -> &CityStore {
        &self.cities
    }

    pub fn countries(&self) -> &CountryTable {
        &self.countries
    }

    pub fn name_index(&self) -> &NameIndex {
        &self.name_index
    }
}

impl GeoSearch for Geobed {
    fn stats(&self) -> DbStats {
        DbStats {
            countries: self.countries.len(),
            cities: self.cities.len(),
            index_keys: self.name_index.len(),
            geohashed: self.geohash_index.len(),
        }
    }

    fn find_country_by_iso2(&self, iso2: &str) -> Option<&Country> {
        self.countries.find_by_iso2(iso2)
    }

    fn find_country_by_code(&self, code: &str) -> Option<&Country> {
        self.countries.find_by_code(code)
    }

    fn geocode_match(&self, text: &str) -> Option<GeocodeMatch<'_>> {
        search::geocode(&self.cities, &self.countries, &self.name_index, text)
    }

    fn reverse_match(&self, lat: f64, lng: f64) -> Option<ReverseMatch<'_>> {
        search::reverse_geocode(&self.cities, &self.geohash_index, lat, lng)
    }
}
