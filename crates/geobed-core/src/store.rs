// crates/geobed-core/src/store.rs
use crate::model::City;
use serde::{Deserialize, Serialize};

/// The canonical city corpus, sorted ascending by [`City::name_folded`].
///
/// The ordering is what makes [`NameIndex`](crate::index::NameIndex) valid;
/// nothing mutates the store once it is built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CityStore {
    cities: Vec<City>,
}

impl CityStore {
    /// Drops nameless records and sorts the rest.
    ///
    /// The sort is stable, so equal keys keep their ingestion order and the
    /// same input always yields the same sequence.
    pub fn from_unsorted(mut cities: Vec<City>) -> Self {
        cities.retain(|c| !c.name.is_empty());
        cities.sort_by(|a, b| a.name_folded.cmp(&b.name_folded));
        Self { cities }
    }

    /// `true` when the ordering invariant holds (used to vet restored
    /// snapshots).
    pub fn is_sorted(&self) -> bool {
        self.cities
            .windows(2)
            .all(|w| w[0].name_folded <= w[1].name_folded)
    }

    pub fn as_slice(&self) -> &[City] {
        &self.cities
    }

    pub fn get(&self, pos: usize) -> Option<&City> {
        self.cities.get(pos)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, City> {
        self.cities.iter()
    }
}

impl std::ops::Index<usize> for CityStore {
    type Output = City;

    fn index(&self, pos: usize) -> &City {
        &self.cities[pos]
    }
}

impl<'a> IntoIterator for &'a CityStore {
    type Item = &'a City;
    type IntoIter = std::slice::Iter<'a, City>;

    fn into_iter(self) -> Self::IntoIter {
        self.cities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> Vec<City> {
        vec![
            City::new("paris", "US", "TX", 33.66094, -95.55551, 25_171),
            City::new("Austin", "US", "TX", 30.26715, -97.74306, 931_830),
            City::new("", "US", "TX", 1.0, 1.0, 5),
            City::new("Paris", "FR", "11", 48.85341, 2.3488, 2_138_551),
            City::new("Amsterdam", "NL", "07", 52.37403, 4.88969, 741_636),
        ]
    }

    #[test]
    fn sorts_by_folded_name_and_drops_nameless() {
        let store = CityStore::from_unsorted(raw());
        let names: Vec<_> = store.iter().map(City::name).collect();
        assert_eq!(names, ["Amsterdam", "Austin", "paris", "Paris"]);
        assert!(store.is_sorted());
    }

    #[test]
    fn rebuild_is_deterministic() {
        assert_eq!(CityStore::from_unsorted(raw()), CityStore::from_unsorted(raw()));
    }
}
