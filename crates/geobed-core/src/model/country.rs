// crates/geobed-core/src/model/country.rs
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};

/// A row of the Geonames country-info feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub iso2: String,
    pub iso3: String,
    pub iso_numeric: u16,
    pub fips: String,
    pub name: String,
    pub capital: String,
    /// Square kilometres.
    pub area: f64,
    pub population: u64,
    pub continent: String,
    pub tld: String,
    pub currency_code: String,
    pub currency_name: String,
    pub phone: String,
    pub postal_code_format: String,
    pub postal_code_regex: String,
    /// Comma-separated language tags, e.g. `en-US,es-US`.
    pub languages: String,
    pub geoname_id: u32,
    /// Comma-separated ISO-2 codes.
    pub neighbours: String,
    pub equivalent_fips: String,
}

impl Country {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn iso2(&self) -> &str {
        &self.iso2
    }

    pub fn iso3(&self) -> &str {
        &self.iso3
    }

    pub fn capital(&self) -> Option<&str> {
        Some(self.capital.as_str()).filter(|s| !s.is_empty())
    }

    pub fn phone_code(&self) -> &str {
        &self.phone
    }

    pub fn currency(&self) -> &str {
        &self.currency_code
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn neighbours(&self) -> impl Iterator<Item = &str> {
        self.neighbours.split(',').filter(|s| !s.is_empty())
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.split(',').filter(|s| !s.is_empty())
    }
}

impl NameMatch for Country {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// Read-only country reference data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CountryTable {
    countries: Vec<Country>,
}

impl CountryTable {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn as_slice(&self) -> &[Country] {
        &self.countries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Country> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Find a country by ISO2 code, case-insensitive (e.g. "DE", "us").
    pub fn find_by_iso2(&self, iso2: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.iso2.eq_ignore_ascii_case(iso2))
    }

    /// ISO2 first, then ISO3.
    pub fn find_by_code(&self, code: &str) -> Option<&Country> {
        let code = code.trim();
        self.find_by_iso2(code).or_else(|| {
            self.countries
                .iter()
                .find(|c| c.iso3.eq_ignore_ascii_case(code))
        })
    }

    /// Accent- and case-insensitive lookup on the full name.
    pub fn find_by_name(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.is_named(name))
    }
}

impl<'a> IntoIterator for &'a CountryTable {
    type Item = &'a Country;
    type IntoIter = std::slice::Iter<'a, Country>;

    fn into_iter(self) -> Self::IntoIter {
        self.countries.iter()
    }
}
