// crates/geobed-core/src/loader/geonames.rs

//! Geonames feeds: `cities1000` (tab-separated, usually zipped) and
//! `countryInfo.txt` (tab-separated, `#` comments).

use super::common_io;
use crate::error::Result;
use crate::model::{City, Country};
use crate::text::{parse_count, parse_or_zero};
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, trace};

pub const CITY_COLUMNS: usize = 19;
pub const COUNTRY_COLUMNS: usize = 19;

/// Parses one `cities1000` row.
///
/// Columns: id, name, asciiname, alternatenames, latitude, longitude,
/// feature class, feature code, country code, cc2, admin1..admin4,
/// population, elevation, dem, timezone, modification date.
pub fn parse_city_row(line: &str) -> Option<City> {
    let fields: Vec<&str> = line.splitn(CITY_COLUMNS, '\t').collect();
    if fields.len() != CITY_COLUMNS {
        return None;
    }

    let name = fields[1].trim();
    if name.is_empty() {
        return None;
    }

    let lat: f64 = parse_or_zero(fields[4]);
    let lng: f64 = parse_or_zero(fields[5]);
    let population: u32 = parse_or_zero(fields[14]);

    Some(City::new(name, fields[8], fields[10], lat, lng, population).with_alt_names(fields[3]))
}

/// Parses one country-info row; comments and blank lines yield `None`.
pub fn parse_country_row(line: &str) -> Option<Country> {
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let f: Vec<&str> = line.splitn(COUNTRY_COLUMNS, '\t').collect();
    if f.len() != COUNTRY_COLUMNS || f[0].is_empty() || f[0] == "0" {
        return None;
    }

    Some(Country {
        iso2: f[0].to_string(),
        iso3: f[1].to_string(),
        iso_numeric: parse_or_zero(f[2]),
        fips: f[3].to_string(),
        name: f[4].to_string(),
        capital: f[5].to_string(),
        area: parse_or_zero(f[6]),
        population: parse_count(f[7]),
        continent: f[8].to_string(),
        tld: f[9].to_string(),
        currency_code: f[10].to_string(),
        currency_name: f[11].to_string(),
        phone: f[12].to_string(),
        postal_code_format: f[13].to_string(),
        postal_code_regex: f[14].to_string(),
        languages: f[15].to_string(),
        geoname_id: parse_or_zero(f[16]),
        neighbours: f[17].to_string(),
        equivalent_fips: f[18].to_string(),
    })
}

/// Loads the cities feed, either the `.zip` archive (every file entry is
/// read) or an already extracted text file.
pub fn load_cities(path: &Path) -> Result<Vec<City>> {
    let mut cities = Vec::new();
    let mut skipped = 0usize;

    let is_zip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));

    if is_zip {
        let mut archive = zip::ZipArchive::new(common_io::open_file(path)?)?;
        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            debug!(entry = entry.name(), "reading geonames archive entry");
            read_city_rows(BufReader::new(entry), &mut cities, &mut skipped)?;
        }
    } else {
        read_city_rows(common_io::open_stream(path)?, &mut cities, &mut skipped)?;
    }

    info!(
        accepted = cities.len(),
        skipped,
        path = %path.display(),
        "loaded geonames cities"
    );
    Ok(cities)
}

fn read_city_rows<R: BufRead>(
    reader: R,
    cities: &mut Vec<City>,
    skipped: &mut usize,
) -> Result<()> {
    common_io::for_each_line(reader, |line| match parse_city_row(line) {
        Some(city) => cities.push(city),
        None => {
            trace!(line, "skipping geonames row");
            *skipped += 1;
        }
    })
}

pub fn load_countries(path: &Path) -> Result<Vec<Country>> {
    let mut countries = Vec::new();
    common_io::for_each_line(common_io::open_stream(path)?, |line| {
        if let Some(country) = parse_country_row(line) {
            countries.push(country);
        }
    })?;
    info!(countries = countries.len(), path = %path.display(), "loaded country info");
    Ok(countries)
}
