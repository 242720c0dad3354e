// crates/geobed-core/src/loader/maxmind.rs

//! MaxMind `worldcitiespop.txt.gz`: comma-separated
//! `Country,City,AccentCity,Region,Population,Latitude,Longitude`.
//!
//! The feed repeats the same city many times; rows are collapsed on
//! (country, city, population) before they are turned into records.

use super::common_io;
use crate::error::Result;
use crate::model::City;
use crate::text::parse_or_zero;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, trace};

pub const COLUMNS: usize = 7;

const HEADER_MARKER: &str = "AccentCity";
const FORBIDDEN: [char; 2] = ['!', '@'];

/// Composite dedup key. The separator keeps `("ab", "c")` and `("a", "bc")`
/// apart.
fn dedup_key(fields: &[&str]) -> String {
    format!("{}\u{1f}{}\u{1f}{}", fields[0], fields[1], fields[4])
}

/// Turns one (already deduplicated) row into a record.
pub fn parse_row(line: &str) -> Option<City> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != COLUMNS {
        return None;
    }
    if fields[0].is_empty() || fields[0] == "0" || fields[2] == HEADER_MARKER {
        return None;
    }

    // A few names come wrapped in parentheses.
    let name = fields[2]
        .trim_matches(' ')
        .trim_matches(|c: char| c == '(' || c == ' ' || c == ')');
    if name.is_empty() || name.contains(FORBIDDEN.as_slice()) {
        return None;
    }

    let population: u32 = parse_or_zero(fields[4]);
    let lat: f64 = parse_or_zero(fields[5]);
    let lng: f64 = parse_or_zero(fields[6]);

    Some(City::new(
        name,
        fields[0].to_ascii_uppercase(),
        fields[3],
        lat,
        lng,
        population,
    ))
}

/// Loads and deduplicates the feed.
///
/// The last row seen for a key wins, but the key keeps the position of its
/// first occurrence so the output order is reproducible. The dedup map is
/// dropped before the records are built.
pub fn load_cities(path: &Path) -> Result<Vec<City>> {
    let mut rows: Vec<String> = Vec::new();
    let mut total = 0usize;
    {
        let mut seen: HashMap<String, usize> = HashMap::new();
        common_io::for_each_line(common_io::open_stream(path)?, |line| {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != COLUMNS {
                return;
            }
            total += 1;
            match seen.get(&dedup_key(&fields)) {
                Some(&slot) => rows[slot] = line.to_string(),
                None => {
                    seen.insert(dedup_key(&fields), rows.len());
                    rows.push(line.to_string());
                }
            }
        })?;
    }

    let unique = rows.len();
    let cities: Vec<City> = rows
        .into_iter()
        .filter_map(|line| {
            let city = parse_row(&line);
            if city.is_none() {
                trace!(line = %line, "skipping maxmind row");
            }
            city
        })
        .collect();

    info!(
        rows = total,
        unique,
        accepted = cities.len(),
        path = %path.display(),
        "loaded maxmind world cities"
    );
    Ok(cities)
}
