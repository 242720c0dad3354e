// crates/geobed-core/src/search/forward.rs

//! Free text → best matching city.

use super::query::Query;
use super::rules;
use crate::index::{merge_ranges, NameIndex};
use crate::model::{City, CountryTable};
use crate::store::CityStore;
use serde::Serialize;
use tracing::trace;

/// Population at which a candidate earns the small-town bonus when no
/// country was named.
pub const POPULATION_BONUS_FLOOR: u32 = 1000;

/// The winning candidate of a forward lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeocodeMatch<'a> {
    pub city: &'a City,
    /// Position in the city store.
    pub position: usize,
    pub score: u32,
    /// `true` when the candidate was picked by the `"City, ST"` shortcut.
    pub exact: bool,
}

/// Runs a forward lookup.
///
/// Only candidates that hit at least one scoring rule are kept, and only
/// those can earn the population prior. Returns `None` for empty input and
/// when nothing was kept. Candidates are visited in ascending store
/// position; ties go to the larger population, then to the lower position.
pub fn geocode<'a>(
    store: &'a CityStore,
    countries: &CountryTable,
    index: &NameIndex,
    input: &str,
) -> Option<GeocodeMatch<'a>> {
    let query = Query::parse(input, countries)?;

    // The unstripped input adds its first letter's bucket back when a
    // leading word was taken as a state code.
    let ranges = merge_ranges(
        query
            .tokens
            .iter()
            .chain(std::iter::once(&query.input_folded))
            .map(|t| index.range_for_token(t, store.len()))
            .collect(),
    );

    // (position, rule score, total with population prior)
    let mut scored: Vec<(usize, u32, u32)> = Vec::new();
    // First candidate holding the largest population.
    let mut most_populous: Option<(usize, u32)> = None;

    for pos in ranges.into_iter().flatten() {
        let city = &store[pos];

        if rules::is_exact_city_region(&query, city) {
            trace!(pos, name = %city.name, "exact city/region match");
            return Some(GeocodeMatch {
                city,
                position: pos,
                score: rules::score(&query, city),
                exact: true,
            });
        }

        let textual = rules::score(&query, city);
        if textual == 0 {
            continue;
        }
        let mut total = textual;
        if query.country.is_none() {
            if city.population >= POPULATION_BONUS_FLOOR {
                total += 1;
            }
            if city.population > most_populous.map_or(0, |(_, p)| p) {
                most_populous = Some((scored.len(), city.population));
            }
        }
        scored.push((pos, textual, total));
    }

    if let Some((slot, _)) = most_populous {
        scored[slot].2 += 1;
    }

    let (position, textual, score) = scored.into_iter().reduce(|best, cand| {
        let better = cand.2 > best.2
            || (cand.2 == best.2 && store[cand.0].population > store[best.0].population);
        if better {
            cand
        } else {
            best
        }
    })?;

    trace!(
        query = %query.text,
        position,
        textual,
        score,
        "forward lookup winner"
    );

    Some(GeocodeMatch {
        city: &store[position],
        position,
        score,
        exact: false,
    })
}
