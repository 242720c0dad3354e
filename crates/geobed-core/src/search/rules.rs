// crates/geobed-core/src/search/rules.rs

//! Forward-geocoding score rules.
//!
//! Each rule counts how often its condition holds for a (query, city) pair;
//! the candidate's score is the weighted sum over [`RULES`]. All rules apply,
//! none short-circuits another.

use super::query::Query;
use crate::model::City;
use crate::text::eq_ignore_case;
use std::fmt;

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub weight: u32,
    pub hits: fn(&Query, &City) -> u32,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

impl Rule {
    #[inline]
    pub fn points(&self, query: &Query, city: &City) -> u32 {
        self.weight * (self.hits)(query, city)
    }
}

pub static RULES: &[Rule] = &[
    Rule {
        name: "exact_name",
        weight: 7,
        hits: exact_name,
    },
    Rule {
        name: "alt_name",
        weight: 5,
        hits: alt_name,
    },
    Rule {
        name: "alt_name_ignore_case",
        weight: 3,
        hits: alt_name_ignore_case,
    },
    Rule {
        name: "token_is_name",
        weight: 1,
        hits: token_is_name,
    },
    Rule {
        name: "token_in_name",
        weight: 2,
        hits: token_in_name,
    },
    Rule {
        name: "abbreviation_is_region",
        weight: 5,
        hits: abbreviation_is_region,
    },
    Rule {
        name: "abbreviation_is_country",
        weight: 3,
        hits: abbreviation_is_country,
    },
    Rule {
        name: "detected_country",
        weight: 4,
        hits: detected_country,
    },
    Rule {
        name: "detected_region",
        weight: 4,
        hits: detected_region,
    },
];

/// Textual score of one candidate, before the population prior.
pub fn score(query: &Query, city: &City) -> u32 {
    RULES.iter().map(|r| r.points(query, city)).sum()
}

/// `"City, ST"`, `"City ST"` or `"ST City"` naming exactly this city.
/// Such a candidate wins outright without scoring.
pub fn is_exact_city_region(query: &Query, city: &City) -> bool {
    query
        .region
        .is_some_and(|r| eq_ignore_case(r, &city.region))
        && query.folded == city.name_folded
}

fn count(hit: bool) -> u32 {
    u32::from(hit)
}

fn exact_name(q: &Query, c: &City) -> u32 {
    count(q.folded == c.name_folded || q.input_folded == c.name_folded)
}

fn alt_name(q: &Query, c: &City) -> u32 {
    c.alt_names().filter(|a| *a == q.text).count() as u32
}

fn alt_name_ignore_case(q: &Query, c: &City) -> u32 {
    c.alt_names().filter(|a| eq_ignore_case(a, &q.text)).count() as u32
}

fn token_is_name(q: &Query, c: &City) -> u32 {
    q.tokens.iter().filter(|t| **t == c.name_folded).count() as u32
}

fn token_in_name(q: &Query, c: &City) -> u32 {
    q.tokens
        .iter()
        .filter(|t| c.name_folded.contains(t.as_str()))
        .count() as u32
}

fn abbreviation_is_region(q: &Query, c: &City) -> u32 {
    if c.region.is_empty() {
        return 0;
    }
    q.two_letter_abbreviations()
        .filter(|a| eq_ignore_case(a, &c.region))
        .count() as u32
}

fn abbreviation_is_country(q: &Query, c: &City) -> u32 {
    if c.country.is_empty() {
        return 0;
    }
    q.two_letter_abbreviations()
        .filter(|a| eq_ignore_case(a, &c.country))
        .count() as u32
}

fn detected_country(q: &Query, c: &City) -> u32 {
    count(q.country.as_deref().is_some_and(|cc| eq_ignore_case(cc, &c.country)))
}

fn detected_region(q: &Query, c: &City) -> u32 {
    count(q.region.is_some_and(|r| eq_ignore_case(r, &c.region)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Country, CountryTable};

    fn countries() -> CountryTable {
        CountryTable::new(vec![Country {
            iso2: "FR".into(),
            name: "France".into(),
            ..Default::default()
        }])
    }

    fn q(text: &str) -> Query {
        Query::parse(text, &countries()).unwrap()
    }

    fn rule(name: &str) -> &'static Rule {
        RULES.iter().find(|r| r.name == name).unwrap()
    }

    fn paris_tx() -> City {
        City::new("Paris", "US", "TX", 33.66094, -95.55551, 25_171)
    }

    fn paris_fr() -> City {
        City::new("Paris", "FR", "11", 48.85341, 2.3488, 2_138_551)
            .with_alt_names("Lutetia,PARIS,Paname")
    }

    #[test]
    fn rule_names_are_unique() {
        for (i, r) in RULES.iter().enumerate() {
            assert!(RULES[i + 1..].iter().all(|o| o.name != r.name));
        }
    }

    #[test]
    fn exact_name_ignores_case_and_accents() {
        let r = rule("exact_name");
        assert_eq!(r.points(&q("PARIS"), &paris_fr()), 7);
        assert_eq!(r.points(&q("Pariss"), &paris_fr()), 0);
        let zurich = City::new("Zürich", "CH", "ZH", 47.36667, 8.55, 341_730);
        assert_eq!(r.points(&q("zurich"), &zurich), 7);
    }

    #[test]
    fn exact_name_sees_through_a_leading_state_code() {
        let r = rule("exact_name");
        let la_paz = City::new("La Paz", "BO", "04", -16.5, -68.15, 812_799);
        let query = q("La Paz");
        assert_eq!(query.text, "Paz");
        assert_eq!(r.points(&query, &la_paz), 7);

        let paz = City::new("Paz", "XX", "", 1.0, 1.0, 0);
        assert_eq!(r.points(&query, &paz), 7);
    }

    #[test]
    fn alternate_names_score_per_match() {
        let city = paris_fr();
        assert_eq!(rule("alt_name").points(&q("Paname"), &city), 5);
        assert_eq!(rule("alt_name").points(&q("paname"), &city), 0);
        assert_eq!(rule("alt_name_ignore_case").points(&q("paname"), &city), 3);
        // "Paris" hits the folded comparison once.
        assert_eq!(rule("alt_name_ignore_case").points(&q("paris"), &city), 3);
    }

    #[test]
    fn tokens_score_equality_and_containment() {
        let city = City::new("New York City", "US", "NY", 40.71427, -74.00597, 8_175_133);
        let query = q("new york");
        assert_eq!(rule("token_is_name").points(&query, &city), 0);
        assert_eq!(rule("token_in_name").points(&query, &city), 4);

        let query = q("paris");
        assert_eq!(rule("token_is_name").points(&query, &paris_tx()), 1);
        assert_eq!(rule("token_in_name").points(&query, &paris_tx()), 2);
    }

    #[test]
    fn two_letter_abbreviations_match_codes() {
        let query = q("Paris TX");
        assert_eq!(rule("abbreviation_is_region").points(&query, &paris_tx()), 5);
        assert_eq!(rule("abbreviation_is_region").points(&query, &paris_fr()), 0);

        let query = q("Paris fr");
        assert_eq!(rule("abbreviation_is_country").points(&query, &paris_fr()), 3);
        assert_eq!(rule("abbreviation_is_country").points(&query, &paris_tx()), 0);

        // three-letter tokens never score
        let query = q("Paris FRA");
        assert_eq!(rule("abbreviation_is_country").points(&query, &paris_fr()), 0);
    }

    #[test]
    fn detected_country_and_region() {
        let query = q("Paris, France");
        assert_eq!(rule("detected_country").points(&query, &paris_fr()), 4);
        assert_eq!(rule("detected_country").points(&query, &paris_tx()), 0);

        let query = q("Paris, TX");
        assert_eq!(rule("detected_region").points(&query, &paris_tx()), 4);
        assert_eq!(rule("detected_region").points(&query, &paris_fr()), 0);
    }

    #[test]
    fn score_sums_every_rule() {
        // exact 7 + token_is_name 1 + token_in_name 2 + abbreviation 5 + region 4
        assert_eq!(score(&q("Paris, TX"), &paris_tx()), 19);
        // exact 7 + alt folded 3 + tokens 3
        assert_eq!(score(&q("Paris, TX"), &paris_fr()), 13);
    }

    #[test]
    fn exact_city_region_needs_both_parts() {
        assert!(is_exact_city_region(&q("Paris, TX"), &paris_tx()));
        assert!(is_exact_city_region(&q("tx paris"), &paris_tx()));
        assert!(!is_exact_city_region(&q("Paris, TX"), &paris_fr()));
        assert!(!is_exact_city_region(&q("Paris"), &paris_tx()));
    }
}
