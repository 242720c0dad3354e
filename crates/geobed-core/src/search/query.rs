// crates/geobed-core/src/search/query.rs

//! Turns free text into the pieces the scoring rules look at.

use crate::model::{CountryTable, US_STATE_CODES};
use crate::text::{eq_ignore_case, fold_key};

/// A parsed forward-geocoding query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Working text after country/region stripping and trimming.
    pub text: String,
    /// [`fold_key`] of `text`.
    pub folded: String,
    /// [`fold_key`] of the whole input before any stripping. Keeps names
    /// that start with a state code (`"La Paz"`, `"De Aar"`) findable.
    pub input_folded: String,
    /// Folded whitespace tokens of `text`, trailing commas removed.
    pub tokens: Vec<String>,
    /// 2–3 character tokens of the raw input, as typed.
    pub abbreviations: Vec<String>,
    /// ISO-2 of a country whose name led or trailed the input.
    pub country: Option<String>,
    /// US state code found as a standalone token.
    pub region: Option<&'static str>,
}

impl Query {
    /// `None` for empty or whitespace-only input.
    pub fn parse(input: &str, countries: &CountryTable) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let abbreviations = input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| (2..=3).contains(&t.chars().count()))
            .map(str::to_string)
            .collect();

        let mut text = input.split_whitespace().collect::<Vec<_>>().join(" ");
        let input_folded = fold_key(text.trim_matches(|c: char| c == ' ' || c == ','));

        // Last match wins.
        let mut country = None;
        for c in countries {
            if c.name.is_empty() {
                continue;
            }
            if let Some(rest) = strip_country_name(&text, &c.name) {
                text = rest;
                country = Some(c.iso2.clone());
            }
        }

        // Codes only; full state names collide with city names.
        let mut region = None;
        for (code, _) in US_STATE_CODES {
            if let Some(rest) = strip_region_code(&text, code) {
                text = rest;
                region = Some(*code);
            }
        }

        let text = text
            .trim_matches(|c: char| c == ' ' || c == ',')
            .to_string();
        let tokens = text
            .split_whitespace()
            .map(|t| t.trim_end_matches(','))
            .filter(|t| !t.is_empty())
            .map(fold_key)
            .collect();

        Some(Self {
            folded: fold_key(&text),
            input_folded,
            text,
            tokens,
            abbreviations,
            country,
            region,
        })
    }

    /// Abbreviations exactly two characters long; only these score.
    pub fn two_letter_abbreviations(&self) -> impl Iterator<Item = &str> {
        self.abbreviations
            .iter()
            .map(String::as_str)
            .filter(|a| a.chars().count() == 2)
    }
}

/// Removes `name` when it leads (`"France, Paris"`, `"France Paris"`) or
/// trails (`"Paris, France"`, `"Paris France"`) the text. A text that *is*
/// the name is left alone.
pub fn strip_country_name(text: &str, name: &str) -> Option<String> {
    let mut out = text;
    let mut matched = false;

    if let Some(rest) = strip_prefix_ignore_case(out, name) {
        let after_comma = rest.strip_prefix(',').unwrap_or(rest);
        if after_comma.starts_with(char::is_whitespace) {
            out = after_comma.trim_start();
            matched = true;
        }
    }

    if let Some(before) = strip_suffix_ignore_case(out, name) {
        if before.ends_with(char::is_whitespace) {
            let before = before.trim_end();
            out = before.strip_suffix(',').unwrap_or(before);
            matched = true;
        }
    }

    matched.then(|| out.to_string())
}

/// Removes every standalone occurrence of a region code: leading or in the
/// middle (optionally followed by one comma), or trailing. A text that *is*
/// the code is left alone.
pub fn strip_region_code(text: &str, code: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let last = words.len().saturating_sub(1);

    let mut matched = false;
    let kept: Vec<&str> = words
        .iter()
        .enumerate()
        .filter(|&(i, word)| {
            let hit = if i < last {
                word.strip_suffix(',')
                    .unwrap_or(word)
                    .eq_ignore_ascii_case(code)
            } else {
                i > 0 && word.eq_ignore_ascii_case(code)
            };
            matched |= hit;
            !hit
        })
        .map(|(_, word)| *word)
        .collect();

    matched.then(|| kept.join(" "))
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    eq_ignore_case(head, prefix).then(|| &text[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    let tail = text.get(split..)?;
    eq_ignore_case(tail, suffix).then(|| &text[..split])
}
