// crates/geobed-core/src/text.rs
use std::str::FromStr;

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// Scripts that `deunicode` cannot transliterate (the result is blank) fall
/// back to plain Unicode lowercasing, so a non-empty name never folds to an
/// empty key.
///
/// Both the stored city keys and the query tokens go through this function,
/// which keeps the name index buckets and the scoring comparisons in sync.
///
/// # Examples
///
/// ```rust
/// use geobed_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("NEW YORK"), "new york");
/// ```
pub fn fold_key(s: &str) -> String {
    let folded = deunicode::deunicode(s).to_lowercase();
    if folded.trim().is_empty() && !s.trim().is_empty() {
        return s.to_lowercase();
    }
    folded
}

/// Unicode case-insensitive equality without transliteration and without
/// allocating.
#[inline]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Parses a numeric column, degrading to zero (the type's default) when the
/// field is empty or malformed.
///
/// Feeds are dirty; a bad population or coordinate must not cost us the row.
pub fn parse_or_zero<T: FromStr + Default>(field: &str) -> T {
    field.trim().parse().unwrap_or_default()
}

/// Integer columns occasionally carry a float rendering (`"1.2E7"`,
/// `"1500.0"`); accept those too before giving up.
pub fn parse_count(field: &str) -> u64 {
    let field = field.trim();
    field.parse::<u64>().unwrap_or_else(|_| {
        field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
            .unwrap_or(0)
    })
}

/// The code point immediately before `c`, if it is a valid `char`.
pub fn prev_char(c: char) -> Option<char> {
    (c as u32).checked_sub(1).and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_key_transliterates_and_lowercases() {
        assert_eq!(fold_key("São Paulo"), "sao paulo");
        assert_eq!(fold_key("Straße"), "strasse");
        assert_eq!(fold_key("austin"), "austin");
    }

    #[test]
    fn fold_key_never_empties_a_name() {
        assert!(!fold_key("東京").trim().is_empty());
        assert_eq!(fold_key(""), "");
    }

    #[test]
    fn eq_ignore_case_handles_non_ascii() {
        assert!(eq_ignore_case("MÜNCHEN", "münchen"));
        assert!(eq_ignore_case("Paris", "PARIS"));
        assert!(!eq_ignore_case("Paris", "Pariss"));
    }

    #[test]
    fn numeric_fields_degrade_to_zero() {
        assert_eq!(parse_or_zero::<f64>("30.26715"), 30.26715);
        assert_eq!(parse_or_zero::<f64>(""), 0.0);
        assert_eq!(parse_or_zero::<u32>("n/a"), 0);
        assert_eq!(parse_count("1.001449E7"), 10_014_490);
        assert_eq!(parse_count("-5"), 0);
    }

    #[test]
    fn prev_char_steps_back_one_code_point() {
        assert_eq!(prev_char('b'), Some('a'));
        assert_eq!(prev_char('\0'), None);
        // U+E000 follows the surrogate block, so its predecessor is not a char.
        assert_eq!(prev_char('\u{E000}'), None);
    }
}
