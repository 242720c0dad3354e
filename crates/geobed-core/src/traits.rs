// crates/geobed-core/src/traits.rs
use crate::common::DbStats;
use crate::model::{City, Country};
use crate::search::{GeocodeMatch, ReverseMatch};
use crate::text::fold_key;
use std::borrow::Cow;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// This trait centralizes Unicode‑aware, accent-insensitive and case-insensitive
/// comparisons based on [`fold_key`]. Implementors provide a `&str` view of
/// their canonical name via [`NameMatch::name_str`] and get
/// [`NameMatch::is_named`], an equality test on the folded form.
///
/// Types that already store their folded key override
/// [`NameMatch::folded_name`] to skip the re-fold.
///
/// # Examples
/// ```rust
/// use geobed_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Łódź").is_named("lodz"));
/// assert!(Place("Zürich").is_named("ZURICH"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// The name after [`fold_key`].
    fn folded_name(&self) -> Cow<'_, str> {
        Cow::Owned(fold_key(self.name_str()))
    }

    /// Accent-insensitive and case-insensitive name comparison.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        *self.folded_name() == fold_key(q)
    }
}

/// Query surface of a built geocoder.
///
/// The `*_match` methods carry the evidence (score, shared prefix, store
/// position); the plain methods return an owned [`City`], falling back to
/// the empty sentinel record when there is no answer.
pub trait GeoSearch {
    fn stats(&self) -> DbStats;

    fn find_country_by_iso2(&self, iso2: &str) -> Option<&Country>;

    /// ISO-2 first, then ISO-3.
    fn find_country_by_code(&self, code: &str) -> Option<&Country>;

    /// Best city for free text such as `"Austin, TX"` or `"Paris, France"`.
    fn geocode_match(&self, text: &str) -> Option<GeocodeMatch<'_>>;

    /// Like [`GeoSearch::geocode_match`] but returns the record itself.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use geobed_core::{Geobed, GeoSearch};
    ///
    /// let geobed = Geobed::shared().unwrap();
    /// let city = geobed.geocode("New York, NY");
    /// println!("{} ({}, {})", city.name(), city.region(), city.country());
    /// ```
    fn geocode(&self, text: &str) -> City {
        self.geocode_match(text)
            .map(|m| m.city.clone())
            .unwrap_or_default()
    }

    /// Nearest city by geohash prefix.
    fn reverse_match(&self, lat: f64, lng: f64) -> Option<ReverseMatch<'_>>;

    /// Like [`GeoSearch::reverse_match`] but returns the record itself.
    fn reverse_geocode(&self, lat: f64, lng: f64) -> City {
        self.reverse_match(lat, lng)
            .map(|m| m.city.clone())
            .unwrap_or_default()
    }
}
