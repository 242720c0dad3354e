// crates/geobed-core/src/search/mod.rs

//! # Search
//!
//! Forward (text → city) and reverse (coordinates → city) lookups over the
//! immutable store and its indexes. Both are plain functions; the engine
//! only supplies its structures.

pub mod forward;
pub mod query;
pub mod reverse;
pub mod rules;

pub use forward::{geocode, GeocodeMatch};
pub use query::Query;
pub use reverse::{reverse_geocode, ReverseMatch};
