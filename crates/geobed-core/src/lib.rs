// crates/geobed-core/src/lib.rs

//! # geobed-core
//!
//! Offline city geocoding. Free text goes to a city record via a scored,
//! prefix-bucketed scan; coordinates go to the nearest city by shared
//! geohash prefix. The corpus is built from the Geonames and MaxMind feeds
//! and cached as binary snapshots.
//!
//! ```no_run
//! use geobed_core::{Geobed, GeobedConfig, GeoSearch};
//!
//! let geobed = Geobed::new(&GeobedConfig::from_env())?;
//! let austin = geobed.geocode("Austin, TX");
//! let nearby = geobed.reverse_geocode(austin.lat(), austin.lng());
//! assert_eq!(nearby.name(), austin.name());
//! # Ok::<(), geobed_core::GeoError>(())
//! ```

pub mod common;
pub mod config;
pub mod engine;
pub mod error;
pub mod geohash;
pub mod index;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod search;
pub mod store;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::DbStats;
pub use crate::config::{DataSource, DataSources, GeobedConfig};
pub use crate::engine::Geobed;
pub use crate::error::{GeoError, Result};
pub use crate::index::{GeohashIndex, NameIndex};
pub use crate::model::{City, Country, CountryTable};
pub use crate::search::{GeocodeMatch, ReverseMatch};
pub use crate::store::CityStore;
pub use crate::text::fold_key;
pub use crate::traits::{GeoSearch, NameMatch};
