//! geobed prelude: bring common types and traits into scope for demos.

pub use crate::config::GeobedConfig;
pub use crate::engine::Geobed;
pub use crate::error::{GeoError, Result};
pub use crate::model::{City, Country};
pub use crate::search::{GeocodeMatch, ReverseMatch};
pub use crate::text::fold_key;
pub use crate::traits::{GeoSearch, NameMatch};
