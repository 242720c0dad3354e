// crates/geobed-core/src/loader/mod.rs

//! # Data Loader
//!
//! Gets a [`Geobed`] into memory: restore the snapshots when they are
//! usable, otherwise ingest the raw feeds (downloading them first when
//! allowed), sort, index and write fresh snapshots.

use crate::config::GeobedConfig;
use crate::engine::Geobed;
use crate::error::Result;
use crate::index::NameIndex;
use crate::model::CountryTable;
use crate::store::CityStore;
use once_cell::sync::OnceCell;
use std::time::Instant;
use tracing::{info, warn};

pub mod common_io;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod geonames;
pub mod maxmind;
pub mod snapshot;

use snapshot::{CompressionMode, SnapshotPaths};

static GEOBED: OnceCell<Geobed> = OnceCell::new();

impl Geobed {
    /// Restores from snapshots, or rebuilds from the raw feeds when any
    /// snapshot is missing, undecodable or inconsistent.
    pub fn new(config: &GeobedConfig) -> Result<Self> {
        if config.use_snapshots {
            let paths = SnapshotPaths::in_dir(&config.data_dir);
            let started = Instant::now();
            match snapshot::restore(&paths) {
                Ok((cities, countries, name_index)) => {
                    info!(
                        cities = cities.len(),
                        countries = countries.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "restored snapshots"
                    );
                    return Ok(Self::assemble(cities, countries, name_index));
                }
                Err(e) => warn!(error = %e, "snapshots unusable, rebuilding"),
            }
        }
        Self::build(config)
    }

    /// Always rebuilds from the raw feeds, then overwrites the snapshots
    /// (when enabled). A snapshot write failure is logged, not returned.
    pub fn build(config: &GeobedConfig) -> Result<Self> {
        let started = Instant::now();

        #[cfg(feature = "fetch")]
        if config.fetch_missing {
            fetch::fetch_missing(config)?;
        }

        let (cities, countries) = load_feeds(config)?;
        let name_index = NameIndex::build(&cities);
        info!(
            cities = cities.len(),
            countries = countries.len(),
            index_keys = name_index.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built geocoder from raw feeds"
        );

        if config.use_snapshots {
            let paths = SnapshotPaths::in_dir(&config.data_dir);
            let compression = CompressionMode::default();
            if let Err(e) =
                snapshot::store_all(&paths, &cities, &countries, &name_index, compression)
            {
                warn!(error = %e, "could not write snapshots");
            }
        }

        Ok(Self::assemble(cities, countries, name_index))
    }

    /// The process-wide instance, built on first use from
    /// [`GeobedConfig::from_env`].
    ///
    /// A failed initialisation is returned to the caller and retried on the
    /// next call.
    pub fn shared() -> Result<&'static Geobed> {
        GEOBED.get_or_try_init(|| Self::new(&GeobedConfig::from_env()))
    }
}

/// Reads all configured feeds. Geonames cities and country info are
/// required; MaxMind is best effort.
fn load_feeds(config: &GeobedConfig) -> Result<(CityStore, CountryTable)> {
    let sources = &config.sources;

    let mut cities = geonames::load_cities(&config.source_path(&sources.geonames_cities))?;

    if let Some(source) = &sources.maxmind_cities {
        let path = config.source_path(source);
        match maxmind::load_cities(&path) {
            Ok(extra) => cities.extend(extra),
            Err(e) => warn!(error = %e, path = %path.display(), "skipping maxmind feed"),
        }
    }

    let countries = geonames::load_countries(&config.source_path(&sources.country_info))?;

    Ok((CityStore::from_unsorted(cities), CountryTable::new(countries)))
}
