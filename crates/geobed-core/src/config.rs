// crates/geobed-core/src/config.rs

//! Engine configuration: where the raw feeds and snapshots live, where the
//! feeds come from, and which optional steps run.

use std::path::{Path, PathBuf};

/// Environment variable overriding [`GeobedConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "GEOBED_DATA_DIR";

pub const DEFAULT_DATA_DIR: &str = "./geobed-data";

pub const GEONAMES_CITIES_URL: &str = "http://download.geonames.org/export/dump/cities1000.zip";
pub const GEONAMES_COUNTRY_INFO_URL: &str = "http://download.geonames.org/export/dump/countryInfo.txt";
pub const MAXMIND_WORLD_CITIES_URL: &str =
    "http://download.maxmind.com/download/worldcities/worldcitiespop.txt.gz";

/// One raw feed: a download URL and the file name it is stored under in the
/// data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub id: String,
    pub url: String,
    pub file_name: String,
}

impl DataSource {
    pub fn new(id: impl Into<String>, url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            file_name: file_name.into(),
        }
    }

    pub fn path_in(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.file_name)
    }
}

/// The three feeds a build consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    /// Primary city feed (`.zip` archive or extracted `.txt`).
    pub geonames_cities: DataSource,
    pub country_info: DataSource,
    /// Secondary city feed; `None` builds from Geonames alone.
    pub maxmind_cities: Option<DataSource>,
}

impl DataSources {
    pub fn iter(&self) -> impl Iterator<Item = &DataSource> {
        [Some(&self.geonames_cities), Some(&self.country_info)]
            .into_iter()
            .chain(std::iter::once(self.maxmind_cities.as_ref()))
            .flatten()
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            geonames_cities: DataSource::new(
                "geonamesCities1000",
                GEONAMES_CITIES_URL,
                "cities1000.zip",
            ),
            country_info: DataSource::new(
                "geonamesCountryInfo",
                GEONAMES_COUNTRY_INFO_URL,
                "countryInfo.txt",
            ),
            maxmind_cities: Some(DataSource::new(
                "maxmindWorldCities",
                MAXMIND_WORLD_CITIES_URL,
                "worldcitiespop.txt.gz",
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeobedConfig {
    /// Holds the raw feeds and the snapshot files.
    pub data_dir: PathBuf,
    pub sources: DataSources,
    /// Download absent feeds before a rebuild. No effect without the
    /// `fetch` feature.
    pub fetch_missing: bool,
    /// Restore from snapshots on start and write them after a rebuild.
    pub use_snapshots: bool,
}

impl Default for GeobedConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            sources: DataSources::default(),
            fetch_missing: cfg!(feature = "fetch"),
            use_snapshots: true,
        }
    }
}

impl GeobedConfig {
    /// Defaults, with `GEOBED_DATA_DIR` honoured when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_fetch(mut self, fetch: bool) -> Self {
        self.fetch_missing = fetch;
        self
    }

    pub fn with_snapshots(mut self, use_snapshots: bool) -> Self {
        self.use_snapshots = use_snapshots;
        self
    }

    pub fn without_maxmind(mut self) -> Self {
        self.sources.maxmind_cities = None;
        self
    }

    pub fn source_path(&self, source: &DataSource) -> PathBuf {
        source.path_in(&self.data_dir)
    }
}
