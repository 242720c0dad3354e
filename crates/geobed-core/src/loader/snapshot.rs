// crates/geobed-core/src/loader/snapshot.rs

//! # Snapshots
//!
//! Whole-structure bincode dumps of the city store, the country table and
//! the name index, so a restart can skip re-ingesting the raw feeds.
//!
//! Every file starts with a small header; a wrong magic, version or
//! kind is a decode failure and makes the caller rebuild. The header also
//! carries the id of the build that wrote it. The three files of one
//! [`store_all`] share an id, and [`restore`] refuses a mixed set.

use super::common_io;
use crate::error::{GeoError, Result};
use crate::index::NameIndex;
use crate::model::CountryTable;
use crate::store::CityStore;
use bincode::Options;
use flate2::{write::GzEncoder, Compression};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Bump whenever a persisted type changes shape.
pub const SNAPSHOT_VERSION: u32 = 2;

const MAGIC: [u8; 4] = *b"GBED";

/// Guards against garbage length prefixes in a corrupt file.
const SIZE_LIMIT: u64 = 4 * 1024 * 1024 * 1024;

pub const CITIES_FILE: &str = "cities.bin";
pub const COUNTRIES_FILE: &str = "countries.bin";
pub const NAME_INDEX_FILE: &str = "name_index.bin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl Default for CompressionMode {
    fn default() -> Self {
        if cfg!(feature = "compact") {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    Cities,
    Countries,
    NameIndex,
}

impl SnapshotKind {
    fn tag(self) -> u8 {
        match self {
            SnapshotKind::Cities => 1,
            SnapshotKind::Countries => 2,
            SnapshotKind::NameIndex => 3,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct SnapshotHeader {
    magic: [u8; 4],
    version: u32,
    kind: u8,
    build_id: u64,
}

impl SnapshotHeader {
    fn new(kind: SnapshotKind, build_id: u64) -> Self {
        Self {
            magic: MAGIC,
            version: SNAPSHOT_VERSION,
            kind: kind.tag(),
            build_id,
        }
    }
}

/// Identifies one [`store_all`] call: the low bits of wall-clock
/// nanoseconds mixed with the process id.
fn new_build_id() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64);
    nanos ^ (u64::from(std::process::id()) << 32)
}

fn options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(SIZE_LIMIT)
}

/// The three fixed snapshot locations inside a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub cities: PathBuf,
    pub countries: PathBuf,
    pub name_index: PathBuf,
}

impl SnapshotPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            cities: dir.join(CITIES_FILE),
            countries: dir.join(COUNTRIES_FILE),
            name_index: dir.join(NAME_INDEX_FILE),
        }
    }
}

/// Writes one snapshot. The bytes go to `<path>.tmp` first and are renamed
/// into place, so a crash never leaves a truncated file under the real name.
pub fn save<T: Serialize>(
    path: &Path,
    kind: SnapshotKind,
    build_id: u64,
    value: &T,
    compression: CompressionMode,
) -> Result<()> {
    let tmp = tmp_path(path);
    let written = File::create(&tmp)
        .map_err(GeoError::Io)
        .and_then(|file| {
            let writer = BufWriter::new(file);
            match compression {
                CompressionMode::Gzip => {
                    let mut encoder = GzEncoder::new(writer, Compression::default());
                    write_payload(&mut encoder, SnapshotHeader::new(kind, build_id), value)?;
                    encoder.finish()?.flush()?;
                }
                CompressionMode::None => {
                    let mut writer = writer;
                    write_payload(&mut writer, SnapshotHeader::new(kind, build_id), value)?;
                    writer.flush()?;
                }
            }
            Ok(())
        });

    match written {
        Ok(()) => {
            fs::rename(&tmp, path)?;
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn write_payload<W: Write, T: Serialize>(
    writer: &mut W,
    header: SnapshotHeader,
    value: &T,
) -> Result<()> {
    options().serialize_into(&mut *writer, &header)?;
    options().serialize_into(&mut *writer, value)?;
    Ok(())
}

/// Reads one snapshot, gunzipping when needed. Returns the build id from
/// its header along with the value.
pub fn load<T: DeserializeOwned>(path: &Path, kind: SnapshotKind) -> Result<(u64, T)> {
    let mut reader = common_io::open_stream(path)?;

    let header: SnapshotHeader = options().deserialize_from(&mut reader)?;
    let expected = SnapshotHeader::new(kind, header.build_id);
    if header != expected {
        return Err(GeoError::InvalidData(format!(
            "{}: snapshot header {:?} does not match {:?}",
            path.display(),
            header,
            expected
        )));
    }

    Ok((header.build_id, options().deserialize_from(&mut reader)?))
}

/// Restores all three structures and checks they belong together.
pub fn restore(paths: &SnapshotPaths) -> Result<(CityStore, CountryTable, NameIndex)> {
    let (build_id, cities): (u64, CityStore) = load(&paths.cities, SnapshotKind::Cities)?;
    let (countries_id, countries): (u64, CountryTable) =
        load(&paths.countries, SnapshotKind::Countries)?;
    let (index_id, name_index): (u64, NameIndex) =
        load(&paths.name_index, SnapshotKind::NameIndex)?;

    if countries_id != build_id || index_id != build_id {
        return Err(GeoError::InvalidData(format!(
            "snapshots come from different builds ({build_id:#x}, {countries_id:#x}, {index_id:#x})"
        )));
    }

    if cities.is_empty() {
        return Err(GeoError::InvalidData("city snapshot is empty".into()));
    }
    if !cities.is_sorted() {
        return Err(GeoError::InvalidData("city snapshot is not sorted".into()));
    }
    if !name_index.is_consistent_with(cities.len()) {
        return Err(GeoError::InvalidData(
            "name index points past the city snapshot".into(),
        ));
    }
    Ok((cities, countries, name_index))
}

/// Overwrites all three snapshots under a fresh build id.
pub fn store_all(
    paths: &SnapshotPaths,
    cities: &CityStore,
    countries: &CountryTable,
    name_index: &NameIndex,
    compression: CompressionMode,
) -> Result<()> {
    store_set(paths, new_build_id(), cities, countries, name_index, compression)
}

fn store_set(
    paths: &SnapshotPaths,
    build_id: u64,
    cities: &CityStore,
    countries: &CountryTable,
    name_index: &NameIndex,
    compression: CompressionMode,
) -> Result<()> {
    save(&paths.cities, SnapshotKind::Cities, build_id, cities, compression)?;
    save(&paths.countries, SnapshotKind::Countries, build_id, countries, compression)?;
    save(&paths.name_index, SnapshotKind::NameIndex, build_id, name_index, compression)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
