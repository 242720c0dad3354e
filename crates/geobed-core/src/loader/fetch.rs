// crates/geobed-core/src/loader/fetch.rs

//! Downloads raw feeds that are missing from the data directory.
//!
//! No resume and no retry within the process: a failed download is logged,
//! the partial file removed, and the next start tries again from scratch.

use crate::config::{DataSource, GeobedConfig};
use crate::error::{GeoError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Fetches every configured feed whose file is absent.
///
/// Only failing to create the data directory is an error; individual
/// download failures are logged and left for the build to report.
pub fn fetch_missing(config: &GeobedConfig) -> Result<()> {
    fs::create_dir_all(&config.data_dir)?;

    let client = reqwest::blocking::Client::builder()
        // Feeds are hundreds of megabytes; never give up half way.
        .timeout(None::<std::time::Duration>)
        .build()
        .map_err(|e| GeoError::Fetch(e.to_string()))?;

    for source in config.sources.iter() {
        let path = config.source_path(source);
        if path.exists() {
            continue;
        }
        info!(id = %source.id, path = %path.display(), "feed missing, downloading");
        if let Err(e) = download(&client, source, &path) {
            warn!(
                id = %source.id,
                error = %e,
                "download failed, it will be retried on next start"
            );
            let _ = fs::remove_file(&path);
        }
    }
    Ok(())
}

fn download(client: &reqwest::blocking::Client, source: &DataSource, path: &Path) -> Result<()> {
    let mut response = client
        .get(&source.url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| GeoError::Fetch(format!("{}: {e}", source.url)))?;

    let mut out = BufWriter::new(File::create(path)?);
    let bytes = io::copy(&mut response, &mut out)?;
    out.flush()?;
    info!(id = %source.id, bytes, "download complete");
    Ok(())
}
