// crates/geobed-core/src/error.rs
use thiserror::Error;

/// Errors surfaced while building or restoring the engine.
///
/// Query operations never return these: degenerate input yields the empty
/// [`City`](crate::City) instead.
#[derive(Debug, Error)]
pub enum GeoError {
    /// A raw feed or data file is missing.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Data was readable but does not make sense (bad snapshot header,
    /// index pointing past the city store, ...).
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("download failed: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, GeoError>;
