//! Umbrella crate for the geobed workspace.
//!
//! Everything lives in [`geobed_core`]; this crate only re-exports it so the
//! demos can be run from the workspace root.

pub use geobed_core::*;
