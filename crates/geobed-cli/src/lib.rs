//! geobed-cli
//! ==========
//!
//! Command-line interface for the `geobed-core` offline geocoder.
//!
//! This crate primarily provides a binary (`geobed`). The library target
//! exposes no API; it only gives the crate a rendered documentation page.
//!
//! Basic usage:
//!
//! ```text
//! geobed --help
//! geobed geocode New York, NY
//! geobed reverse 30.26715 -97.74306
//! geobed --json country fr
//! geobed --data-dir /var/lib/geobed rebuild
//! ```
//!
//! For programmatic access use the `geobed-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
