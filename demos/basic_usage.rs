//! Basic usage example for geobed-rs
//!
//! This example demonstrates how to:
//! - Build (or restore) the geocoder
//! - Turn free text into a city
//! - Turn coordinates into the nearest city
//! - Look up country reference data
//!
//! Set `GEOBED_DATA_DIR` to choose where feeds and snapshots live.

use geobed_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== geobed-rs Basic Usage Example ===\n");

    println!("Loading geocoder...");
    let start = std::time::Instant::now();
    let geobed = Geobed::new(&GeobedConfig::from_env())?;
    let stats = geobed.stats();
    println!(
        "✓ {} cities, {} countries in {:?}\n",
        stats.cities,
        stats.countries,
        start.elapsed()
    );

    // Example 1: Forward geocoding
    println!("--- Example 1: Text to city ---");
    for query in ["New York, NY", "Austin TX", "Paris, France", "paris tx", "München"] {
        let city = geobed.geocode(query);
        println!(
            "{query:>16} → {} ({}, {}) [{:.4}, {:.4}]",
            city.name(),
            city.region(),
            city.country(),
            city.lat(),
            city.lng()
        );
    }
    println!();

    // Example 2: Confidence signal
    println!("--- Example 2: Scores ---");
    for query in ["Springfield", "Springfield, MO", "Springfield, IL"] {
        match geobed.geocode_match(query) {
            Some(m) => println!(
                "{query:>16} → {}, {} score={} exact={}",
                m.city.name(),
                m.city.region(),
                m.score,
                m.exact
            ),
            None => println!("{query:>16} → no match"),
        }
    }
    println!();

    // Example 3: Reverse geocoding
    println!("--- Example 3: Coordinates to city ---");
    for (lat, lng) in [(30.26715, -97.74306), (51.5074, -0.1278), (35.6895, 139.6917)] {
        let city = geobed.reverse_geocode(lat, lng);
        println!("({lat:>8}, {lng:>9}) → {} ({})", city.name(), city.country());
    }
    println!();

    // Example 4: Country reference data
    println!("--- Example 4: Country lookup ---");
    if let Some(country) = geobed.find_country_by_code("DEU") {
        println!("Found: {}", country.name());
        println!("ISO2: {}", country.iso2());
        println!("Capital: {}", country.capital().unwrap_or("-"));
        println!("Phone code: {}", country.phone_code());
        println!("Currency: {}", country.currency());
        println!(
            "Neighbours: {}",
            country.neighbours().collect::<Vec<_>>().join(", ")
        );
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
