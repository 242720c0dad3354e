//! Error handling example for geobed-rs
//!
//! This example demonstrates proper error handling and edge cases

use geobed_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== geobed-rs Error Handling Example ===\n");

    // Example 1: Build errors are real errors
    println!("--- Example 1: Missing raw feeds ---");
    let empty_dir = std::env::temp_dir().join("geobed-demo-missing");
    let config = GeobedConfig::default()
        .with_data_dir(&empty_dir)
        .with_fetch(false)
        .with_snapshots(false);
    match Geobed::new(&config) {
        Ok(_) => println!("✓ Unexpectedly found data in {}", empty_dir.display()),
        Err(GeoError::NotFound(msg)) => println!("✓ Reported as not found: {msg}"),
        Err(e) => println!("✓ Reported: {e}"),
    }
    println!();

    // Queries never fail; an in-memory engine is enough to show it.
    let geobed = Geobed::from_parts(
        vec![
            City::new("Austin", "US", "TX", 30.26715, -97.74306, 931_830),
            City::new("Paris", "FR", "11", 48.85341, 2.3488, 2_138_551),
        ],
        vec![],
    );

    // Example 2: Empty input
    println!("--- Example 2: Empty and blank queries ---");
    for query in ["", "   ", ","] {
        let city = geobed.geocode(query);
        println!("{query:?} → empty record: {}", city.is_empty());
    }
    println!();

    // Example 3: No evidence
    println!("--- Example 3: Text matching nothing ---");
    match geobed.geocode_match("Atlantis") {
        Some(m) => println!("Matched {} with score {}", m.city.name(), m.score),
        None => println!("✓ No match for \"Atlantis\""),
    }
    println!();

    // Example 4: Degenerate coordinates
    println!("--- Example 4: Degenerate coordinates ---");
    for (lat, lng) in [(0.0, 0.0), (f64::NAN, 1.0), (123.0, 45.0), (-33.87, 151.21)] {
        match geobed.reverse_match(lat, lng) {
            Some(m) => println!("({lat}, {lng}) → {}", m.city.name()),
            None => println!("({lat}, {lng}) → no city"),
        }
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
