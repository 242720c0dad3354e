//! geobed — offline geocoding from the terminal.
//!
//! Usage examples
//! --------------
//!
//! - Text to city
//!   $ geobed geocode Austin, TX
//!   $ geobed --json geocode paris france
//!
//! - Coordinate to city
//!   $ geobed reverse 48.8534 2.3488
//!
//! - Loaded data summary, country details
//!   $ geobed stats
//!   $ geobed country deu
//!
//! - Force a rebuild from the raw feeds
//!   $ geobed --data-dir ./geobed-data rebuild
//!
//! Data source
//! -----------
//!
//! The first run downloads the Geonames and MaxMind feeds into the data
//! directory (unless `--no-fetch`), builds the corpus and writes binary
//! snapshots next to them; later runs restore the snapshots.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use geobed_core::{City, GeoSearch, Geobed, GeobedConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let mut config = GeobedConfig::from_env();
    if let Some(dir) = &args.data_dir {
        config = config.with_data_dir(dir);
    }
    if args.no_fetch {
        config = config.with_fetch(false);
    }

    let geobed = match args.command {
        Commands::Rebuild => Geobed::build(&config),
        _ => Geobed::new(&config),
    }
    .with_context(|| format!("loading geocoder data from {}", config.data_dir.display()))?;
    tracing::debug!(stats = ?geobed.stats(), "geocoder ready");

    match args.command {
        Commands::Geocode { query } => {
            let text = query.join(" ");
            match geobed.geocode_match(&text) {
                Some(m) if args.json => println!("{}", serde_json::to_string_pretty(&m)?),
                Some(m) => {
                    print_city(m.city);
                    println!("  Score: {}{}", m.score, if m.exact { " (exact)" } else { "" });
                }
                None if args.json => println!("null"),
                None => eprintln!("No city found for: {text}"),
            }
        }

        Commands::Reverse { lat, lng } => match geobed.reverse_match(lat, lng) {
            Some(m) if args.json => println!("{}", serde_json::to_string_pretty(&m)?),
            Some(m) => {
                print_city(m.city);
                println!("  Shared geohash prefix: {}", m.shared_prefix);
            }
            None if args.json => println!("null"),
            None => eprintln!("No city found near ({lat}, {lng})"),
        },

        Commands::Stats | Commands::Rebuild => {
            let stats = geobed.stats();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Geocoder statistics:");
                println!("  Countries: {}", stats.countries);
                println!("  Cities: {}", stats.cities);
                println!("  Geohashed cities: {}", stats.geohashed);
                println!("  Name index keys: {}", stats.index_keys);
            }
        }

        Commands::Country { code } => match geobed.find_country_by_code(&code) {
            Some(c) if args.json => println!("{}", serde_json::to_string_pretty(c)?),
            Some(c) => {
                println!("Country: {}", c.name());
                println!("ISO2: {}", c.iso2());
                println!("ISO3: {}", c.iso3());
                println!("Capital: {}", c.capital().unwrap_or("-"));
                println!("Phone Code: {}", c.phone_code());
                println!("Currency: {}", c.currency());
                println!("Continent: {}", c.continent);
                println!("Population: {}", c.population());
                println!("Neighbours: {}", c.neighbours().collect::<Vec<_>>().join(", "));
            }
            None => eprintln!("No country found for: {code}"),
        },
    }

    Ok(())
}

/// Logs go to stderr so `--json` output stays parseable.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn,geobed_core=info",
        1 => "geobed_core=debug",
        _ => "geobed_core=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_city(city: &City) {
    println!("City: {}", city.name());
    println!("  Region: {}", city.region());
    println!("  Country: {}", city.country());
    println!("  Location: {}, {}", city.lat(), city.lng());
    println!("  Population: {}", city.population());
    println!("  Geohash: {}", city.geohash());
}
