use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for geobed
#[derive(Debug, Parser)]
#[command(
    name = "geobed",
    version,
    about = "Offline forward and reverse city geocoding"
)]
pub struct CliArgs {
    /// Directory holding the raw feeds and snapshots (default: $GEOBED_DATA_DIR or ./geobed-data)
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Never download missing feeds
    #[arg(long = "no-fetch", global = true)]
    pub no_fetch: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find the best city for free text, e.g. "Austin, TX"
    Geocode {
        /// Query words; joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Find the nearest city to a coordinate
    Reverse {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },

    /// Show a summary of the loaded data
    Stats,

    /// Lookup a country by ISO2 or ISO3 code
    Country {
        /// ISO2 or ISO3 code (e.g. DE, USA)
        code: String,
    },

    /// Rebuild from the raw feeds and overwrite the snapshots
    Rebuild,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_word_queries() {
        let args = CliArgs::parse_from(["geobed", "geocode", "New", "York,", "NY"]);
        match args.command {
            Commands::Geocode { query } => assert_eq!(query.join(" "), "New York, NY"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn reverse_accepts_negative_coordinates() {
        let args = CliArgs::parse_from(["geobed", "--json", "reverse", "30.26715", "-97.74306"]);
        assert!(args.json);
        match args.command {
            Commands::Reverse { lat, lng } => assert_eq!((lat, lng), (30.26715, -97.74306)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let args = CliArgs::parse_from(["geobed", "stats", "--no-fetch", "-vv", "-d", "/tmp/x"]);
        assert!(args.no_fetch);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
