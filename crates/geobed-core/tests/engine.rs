//! End-to-end: raw feeds on disk → built engine → snapshots → restored engine.

use flate2::write::GzEncoder;
use flate2::Compression;
use geobed_core::loader::snapshot::{CITIES_FILE, COUNTRIES_FILE, NAME_INDEX_FILE};
use geobed_core::{
    City, DataSource, DataSources, GeoError, GeoSearch, Geobed, GeobedConfig,
};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

const GEONAMES_TXT: &str = "cities1000.txt";
const GEONAMES_ZIP: &str = "cities1000.zip";
const COUNTRY_INFO: &str = "countryInfo.txt";
const MAXMIND: &str = "worldcitiespop.txt.gz";

fn geonames_row(
    id: u32,
    name: &str,
    alt: &str,
    lat: f64,
    lng: f64,
    cc: &str,
    admin1: &str,
    pop: u32,
) -> String {
    format!(
        "{id}\t{name}\t{name}\t{alt}\t{lat}\t{lng}\tP\tPPL\t{cc}\t\t{admin1}\t\t\t\t{pop}\t\t100\tEtc/UTC\t2024-01-01\n"
    )
}

fn geonames_feed() -> String {
    [
        geonames_row(1, "Austin", "AUS,Ostin", 30.26715, -97.74306, "US", "TX", 931_830),
        geonames_row(2, "Round Rock", "", 30.50826, -97.6789, "US", "TX", 109_821),
        geonames_row(3, "New York City", "NYC,New York", 40.71427, -74.00597, "US", "NY", 8_175_133),
        geonames_row(4, "York", "", 39.9626, -76.72774, "US", "PA", 43_718),
        geonames_row(5, "Paris", "Lutetia,Paname", 48.85341, 2.3488, "FR", "11", 2_138_551),
        geonames_row(6, "Paris", "", 33.66094, -95.55551, "US", "TX", 25_171),
        geonames_row(7, "Springfield", "", 39.80172, -89.64371, "US", "IL", 116_565),
        geonames_row(8, "Springfield", "", 37.21533, -93.29824, "US", "MO", 166_810),
        geonames_row(9, "Nowhere", "", 0.0, 0.0, "XX", "", 0),
    ]
    .concat()
        + "malformed\trow\n"
}

const COUNTRY_INFO_FEED: &str = "\
# GeoNames country info
#ISO\tISO3\tISO-Numeric\tfips\tCountry\tCapital\tArea(in sq km)\tPopulation\tContinent\ttld\tCurrencyCode\tCurrencyName\tPhone\tPostal Code Format\tPostal Code Regex\tLanguages\tgeonameid\tneighbours\tEquivalentFipsCode
US\tUSA\t840\tUS\tUnited States\tWashington\t9629091\t327167434\tNA\t.us\tUSD\tDollar\t1\t#####-####\t^\\d{5}(-\\d{4})?$\ten-US,es-US,haw,fr\t6252001\tCA,MX,CU\t
FR\tFRA\t250\tFR\tFrance\tParis\t547030\t66987244\tEU\t.fr\tEUR\tEuro\t33\t#####\t^(\\d{5})$\tfr-FR,frp,br,co,ca,eu,oc\t3017382\tCH,DE,BE,LU,IT,AD,MC,ES\t
";

fn maxmind_feed() -> Vec<u8> {
    let mut out = b"Country,City,AccentCity,Region,Population,Latitude,Longitude\n".to_vec();
    out.extend_from_slice(b"us,leander,Leander,TX,,30.5788,-97.8531\n");
    out.extend_from_slice(b"us,leander,Leander,TX,,30.5788,-97.8531\n");
    out.extend_from_slice(b"fr,(versailles),(Versailles),A8,85416,48.80359,2.13424\n");
    // Latin-1 encoded "S\xe8te"
    out.extend_from_slice(b"fr,sete,S\xe8te,B9,43000,43.40280,3.69278\n");
    out.extend_from_slice(b"de,bad!,Bad!,01,,50.0,8.0\n");
    out.extend_from_slice(b",nowhere,Nowhere,01,,1.0,1.0\n");
    out
}

fn write_gzip(path: &Path, bytes: &[u8]) {
    let mut gz = GzEncoder::new(fs::File::create(path).unwrap(), Compression::default());
    gz.write_all(bytes).unwrap();
    gz.finish().unwrap();
}

fn write_zip(path: &Path, entry: &str, text: &str) {
    let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    zip.start_file(entry, options).unwrap();
    zip.write_all(text.as_bytes()).unwrap();
    zip.finish().unwrap();
}

/// Data directory with a plain-text Geonames feed.
fn text_fixture() -> (TempDir, GeobedConfig) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(GEONAMES_TXT), geonames_feed()).unwrap();
    fs::write(dir.path().join(COUNTRY_INFO), COUNTRY_INFO_FEED).unwrap();
    write_gzip(&dir.path().join(MAXMIND), &maxmind_feed());

    let defaults = DataSources::default();
    let sources = DataSources {
        geonames_cities: DataSource::new("geonamesCities1000", "http://unused", GEONAMES_TXT),
        ..defaults
    };
    let config = GeobedConfig {
        sources,
        ..GeobedConfig::default()
    }
    .with_data_dir(dir.path())
    .with_fetch(false);
    (dir, config)
}

/// Data directory laid out exactly like a fresh download.
fn zip_fixture() -> (TempDir, GeobedConfig) {
    let dir = tempfile::tempdir().unwrap();
    write_zip(&dir.path().join(GEONAMES_ZIP), GEONAMES_TXT, &geonames_feed());
    fs::write(dir.path().join(COUNTRY_INFO), COUNTRY_INFO_FEED).unwrap();
    write_gzip(&dir.path().join(MAXMIND), &maxmind_feed());
    let config = GeobedConfig::default()
        .with_data_dir(dir.path())
        .with_fetch(false);
    (dir, config)
}

#[test]
fn builds_from_plain_text_feeds() {
    let (_dir, config) = text_fixture();
    let g = Geobed::new(&config).unwrap();

    let stats = g.stats();
    assert_eq!(stats.countries, 2);
    // 9 geonames rows + leander, versailles, sète
    assert_eq!(stats.cities, 12);
    // Nowhere has no usable location
    assert_eq!(stats.geohashed, 11);
}

#[test]
fn builds_from_the_zip_archive() {
    let (_dir, config) = zip_fixture();
    let g = Geobed::new(&config).unwrap();
    assert_eq!(g.stats().cities, 12);
    assert_eq!(g.geocode("Round Rock").region(), "TX");
}

#[test]
fn forward_geocoding_properties() {
    let (_dir, config) = zip_fixture();
    let g = Geobed::new(&config).unwrap();

    let nyc = g.geocode("New York, NY");
    assert_eq!((nyc.country(), nyc.region()), ("US", "NY"));

    for blank in ["", " "] {
        let c = g.geocode(blank);
        assert!(c.name().is_empty());
        assert_eq!(c.population(), 0);
    }

    assert_eq!(g.geocode("Paris").country(), "FR");
    assert_eq!(g.geocode("Paris, TX").country(), "US");
    assert_eq!(g.geocode("Springfield").region(), "MO");
    assert_eq!(g.geocode("Paname").country(), "FR");
    assert_eq!(g.geocode("versailles").name(), "Versailles");
    assert_eq!(g.geocode("Sete").name(), "Sète");
    assert!(g.geocode_match("Qwxyzzy").is_none());

    for city in g.cities().iter() {
        let found = g.geocode(city.name());
        assert!(
            found.name().to_lowercase() == city.name().to_lowercase(),
            "{} → {}",
            city.name(),
            found.name()
        );
    }
}

#[test]
fn reverse_geocoding_properties() {
    let (_dir, config) = zip_fixture();
    let g = Geobed::new(&config).unwrap();

    let austin = g.reverse_geocode(30.26715, -97.74306);
    assert_eq!(
        (austin.name(), austin.region(), austin.country()),
        ("Austin", "TX", "US")
    );
    assert_eq!(g.reverse_geocode(30.51, -97.68).name(), "Round Rock");
    assert_eq!(g.reverse_geocode(0.0, 0.0), City::default());
    assert_eq!(g.reverse_geocode(f64::NAN, 0.0), City::default());
}

#[test]
fn snapshots_are_written_and_restored() {
    let (dir, config) = zip_fixture();
    let built = Geobed::new(&config).unwrap();
    for file in [CITIES_FILE, COUNTRIES_FILE, NAME_INDEX_FILE] {
        assert!(dir.path().join(file).exists(), "{file} missing");
    }

    // Without the raw feeds only a restore can succeed.
    fs::remove_file(dir.path().join(GEONAMES_ZIP)).unwrap();
    let restored = Geobed::new(&config).unwrap();
    assert_eq!(restored.cities(), built.cities());
    assert_eq!(restored.name_index(), built.name_index());
    assert_eq!(restored.stats(), built.stats());
    assert_eq!(restored.geocode("New York, NY").region(), "NY");
}

#[test]
fn corrupt_snapshot_triggers_a_rebuild() {
    let (dir, config) = zip_fixture();
    let built = Geobed::new(&config).unwrap();

    fs::write(dir.path().join(CITIES_FILE), b"not a snapshot").unwrap();
    let rebuilt = Geobed::new(&config).unwrap();
    assert_eq!(rebuilt.cities(), built.cities());

    // ...and the rebuild rewrote a usable snapshot.
    fs::remove_file(dir.path().join(GEONAMES_ZIP)).unwrap();
    assert!(Geobed::new(&config).is_ok());
}

#[test]
fn rebuilding_is_deterministic() {
    let (_dir, config) = text_fixture();
    let config = config.with_snapshots(false);
    let a = Geobed::build(&config).unwrap();
    let b = Geobed::build(&config).unwrap();
    assert_eq!(a.cities(), b.cities());
    assert_eq!(a.name_index(), b.name_index());
}

#[test]
fn disabled_snapshots_are_not_written() {
    let (dir, config) = text_fixture();
    Geobed::new(&config.with_snapshots(false)).unwrap();
    assert!(!dir.path().join(CITIES_FILE).exists());
}

#[test]
fn missing_primary_feed_is_fatal() {
    let (dir, config) = zip_fixture();
    fs::remove_file(dir.path().join(GEONAMES_ZIP)).unwrap();
    let err = Geobed::new(&config).unwrap_err();
    assert!(matches!(err, GeoError::NotFound(_)), "{err}");
}

#[test]
fn missing_maxmind_feed_is_tolerated() {
    let (dir, config) = zip_fixture();
    fs::remove_file(dir.path().join(MAXMIND)).unwrap();
    let g = Geobed::new(&config).unwrap();
    assert_eq!(g.stats().cities, 9);
    assert!(g.geocode_match("Leander").is_none());
}
