// crates/geobed-core/src/geohash.rs

//! # Geohash
//!
//! Minimal base-32 geohash encoder. Only what the reverse geocoder needs:
//! fixed-precision encoding and shared-prefix measurement.

/// Every stored and query geohash has this many characters.
pub const PRECISION: usize = 12;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Geohash of the origin (0, 0).
///
/// Rows whose coordinates failed to parse land here, so this cell means
/// "unknown" rather than "Gulf of Guinea".
pub const ORIGIN: &str = "s00000000000";

/// Encodes a point to a [`PRECISION`]-character geohash.
///
/// Values on an interval midpoint go to the upper half. Coordinates outside
/// the valid range are clamped to it.
pub fn encode(lat: f64, lng: f64) -> String {
    encode_with_precision(lat, lng, PRECISION)
}

pub fn encode_with_precision(lat: f64, lng: f64, precision: usize) -> String {
    let (mut lat_lo, mut lat_hi) = (-90.0_f64, 90.0_f64);
    let (mut lng_lo, mut lng_hi) = (-180.0_f64, 180.0_f64);
    let lat = lat.clamp(lat_lo, lat_hi);
    let lng = lng.clamp(lng_lo, lng_hi);

    let mut out = String::with_capacity(precision);
    let mut even = true;
    let mut bits = 0u8;
    let mut ch = 0usize;

    while out.len() < precision {
        if even {
            let mid = (lng_lo + lng_hi) / 2.0;
            if lng >= mid {
                ch = (ch << 1) | 1;
                lng_lo = mid;
            } else {
                ch <<= 1;
                lng_hi = mid;
            }
        } else {
            let mid = (lat_lo + lat_hi) / 2.0;
            if lat >= mid {
                ch = (ch << 1) | 1;
                lat_lo = mid;
            } else {
                ch <<= 1;
                lat_hi = mid;
            }
        }
        even = !even;
        bits += 1;
        if bits == 5 {
            out.push(BASE32[ch] as char);
            bits = 0;
            ch = 0;
        }
    }
    out
}

/// Geohash for a stored record: empty when the point is the origin sentinel.
pub fn encode_known(lat: f64, lng: f64) -> String {
    let gh = encode(lat, lng);
    if gh == ORIGIN {
        String::new()
    } else {
        gh
    }
}

/// Length of the common leading run of two geohashes.
#[inline]
pub fn shared_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}
