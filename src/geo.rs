//! Great-circle distance on the WGS-ish sphere.
//!
//! Straight-line (haversine) distance only. Travel time, roads and opening
//! hours are out of scope; the optimizer minimizes this metric alone.

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two `(lat, lng)` pairs, in kilometers.
///
/// Symmetric, non-negative, and zero for identical inputs. Out-of-range
/// coordinates are not rejected here; they yield numerically nonsensical
/// distances and validation is the caller's responsibility.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
