//! Coordinate module
//!
//! Provides the validated [`Coordinate`] type, literal `lat,lon` parsing and
//! great-circle distance used for ranking nearby resources and coastline
//! proximity.

mod types;

pub use types::{CoordError, Coordinate, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Parses a literal `"<lat>,<lon>"` string.
///
/// Whitespace around either component is ignored. Exactly two finite
/// numeric components are accepted; anything else, including `nan` or
/// `inf`, is [`CoordError::Malformed`].
///
/// # Example
///
/// ```
/// use hazardwatch::coord::parse_lat_lon;
///
/// let coord = parse_lat_lon("13.0827, 80.2707").unwrap();
/// assert_eq!(coord.latitude(), 13.0827);
/// ```
pub fn parse_lat_lon(input: &str) -> Result<Coordinate, CoordError> {
    let mut parts = input.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CoordError::Malformed(input.to_string()));
    };

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| CoordError::Malformed(input.to_string()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| CoordError::Malformed(input.to_string()))?;
    if !lat.is_finite() || !lon.is_finite() {
        return Err(CoordError::Malformed(input.to_string()));
    }

    Coordinate::new(lat, lon)
}

/// Calculate the great-circle distance between two coordinates.
///
/// Uses the haversine formula with a spherical Earth of radius
/// [`EARTH_RADIUS_KM`].
///
/// # Example
///
/// ```
/// use hazardwatch::coord::{distance_km, Coordinate};
///
/// let a = Coordinate::new(0.0, 0.0).unwrap();
/// let b = Coordinate::new(1.0, 0.0).unwrap();
/// assert!((distance_km(a, b) - 111.19).abs() < 0.01);
/// ```
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude() * DEG_TO_RAD;
    let lat2_rad = to.latitude() * DEG_TO_RAD;
    let delta_lat = (to.latitude() - from.latitude()) * DEG_TO_RAD;
    let delta_lon = (to.longitude() - from.longitude()) * DEG_TO_RAD;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Clamp guards asin against rounding just above 1.0 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Rounds a distance to two decimals for display and export.
#[inline]
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests;
