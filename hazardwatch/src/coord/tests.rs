//! Tests for coordinates and distance

use super::*;

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

#[test]
fn test_new_accepts_bounds() {
    assert!(Coordinate::new(90.0, 180.0).is_ok());
    assert!(Coordinate::new(-90.0, -180.0).is_ok());
}

#[test]
fn test_new_rejects_out_of_range() {
    assert!(matches!(
        Coordinate::new(90.5, 0.0),
        Err(CoordError::InvalidLatitude(_))
    ));
    assert!(matches!(
        Coordinate::new(0.0, -180.1),
        Err(CoordError::InvalidLongitude(_))
    ));
}

#[test]
fn test_new_rejects_non_finite() {
    assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
}

#[test]
fn test_parse_lat_lon() {
    let c = parse_lat_lon("13.0827,80.2707").unwrap();
    assert_eq!(c.latitude(), 13.0827);
    assert_eq!(c.longitude(), 80.2707);

    let c = parse_lat_lon("  -33.86 ,  151.21 ").unwrap();
    assert_eq!(c.latitude(), -33.86);
    assert_eq!(c.longitude(), 151.21);
}

#[test]
fn test_parse_lat_lon_rejects_place_names() {
    assert!(matches!(
        parse_lat_lon("Chennai, India"),
        Err(CoordError::Malformed(_))
    ));
    assert!(matches!(
        parse_lat_lon("Chennai"),
        Err(CoordError::Malformed(_))
    ));
    assert!(matches!(
        parse_lat_lon("1.0,2.0,3.0"),
        Err(CoordError::Malformed(_))
    ));
}

#[test]
fn test_parse_lat_lon_rejects_non_finite() {
    for input in ["NaN,10", "10,inf", "nan,nan", "inf,0", "-infinity,5"] {
        assert!(
            matches!(parse_lat_lon(input), Err(CoordError::Malformed(_))),
            "{} should not parse as a coordinate",
            input
        );
    }
}

#[test]
fn test_parse_lat_lon_out_of_range() {
    assert!(matches!(
        parse_lat_lon("95.0,10.0"),
        Err(CoordError::InvalidLatitude(_))
    ));
}

#[test]
fn test_distance_to_self_is_zero() {
    let points = [
        coord(0.0, 0.0),
        coord(13.0827, 80.2707),
        coord(-89.9, 179.9),
        coord(51.5074, -0.1278),
    ];
    for p in points {
        assert_eq!(distance_km(p, p), 0.0);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let pairs = [
        (coord(13.0827, 80.2707), coord(12.9716, 77.5946)),
        (coord(51.5074, -0.1278), coord(48.8566, 2.3522)),
        (coord(-33.8688, 151.2093), coord(35.6762, 139.6503)),
        (coord(0.0, 179.5), coord(0.0, -179.5)),
    ];
    for (a, b) in pairs {
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }
}

#[test]
fn test_distance_london_paris() {
    let london = coord(51.5074, -0.1278);
    let paris = coord(48.8566, 2.3522);
    let d = distance_km(london, paris);
    assert!((d - 343.5).abs() < 1.0, "London-Paris should be ~343km, got {}", d);
}

#[test]
fn test_distance_across_antimeridian() {
    let d = distance_km(coord(0.0, 179.5), coord(0.0, -179.5));
    assert!((d - 111.19).abs() < 0.1, "Expected ~111km, got {}", d);
}

#[test]
fn test_antipodal_distance_is_half_circumference() {
    let d = distance_km(coord(0.0, 0.0), coord(0.0, 180.0));
    let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
    assert!((d - expected).abs() < 1e-6);
}

#[test]
fn test_round_km() {
    assert_eq!(round_km(3.14159), 3.14);
    assert_eq!(round_km(12.4061), 12.41);
    assert_eq!(round_km(0.0), 0.0);
}

#[test]
fn test_display() {
    assert_eq!(coord(13.0827, 80.2707).to_string(), "13.08270, 80.27070");
}

#[test]
fn test_deserialize_validates() {
    let ok: Result<Coordinate, _> =
        serde_json::from_str(r#"{"latitude": 10.0, "longitude": 20.0}"#);
    assert!(ok.is_ok());

    let bad: Result<Coordinate, _> =
        serde_json::from_str(r#"{"latitude": 100.0, "longitude": 20.0}"#);
    assert!(bad.is_err());
}
