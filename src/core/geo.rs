use crate::domain::model::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres (Haversine).
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Metres below one kilometre, otherwise kilometres to one decimal.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1} km", km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KUALA_LUMPUR: Coordinate = Coordinate::new(3.1390, 101.6869);
    const SINGAPORE: Coordinate = Coordinate::new(1.3521, 103.8198);
    const LONDON: Coordinate = Coordinate::new(51.5074, -0.1278);
    const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);

    fn assert_close(actual: f64, expected: f64) {
        let relative = (actual - expected).abs() / expected;
        assert!(
            relative < 0.001,
            "expected ~{} km, got {} km",
            expected,
            actual
        );
    }

    #[test]
    fn test_identical_points_are_zero() {
        assert_eq!(distance_km(KUALA_LUMPUR, KUALA_LUMPUR), 0.0);
        assert_eq!(distance_km(LONDON, LONDON), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        assert_eq!(
            distance_km(KUALA_LUMPUR, SINGAPORE),
            distance_km(SINGAPORE, KUALA_LUMPUR)
        );
        assert_eq!(distance_km(LONDON, PARIS), distance_km(PARIS, LONDON));
    }

    #[test]
    fn test_known_city_pairs() {
        assert_close(distance_km(LONDON, PARIS), 343.56);
        assert_close(distance_km(KUALA_LUMPUR, SINGAPORE), 309.25);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.5), "500 m");
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(0.9994), "999 m");
        assert_eq!(format_distance(1.0), "1.0 km");
        assert_eq!(format_distance(12.34), "12.3 km");
        assert_eq!(format_distance(302.0), "302.0 km");
    }
}
