//! Great-circle span distance from a pair of GPS fixes.

/// Mean earth radius in feet (6,371,008.8 m).
const EARTH_RADIUS_FT: f64 = 20_902_259.8;

/// Haversine distance in feet between two WGS84 coordinates.
pub fn great_circle_distance_ft(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_FT * c
}

/// Distance between two optional fixes; `None` unless all four are valid.
pub fn span_from_coordinates(
    from: (Option<f64>, Option<f64>),
    to: (Option<f64>, Option<f64>),
) -> Option<f64> {
    let (lat1, lon1) = (from.0?, from.1?);
    let (lat2, lon2) = (to.0?, to.1?);
    let valid = |lat: f64, lon: f64| {
        lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0
    };
    if !valid(lat1, lon1) || !valid(lat2, lon2) {
        return None;
    }
    Some(great_circle_distance_ft(lat1, lon1, lat2, lon2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_apart() {
        assert_eq!(great_circle_distance_ft(40.0, -80.0, 40.0, -80.0), 0.0);
    }

    #[test]
    fn one_thousandth_degree_of_latitude_is_about_365_feet() {
        let d = great_circle_distance_ft(40.0, -80.0, 40.001, -80.0);
        assert!((d - 364.8).abs() < 1.0, "got {d}");
    }

    #[test]
    fn missing_or_invalid_coordinates_yield_none() {
        assert!(span_from_coordinates((Some(40.0), None), (Some(40.0), Some(-80.0))).is_none());
        assert!(
            span_from_coordinates((Some(95.0), Some(-80.0)), (Some(40.0), Some(-80.0))).is_none()
        );
        assert!(
            span_from_coordinates((Some(40.0), Some(-80.0)), (Some(40.0), Some(-80.001)))
                .is_some()
        );
    }
}
