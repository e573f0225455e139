use chrono::{DateTime, TimeDelta, Utc};

/// Mean Earth radius in nautical miles, used by the haversine distance.
const NAUTICAL_MILES_EARTH_RADIUS: f64 = 3440.1;
/// Minimum altitude delta that counts as a change worth logging.
const ALTITUDE_CHANGE_THRESHOLD: f64 = 200.0;
/// Minimum heading delta (shortest arc) that counts as a change worth logging.
const HEADING_CHANGE_THRESHOLD: f64 = 7.0;

/// Converts degrees to radians.
pub fn deg_to_rad(deg: f64) -> f64 { deg * (std::f64::consts::PI / 180.0) }

/// Great-circle distance between two coordinates in nautical miles.
///
/// # Arguments
/// - `lat_from`, `lon_from`: start coordinate in degrees.
/// - `lat_to`, `lon_to`: end coordinate in degrees.
///
/// # Returns
/// The haversine distance in nautical miles.
pub fn distance_nm(lat_from: f64, lon_from: f64, lat_to: f64, lon_to: f64) -> f64 {
    let lat_from = deg_to_rad(lat_from);
    let lon_from = deg_to_rad(lon_from);
    let lat_to = deg_to_rad(lat_to);
    let lon_to = deg_to_rad(lon_to);

    let theta_lat = lat_to - lat_from;
    let theta_lon = lon_to - lon_from;

    let a = (theta_lat / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (theta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    NAUTICAL_MILES_EARTH_RADIUS * c
}

/// True if the shortest angular distance between two headings is 7 degrees or more.
pub fn heading_changed(current_hdg: f64, new_hdg: f64) -> bool {
    let mut delta = (new_hdg - current_hdg).abs();
    if delta > 180.0 {
        delta = 360.0 - delta;
    }
    delta >= HEADING_CHANGE_THRESHOLD
}

/// True if the altitude moved by 200 ft or more since the last sample.
pub fn altitude_changed(current_alt: f64, new_alt: f64) -> bool {
    (new_alt - current_alt).abs() >= ALTITUDE_CHANGE_THRESHOLD
}

/// True if `actual` lies within the planning tolerance of `planned`.
///
/// The tolerance is 1% of the planned value with a floor of 5 units, so
/// small loads are not rejected over rounding noise.
pub fn weight_valid(actual: f64, planned: f64) -> bool {
    let tolerance = (planned * 0.01).max(5.0);
    actual >= planned - tolerance && actual <= planned + tolerance
}

/// Today's UTC date combined with a time-of-day in seconds, as reported by
/// the simulator clock.
pub fn zulu_date_time(secs_of_day: i64) -> DateTime<Utc> {
    let midnight = Utc::now().date_naive().and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    midnight + TimeDelta::seconds(secs_of_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_and_zero_on_identity() {
        let d_ab = distance_nm(47.26, 11.34, 40.64, -73.78);
        let d_ba = distance_nm(40.64, -73.78, 47.26, 11.34);
        assert!((d_ab - d_ba).abs() < 1e-9);
        assert_eq!(distance_nm(12.5, -34.25, 12.5, -34.25), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_sixty_nm() {
        let d = distance_nm(0.0, 0.0, 1.0, 0.0);
        assert!((d - 60.0).abs() < 0.1, "got {d}");
    }

    #[test]
    fn heading_change_wraps_at_north() {
        assert!(!heading_changed(350.0, 355.0));
        assert!(heading_changed(350.0, 2.0));
        assert!(heading_changed(10.0, 1.0));
        assert!(!heading_changed(10.0, 5.0));
    }

    #[test]
    fn altitude_change_threshold() {
        assert!(!altitude_changed(1000.0, 1199.0));
        assert!(altitude_changed(1000.0, 1200.0));
        assert!(altitude_changed(1200.0, 1000.0));
    }

    #[test]
    fn weight_tolerance_has_five_unit_floor() {
        assert!(weight_valid(100.0, 100.0));
        assert!(weight_valid(95.0, 100.0));
        assert!(weight_valid(105.0, 100.0));
        assert!(!weight_valid(80.0, 100.0));
        // 1% dominates for heavy loads
        assert!(weight_valid(10_050.0, 10_000.0));
        assert!(!weight_valid(10_200.0, 10_000.0));
    }
}
