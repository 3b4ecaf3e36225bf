use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two points.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Default and upper bound for radius searches, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;
pub const MAX_RADIUS_KM: f64 = 100.0;

pub fn clamp_radius(radius_km: Option<f64>) -> f64 {
    match radius_km {
        Some(radius) if radius.is_finite() && radius > 0.0 => radius.min(MAX_RADIUS_KM),
        _ => DEFAULT_RADIUS_KM,
    }
}

/// Rounds a distance to 10 metres for display.
pub fn round_km(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}

/// Keeps the items located within `radius_km` of `origin`, nearest first.
pub fn within_radius<T, F>(items: Vec<T>, origin: Coordinates, radius_km: f64, locate: F) -> Vec<(T, f64)>
where
    F: Fn(&T) -> Option<Coordinates>,
{
    let mut found = items
        .into_iter()
        .filter_map(|item| {
            let distance = locate(&item)?.distance_km(&origin);
            (distance <= radius_km).then_some((item, distance))
        })
        .collect::<Vec<_>>();

    found.sort_by(|a, b| a.1.total_cmp(&b.1));
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_round_to_two_decimals() {
        assert_eq!(round_km(1.23456), 1.23);
        assert_eq!(round_km(0.005), 0.01);
    }

    #[test]
    fn same_point_is_zero_distance() {
        let lagos = Coordinates::new(6.5244, 3.3792);
        assert_eq!(haversine_km(lagos, lagos), 0.0);
    }

    #[test]
    fn london_to_paris() {
        let london = Coordinates::new(51.5074, -0.1278);
        let paris = Coordinates::new(48.8566, 2.3522);
        let distance = haversine_km(london, paris);
        assert!((distance - 343.5).abs() < 1.0, "got {}", distance);
        assert!((distance - paris.distance_km(&london)).abs() < 1e-9);
    }

    #[test]
    fn crosses_the_antimeridian() {
        let west = Coordinates::new(0.0, 179.5);
        let east = Coordinates::new(0.0, -179.5);
        let distance = haversine_km(west, east);
        assert!((distance - 111.2).abs() < 0.5, "got {}", distance);
    }

    #[test]
    fn radius_search_drops_far_and_unknown_items_and_sorts() {
        let origin = Coordinates::new(6.5244, 3.3792);
        let items = vec![
            ("ikeja", Some(Coordinates::new(6.6018, 3.3515))),
            ("ibadan", Some(Coordinates::new(7.3775, 3.9470))),
            ("nowhere", None),
            ("yaba", Some(Coordinates::new(6.5095, 3.3711))),
        ];

        let found = within_radius(items, origin, 20.0, |(_, at)| *at);
        let names = found.iter().map(|((name, _), _)| *name).collect::<Vec<_>>();

        assert_eq!(names, vec!["yaba", "ikeja"]);
        assert!(found[0].1 < found[1].1);
    }

    #[test]
    fn radius_defaults_and_caps() {
        assert_eq!(clamp_radius(None), DEFAULT_RADIUS_KM);
        assert_eq!(clamp_radius(Some(-3.0)), DEFAULT_RADIUS_KM);
        assert_eq!(clamp_radius(Some(5.0)), 5.0);
        assert_eq!(clamp_radius(Some(5000.0)), MAX_RADIUS_KM);
    }
}
