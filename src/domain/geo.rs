use serde::{Deserialize, Serialize};

/// Mean earth radius in meters (IUGG).
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance in meters (haversine on a spherical earth).
    #[must_use]
    pub fn distance_to(&self, other: Self) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_phi = (other.latitude - self.latitude).to_radians();
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

        EARTH_RADIUS_METERS * c
    }
}

/// A circular area on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    pub center: Position,
    /// Radius in meters
    pub radius: f64,
}

impl Geofence {
    #[must_use]
    pub const fn new(center: Position, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Inclusive: a point exactly `radius` meters away is inside.
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        self.center.distance_to(point) <= self.radius
    }
}
