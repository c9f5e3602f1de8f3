use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::WeatherError, model::Coordinates};

/// Resolves the user's position for the "use my location" path.
///
/// Failures surface as [`WeatherError::GeolocationUnavailable`] or
/// [`WeatherError::GeolocationDenied`]; they never fall back to demo data.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, WeatherError>;
}

/// A position known up front: from command-line flags or the configured home.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocation {
    position: Option<(f64, f64)>,
}

impl StaticLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { position: Some((latitude, longitude)) }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Explicit coordinates win over the configured home location.
    pub fn resolve(explicit: Option<(f64, f64)>, home: Option<Coordinates>) -> Self {
        let position = explicit.or(home.map(|c| (c.latitude, c.longitude)));
        Self { position }
    }
}

#[async_trait]
impl Geolocator for StaticLocation {
    async fn locate(&self) -> Result<Coordinates, WeatherError> {
        let (latitude, longitude) = self.position.ok_or(WeatherError::GeolocationUnavailable)?;
        Coordinates::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unavailable_without_position() {
        let err = StaticLocation::unavailable().locate().await.unwrap_err();
        assert!(matches!(err, WeatherError::GeolocationUnavailable));
    }

    #[tokio::test]
    async fn explicit_position_beats_home() {
        let home = Coordinates::new(10.0, 10.0).unwrap();
        let loc = StaticLocation::resolve(Some((59.91, 10.75)), Some(home));
        let coords = loc.locate().await.unwrap();

        assert_eq!(coords.latitude, 59.91);
        assert_eq!(coords.longitude, 10.75);
    }

    #[tokio::test]
    async fn home_is_used_when_no_flags() {
        let home = Coordinates::new(-33.87, 151.21).unwrap();
        let coords = StaticLocation::resolve(None, Some(home)).locate().await.unwrap();
        assert_eq!(coords, home);
    }

    #[tokio::test]
    async fn out_of_range_position_is_rejected() {
        let err = StaticLocation::new(120.0, 0.0).locate().await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCoordinates { .. }));
    }
}
