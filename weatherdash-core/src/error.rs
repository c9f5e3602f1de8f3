use thiserror::Error;

/// Failures raised while resolving a location or talking to the weather service.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Blank search input. Raised before any request goes out.
    #[error("Please enter a city name")]
    EmptyQuery,

    /// The upstream rejected our credentials.
    #[error("weather service rejected the API key (status {status})")]
    Authorization { status: u16 },

    #[error("weather service request failed with status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("forecast unavailable: {0}")]
    ForecastUnavailable(String),

    #[error("Geolocation is not available on this machine")]
    GeolocationUnavailable,

    #[error("Unable to retrieve your location")]
    GeolocationDenied,

    #[error("coordinates out of range: lat={latitude}, lon={longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to parse {what} response: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl WeatherError {
    /// Upstream HTTP status, when the failure came from a completed response.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::Authorization { status } | WeatherError::Provider { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_geolocation(&self) -> bool {
        matches!(
            self,
            WeatherError::GeolocationUnavailable
                | WeatherError::GeolocationDenied
                | WeatherError::InvalidCoordinates { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_upstream_failures() {
        assert_eq!(WeatherError::Authorization { status: 401 }.status(), Some(401));
        let err = WeatherError::Provider { status: 404, body: "city not found".into() };
        assert_eq!(err.status(), Some(404));
        assert_eq!(WeatherError::EmptyQuery.status(), None);
    }

    #[test]
    fn geolocation_failures_are_grouped() {
        assert!(WeatherError::GeolocationDenied.is_geolocation());
        assert!(WeatherError::GeolocationUnavailable.is_geolocation());
        assert!(!WeatherError::ForecastUnavailable("x".into()).is_geolocation());
    }

    #[test]
    fn empty_query_message_is_user_facing() {
        assert_eq!(WeatherError::EmptyQuery.to_string(), "Please enter a city name");
    }
}
