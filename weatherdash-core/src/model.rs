use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Label used for the demo dataset when the request came from geolocation.
pub const GEOLOCATION_LABEL: &str = "Your Location";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WeatherError> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(WeatherError::InvalidCoordinates { latitude, longitude });
        }

        Ok(Self { latitude, longitude })
    }
}

/// A place the user asked about: a free-text name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// Build a name query from raw user input. Blank input is rejected.
    pub fn city(input: &str) -> Result<Self, WeatherError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }

        Ok(Self::City(trimmed.to_string()))
    }

    pub fn coordinates(coords: Coordinates) -> Self {
        Self::Coordinates(coords)
    }

    /// Name shown on the demo dataset for this query.
    pub fn demo_label(&self) -> &str {
        match self {
            LocationQuery::City(name) => name,
            LocationQuery::Coordinates(_) => GEOLOCATION_LABEL,
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::City(name) => f.write_str(name),
            LocationQuery::Coordinates(c) => write!(f, "{:.4},{:.4}", c.latitude, c.longitude),
        }
    }
}

/// Current conditions in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: f64,
    pub visibility_m: Option<f64>,
    pub description: String,
    pub icon: String,
}

impl CurrentConditions {
    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility_m.map(|m| m / 1000.0)
    }

    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}@2x.png", self.icon)
    }
}

/// One 3-hourly forecast sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: i64,
    pub temperature_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Wall-clock time of this sample in `tz`.
    pub fn time_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.time().map(|t| t.with_timezone(tz))
    }

    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}.png", self.icon)
    }
}

/// The representative view of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub timestamp: i64,
    pub high_c: f64,
    pub low_c: f64,
    pub description: String,
    pub icon: String,
}

impl DailyForecast {
    pub(crate) fn from_entry(date: NaiveDate, entry: &ForecastEntry) -> Self {
        Self {
            date,
            timestamp: entry.timestamp,
            high_c: entry.temp_max_c,
            low_c: entry.temp_min_c,
            description: entry.description.clone(),
            icon: entry.icon.clone(),
        }
    }

    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}.png", self.icon)
    }
}

/// Current conditions plus an optional forecast series for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub forecast: Option<Vec<ForecastEntry>>,
}

impl WeatherSnapshot {
    /// An empty series is stored as absent; a present one is kept sorted by time.
    pub fn new(current: CurrentConditions, forecast: Option<Vec<ForecastEntry>>) -> Self {
        let forecast = forecast.filter(|list| !list.is_empty()).map(|mut list| {
            list.sort_by_key(|e| e.timestamp);
            list
        });

        Self { current, forecast }
    }

    pub fn is_demo(&self) -> bool {
        self.current.country == crate::demo::DEMO_COUNTRY
    }
}
