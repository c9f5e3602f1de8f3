//! Fixed dataset shown when the weather service rejects our credentials.

use chrono::{DateTime, TimeZone};

use crate::model::{CurrentConditions, ForecastEntry, WeatherSnapshot};

/// Country code marking a snapshot as demo data.
pub const DEMO_COUNTRY: &str = "DEMO";

const SECONDS_PER_DAY: i64 = 86_400;

// (max, min, temp, icon, description), one row per day starting today.
const DEMO_DAYS: [(f64, f64, f64, &str, &str); 5] = [
    (25.0, 18.0, 22.0, "02d", "partly cloudy"),
    (28.0, 20.0, 24.0, "01d", "clear sky"),
    (23.0, 16.0, 19.0, "10d", "light rain"),
    (26.0, 19.0, 23.0, "03d", "scattered clouds"),
    (29.0, 22.0, 26.0, "01d", "clear sky"),
];

/// Build the demo snapshot labelled `label`, with forecast days anchored at `now`.
pub fn demo_snapshot<Tz: TimeZone>(label: &str, now: DateTime<Tz>) -> WeatherSnapshot {
    let current = CurrentConditions {
        location_name: label.to_string(),
        country: DEMO_COUNTRY.to_string(),
        temperature_c: 22.0,
        feels_like_c: 25.0,
        humidity_pct: 65,
        wind_speed_mps: 3.5,
        pressure_hpa: 1013.0,
        visibility_m: Some(10_000.0),
        description: "partly cloudy".to_string(),
        icon: "02d".to_string(),
    };

    let start = now.timestamp();
    let forecast = DEMO_DAYS
        .iter()
        .zip(0..)
        .map(|(&(max, min, temp, icon, description), day)| ForecastEntry {
            timestamp: start + day * SECONDS_PER_DAY,
            temperature_c: temp,
            temp_min_c: min,
            temp_max_c: max,
            description: description.to_string(),
            icon: icon.to_string(),
        })
        .collect();

    WeatherSnapshot::new(current, Some(forecast))
}
