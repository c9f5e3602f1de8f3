use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone};
use weatherdash_core::{DailyForecast, WeatherSnapshot};

/// Round half up, so -2.5 shows as -2 and 2.5 as 3.
fn round_temp(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Plain-text dashboard for one snapshot and its reduced forecast.
pub fn render_text<Tz>(snapshot: &WeatherSnapshot, daily: &[DailyForecast], now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let current = &snapshot.current;
    let mut out = String::new();

    let _ = writeln!(out, "{}", now.format("%A, %B %-d, %Y %H:%M"));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}, {}", current.location_name, current.country);
    if snapshot.is_demo() {
        let _ = writeln!(out, "(demo data: the weather service rejected the API key)");
    }
    let _ = writeln!(out, "  {}°C  {}", round_temp(current.temperature_c), current.description);
    let _ = writeln!(out, "  {}", current.icon_url());
    let _ = writeln!(out);

    let visibility = current
        .visibility_km()
        .map_or_else(|| "N/A".to_string(), |km| format!("{km:.1}"));

    let details = [
        ("Feels like", format!("{}°C", round_temp(current.feels_like_c))),
        ("Humidity", format!("{}%", current.humidity_pct)),
        ("Wind", format!("{} m/s", current.wind_speed_mps)),
        ("Pressure", format!("{} hPa", current.pressure_hpa)),
        ("Visibility", format!("{visibility} km")),
        ("UV index", "N/A".to_string()),
    ];
    for (label, value) in details {
        let _ = writeln!(out, "  {label:<12} {value}");
    }

    if !daily.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Forecast");
        for day in daily {
            let _ = writeln!(
                out,
                "  {}  {:<4} {:>3}° / {:>3}°  {}",
                day.date.format("%a"),
                day.icon,
                round_temp(day.high_c),
                round_temp(day.low_c),
                day.description,
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use weatherdash_core::{CurrentConditions, demo::demo_snapshot, reduce_in};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    fn snapshot(visibility_m: Option<f64>) -> WeatherSnapshot {
        WeatherSnapshot::new(
            CurrentConditions {
                location_name: "Helsinki".into(),
                country: "FI".into(),
                temperature_c: -2.5,
                feels_like_c: -6.4,
                humidity_pct: 91,
                wind_speed_mps: 6.2,
                pressure_hpa: 1002.0,
                visibility_m,
                description: "mist".into(),
                icon: "50d".into(),
            },
            None,
        )
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_temp(2.5), 3);
        assert_eq!(round_temp(-2.5), -2);
        assert_eq!(round_temp(-6.4), -6);
    }

    #[test]
    fn renders_current_conditions() {
        let text = render_text(&snapshot(Some(4200.0)), &[], now());

        assert!(text.starts_with("Friday, October 16, 2026 09:30"));
        assert!(text.contains("Helsinki, FI"));
        assert!(text.contains("-2°C  mist"));
        assert!(text.contains("https://openweathermap.org/img/wn/50d@2x.png"));
        assert!(text.contains("Feels like   -6°C"));
        assert!(text.contains("Humidity     91%"));
        assert!(text.contains("Wind         6.2 m/s"));
        assert!(text.contains("Pressure     1002 hPa"));
        assert!(text.contains("Visibility   4.2 km"));
        assert!(text.contains("UV index     N/A"));
        assert!(!text.contains("Forecast"));
    }

    #[test]
    fn missing_visibility_is_na() {
        let text = render_text(&snapshot(None), &[], now());
        assert!(text.contains("Visibility   N/A km"));
    }

    #[test]
    fn renders_forecast_rows() {
        let daily = vec![DailyForecast {
            date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            timestamp: 0,
            high_c: 7.6,
            low_c: 1.2,
            description: "light rain".into(),
            icon: "10d".into(),
        }];
        let text = render_text(&snapshot(None), &daily, now());

        assert!(text.contains("Forecast"));
        assert!(text.contains("Sat  10d    8° /   1°  light rain"));
    }

    #[test]
    fn demo_snapshot_is_labelled() {
        let snap = demo_snapshot("Your Location", now());
        let daily = reduce_in(snap.forecast.as_deref().unwrap_or_default(), &Utc);
        let text = render_text(&snap, &daily, now());

        assert!(text.contains("Your Location, DEMO"));
        assert!(text.contains("demo data"));
        assert_eq!(text.lines().filter(|l| l.contains("° / ")).count(), 5);
    }
}
