use crate::{
    Config, CurrentConditions, ForecastEntry, LocationQuery, WeatherSnapshot, demo::demo_snapshot,
    error::WeatherError, provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use chrono::Local;
use reqwest::StatusCode;
use std::fmt::Debug;
use tracing::{debug, info, warn};

pub mod openweather;

/// Source of raw weather data for a location.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(&self, query: &LocationQuery) -> Result<CurrentConditions, WeatherError>;

    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// Whether a failed current-conditions request should be answered with demo data.
///
/// Only a credential rejection qualifies; every other status is a real error.
pub fn should_substitute_demo_data(status: u16) -> bool {
    status == StatusCode::UNAUTHORIZED.as_u16()
}

/// Result of the first pipeline step.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentStage {
    /// Live conditions; the forecast still has to be fetched.
    Live(CurrentConditions),
    /// Credentials were rejected and the demo dataset stands in. No forecast request follows.
    Demo(WeatherSnapshot),
}

/// Step one: current conditions, with the demo substitution applied.
pub async fn fetch_current_stage<S>(
    source: &S,
    query: &LocationQuery,
) -> Result<CurrentStage, WeatherError>
where
    S: WeatherSource + ?Sized,
{
    match source.fetch_current(query).await {
        Ok(current) => Ok(CurrentStage::Live(current)),
        Err(err) if err.status().is_some_and(should_substitute_demo_data) => {
            warn!(%query, error = %err, "credentials rejected, showing demo data");
            Ok(CurrentStage::Demo(demo_snapshot(query.demo_label(), Local::now())))
        }
        Err(err) => Err(err),
    }
}

/// Step two: the forecast. Any failure here leaves the forecast absent.
pub async fn fetch_forecast_stage<S>(
    source: &S,
    query: &LocationQuery,
    current: CurrentConditions,
) -> WeatherSnapshot
where
    S: WeatherSource + ?Sized,
{
    let forecast = match source.fetch_forecast(query).await {
        Ok(list) if list.is_empty() => {
            debug!(%query, "forecast response had no samples");
            None
        }
        Ok(list) => Some(list),
        Err(err) => {
            let err = WeatherError::ForecastUnavailable(err.to_string());
            info!(%query, error = %err, "continuing without forecast");
            None
        }
    };

    WeatherSnapshot::new(current, forecast)
}

/// Current conditions, then the forecast. Only the first step can fail.
pub async fn fetch_snapshot<S>(source: &S, query: &LocationQuery) -> Result<WeatherSnapshot, WeatherError>
where
    S: WeatherSource + ?Sized,
{
    match fetch_current_stage(source, query).await? {
        CurrentStage::Demo(snapshot) => Ok(snapshot),
        CurrentStage::Live(current) => Ok(fetch_forecast_stage(source, query, current).await),
    }
}

/// Construct the OpenWeather client described by `config`.
///
/// A missing key is not an error: the service will answer 401 and the demo
/// dataset is shown instead.
pub fn provider_from_config(config: &Config) -> OpenWeatherClient {
    let api_key = match config.api_key() {
        Some(key) => key.to_owned(),
        None => {
            warn!("no OpenWeather API key configured; requests will be answered with demo data");
            String::new()
        }
    };

    let client = OpenWeatherClient::new(api_key);
    match config.base_url() {
        Some(url) => client.with_base_url(url),
        None => client,
    }
}
