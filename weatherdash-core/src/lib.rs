//! Core library for the `weatherdash` dashboard.
//!
//! This crate defines:
//! - Domain models (queries, current conditions, forecast samples, snapshots)
//! - The weather data provider and its demo-data fallback
//! - The forecast reducer that picks one sample per calendar day
//! - A session state machine driving one query at a time
//! - Configuration & credentials handling
//!
//! It is used by `weatherdash-cli`, but can also be reused by other front ends.

pub mod config;
pub mod demo;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod reduce;
pub mod session;

pub use config::{Config, ProviderConfig};
pub use error::WeatherError;
pub use geolocation::{Geolocator, StaticLocation};
pub use model::{
    Coordinates, CurrentConditions, DailyForecast, ForecastEntry, LocationQuery, WeatherSnapshot,
};
pub use provider::{WeatherSource, fetch_snapshot, openweather::OpenWeatherClient};
pub use reduce::{reduce, reduce_in};
pub use session::{Phase, Session};
