//! View state for one interactive user: the phase of the in-flight request,
//! the snapshot being shown and the last user-facing error.

use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    geolocation::Geolocator,
    model::{DailyForecast, LocationQuery, WeatherSnapshot},
    provider::{CurrentStage, WeatherSource, fetch_current_stage, fetch_forecast_stage},
    reduce::reduce,
};

pub const CITY_NOT_FOUND: &str = "City not found. Please check the spelling and try again.";
pub const LOCATION_FETCH_FAILED: &str = "Unable to fetch weather for your location";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FetchingCurrent,
    FetchingForecast,
    Rendered,
    Failed,
}

#[derive(Debug)]
pub struct Session<S> {
    source: S,
    phase: Phase,
    snapshot: Option<WeatherSnapshot>,
    error: Option<String>,
}

impl<S: WeatherSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self { source, phase: Phase::Idle, snapshot: None, error: None }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    /// Message to show the user after a failed request.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Search by place name. Blank input fails before any request is made.
    pub async fn search(&mut self, input: &str) -> Result<&WeatherSnapshot, WeatherError> {
        self.begin();

        let query = match LocationQuery::city(input) {
            Ok(query) => query,
            Err(err) => {
                let message = err.to_string();
                return Err(self.fail(message, err));
            }
        };

        self.run(query, CITY_NOT_FOUND).await
    }

    /// Resolve the user's position, then fetch weather for it.
    pub async fn locate_and_fetch<G>(&mut self, locator: &G) -> Result<&WeatherSnapshot, WeatherError>
    where
        G: Geolocator + ?Sized,
    {
        self.begin();

        let coords = match locator.locate().await {
            Ok(coords) => coords,
            Err(err) => {
                let message = err.to_string();
                return Err(self.fail(message, err));
            }
        };

        self.run(LocationQuery::coordinates(coords), LOCATION_FETCH_FAILED).await
    }

    /// Representative days of the snapshot on display, in local time.
    pub fn daily_forecast(&self) -> Vec<DailyForecast> {
        self.snapshot
            .as_ref()
            .and_then(|s| s.forecast.as_deref())
            .map(reduce)
            .unwrap_or_default()
    }

    /// Clear any error or snapshot and go back to waiting for input.
    pub fn dismiss(&mut self) {
        self.begin();
    }

    async fn run(
        &mut self,
        query: LocationQuery,
        failure_message: &str,
    ) -> Result<&WeatherSnapshot, WeatherError> {
        self.transition(Phase::FetchingCurrent);

        let stage = match fetch_current_stage(&self.source, &query).await {
            Ok(stage) => stage,
            Err(err) => return Err(self.fail(failure_message.to_string(), err)),
        };

        let snapshot = match stage {
            CurrentStage::Demo(snapshot) => snapshot,
            CurrentStage::Live(current) => {
                self.transition(Phase::FetchingForecast);
                fetch_forecast_stage(&self.source, &query, current).await
            }
        };

        self.transition(Phase::Rendered);
        Ok(&*self.snapshot.insert(snapshot))
    }

    fn begin(&mut self) {
        self.snapshot = None;
        self.error = None;
        self.transition(Phase::Idle);
    }

    fn fail(&mut self, message: String, err: WeatherError) -> WeatherError {
        warn!(error = %err, "request failed");
        self.error = Some(message);
        self.transition(Phase::Failed);
        err
    }

    fn transition(&mut self, next: Phase) {
        debug!(from = ?self.phase, to = ?next, "session phase");
        self.phase = next;
    }
}
