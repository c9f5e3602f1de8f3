use anyhow::{Context, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, InquireError, Password, PasswordDisplayMode, Select, Text};
use tracing::debug;
use weatherdash_core::{
    Config, Coordinates, OpenWeatherClient, Session, StaticLocation, WeatherError,
    provider::provider_from_config,
};

use crate::render::render_text;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Current weather and a 5-day forecast")]
pub struct Cli {
    /// Print the snapshot and daily forecast as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional home location.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name; several words are joined, e.g. `show New York`.
        city: Vec<String>,
    },

    /// Show weather for your location (flags, else the configured home).
    Here {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Keep prompting for searches until you quit.
    Interactive,
}

const SEARCH_CITY: &str = "Search by city";
const USE_LOCATION: &str = "Use my location";
const QUIT: &str = "Quit";

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let config = Config::load()?;
                let mut session = Session::new(provider_from_config(&config));
                let result = session.search(&city.join(" ")).await.map(|_| ());
                report(&session, result, self.json)
            }
            Command::Here { lat, lon } => {
                let config = Config::load()?;
                let locator = StaticLocation::resolve(lat.zip(lon), config.home());
                let mut session = Session::new(provider_from_config(&config));
                let result = session.locate_and_fetch(&locator).await.map(|_| ());
                report(&session, result, self.json)
            }
            Command::Interactive => interactive(self.json).await,
        }
    }
}

/// Print the rendered snapshot, or fail with the session's user-facing message.
fn report(
    session: &Session<OpenWeatherClient>,
    result: Result<(), WeatherError>,
    json: bool,
) -> anyhow::Result<()> {
    if let Err(err) = result {
        debug!(error = ?err, "query failed");
        bail!("{}", session.error_message().unwrap_or("Unable to fetch weather"));
    }

    let Some(snapshot) = session.snapshot() else {
        bail!("No weather data to display");
    };
    let daily = session.daily_forecast();

    if json {
        let view = serde_json::json!({ "snapshot": snapshot, "daily": daily });
        let text = serde_json::to_string_pretty(&view).context("Failed to serialize snapshot")?;
        println!("{text}");
    } else {
        print!("{}", render_text(snapshot, &daily, Local::now()));
    }

    Ok(())
}

async fn interactive(json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let locator = StaticLocation::resolve(None, config.home());
    let mut session = Session::new(provider_from_config(&config));

    loop {
        let choice = match Select::new("What next?", vec![SEARCH_CITY, USE_LOCATION, QUIT]).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read selection"),
        };

        let result = match choice {
            SEARCH_CITY => {
                let city = match Text::new("City:").prompt() {
                    Ok(city) => city,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(err) => return Err(err).context("Failed to read city"),
                };
                session.search(&city).await.map(|_| ())
            }
            USE_LOCATION => session.locate_and_fetch(&locator).await.map(|_| ()),
            _ => break,
        };

        // Errors are shown and the loop carries on with the next query.
        if let Err(err) = report(&session, result, json) {
            eprintln!("{err}");
        }
        println!();
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_from(&Config::config_file_path()?)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let latitude = CustomType::<f64>::new("Home latitude:")
        .with_help_message("Used by `weatherdash here`; press Esc to skip")
        .prompt_skippable()
        .context("Failed to read latitude")?;

    if let Some(latitude) = latitude {
        let longitude = CustomType::<f64>::new("Home longitude:")
            .prompt()
            .context("Failed to read longitude")?;
        config.set_home(Some(Coordinates::new(latitude, longitude)?));
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_joins_city_words() {
        let cli = Cli::try_parse_from(["weatherdash", "show", "New", "York"]).unwrap();
        match cli.command {
            Command::Show { city } => assert_eq!(city.join(" "), "New York"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_without_city_parses_to_empty_query() {
        let cli = Cli::try_parse_from(["weatherdash", "show"]).unwrap();
        assert!(matches!(cli.command, Command::Show { city } if city.is_empty()));
    }

    #[test]
    fn here_accepts_negative_coordinates() {
        let cli =
            Cli::try_parse_from(["weatherdash", "--json", "here", "--lat", "-33.9", "--lon", "151.2"])
                .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Here { lat, lon } => {
                assert_eq!(lat, Some(-33.9));
                assert_eq!(lon, Some(151.2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn here_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["weatherdash", "here", "--lat", "10"]).is_err());
    }

    #[test]
    fn here_without_flags_parses() {
        let cli = Cli::try_parse_from(["weatherdash", "here"]).unwrap();
        assert!(matches!(cli.command, Command::Here { lat: None, lon: None }));
    }
}
