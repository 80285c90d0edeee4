use clap::{Parser, Subcommand};
use tracing::warn;

use skycast_core::{
    CitySuggestion, Config, ProviderError, WeatherReport,
    provider::{
        ProviderId, WeatherProvider, suggestion_provider_from_config,
        weather_provider_from_config,
    },
    render::{suggestions_fragment, weather_fragment},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather with autocomplete")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the credential for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweather" or "geonames".
        provider: String,
    },

    /// Show current weather for a city.
    Show {
        /// City name.
        city: String,

        /// Emit the HTML display fragment instead of the plain summary.
        #[arg(long)]
        html: bool,
    },

    /// List city-name suggestions for a partial input.
    Suggest {
        /// Partial city name; fewer than 3 characters yields nothing.
        partial: String,

        /// Emit the HTML display fragment instead of plain rows.
        #[arg(long)]
        html: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { city, html } => show(&city, html).await,
            Command::Suggest { partial, html } => suggest(&partial, html).await,
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let credential = match id {
        ProviderId::OpenWeather => {
            inquire::Password::new("OpenWeatherMap API key:").without_confirmation().prompt()?
        }
        ProviderId::GeoNames => inquire::Text::new("GeoNames username:").prompt()?,
    };

    anyhow::ensure!(!credential.trim().is_empty(), "Credential must not be empty");

    config.upsert_credential(id, credential.trim().to_string());
    config.save()?;

    println!("Saved {} for '{id}' to {}", id.credential_label(), Config::config_file_path()?.display());

    Ok(())
}

async fn show(city: &str, html: bool) -> anyhow::Result<()> {
    anyhow::ensure!(!city.trim().is_empty(), "City name must not be blank");

    let config = Config::load()?;
    let weather = weather_provider_from_config(&config)?;

    let report = match weather.current_weather(city).await {
        Ok(report) => report,
        Err(ProviderError::CityNotFound) => {
            pick_and_retry(&config, weather.as_ref(), city).await?
        }
        Err(err) => return Err(err.into()),
    };

    if html {
        println!("{}", weather_fragment(&report));
    } else {
        print_report(&report);
    }

    Ok(())
}

/// The CLI rendition of the autocomplete click: on a miss, offer the
/// geocoder's candidates, put the pick into the query and look up once more.
async fn pick_and_retry(
    config: &Config,
    weather: &dyn WeatherProvider,
    city: &str,
) -> anyhow::Result<WeatherReport> {
    let suggestions = fetch_suggestions(config, city).await;
    if suggestions.is_empty() {
        return Err(ProviderError::CityNotFound.into());
    }

    let pick = inquire::Select::new("City not found. Did you mean:", suggestions).prompt()?;

    Ok(weather.current_weather(&pick.name).await?)
}

async fn suggest(partial: &str, html: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let suggestions = fetch_suggestions(&config, partial).await;

    if html {
        println!("{}", suggestions_fragment(&suggestions));
    } else {
        for suggestion in &suggestions {
            println!("{suggestion}");
        }
    }

    Ok(())
}

/// Suggestion failures are non-fatal here: log and render nothing.
async fn fetch_suggestions(config: &Config, partial: &str) -> Vec<CitySuggestion> {
    let provider = match suggestion_provider_from_config(config) {
        Ok(provider) => provider,
        Err(err) => {
            warn!("suggestion provider unavailable: {err:#}");
            return Vec::new();
        }
    };

    match provider.suggest(partial).await {
        Ok(suggestions) => suggestions,
        Err(err) => {
            warn!("suggestion lookup failed: {err}");
            Vec::new()
        }
    }
}

fn print_report(report: &WeatherReport) {
    println!("Weather in {}", report.location_name);
    println!("  Temperature: {}°C", report.temperature_c);
    println!("  Humidity:    {}%", report.humidity_pct);
    println!("  Wind speed:  {} m/s", report.wind_speed_mps);
    println!("  Conditions:  {}", report.description);
}
