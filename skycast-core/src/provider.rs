use crate::{
    CitySuggestion, Config, ProviderError, WeatherReport,
    provider::{geonames::GeoNamesClient, openweather::OpenWeatherClient},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod geonames;
pub mod openweather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    GeoNames,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::GeoNames => "geonames",
        }
    }

    /// Environment variable that overrides the stored credential.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "SKYCAST_OPENWEATHER_API_KEY",
            ProviderId::GeoNames => "SKYCAST_GEONAMES_USERNAME",
        }
    }

    /// What the credential is called by the provider itself.
    pub fn credential_label(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "API key",
            ProviderId::GeoNames => "username",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::GeoNames]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "geonames" => Ok(ProviderId::GeoNames),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, geonames."
            )),
        }
    }
}

/// Current-weather lookup for a city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, ProviderError>;
}

/// City-name autocomplete for a partial input.
#[async_trait]
pub trait SuggestionProvider: Send + Sync + Debug {
    async fn suggest(&self, partial: &str) -> Result<Vec<CitySuggestion>, ProviderError>;
}

fn credential_or_hint(config: &Config, id: ProviderId) -> anyhow::Result<String> {
    config.credential_for(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No {label} configured for provider '{id}'.\n\
             Hint: run `skycast configure {id}` and enter your {label}, \
             or set {var}.",
            label = id.credential_label(),
            var = id.env_var(),
        )
    })
}

/// Construct the weather provider from config.
pub fn weather_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = credential_or_hint(config, ProviderId::OpenWeather)?;
    Ok(Box::new(OpenWeatherClient::new(api_key)?))
}

/// Construct the geocoding suggestion provider from config.
pub fn suggestion_provider_from_config(
    config: &Config,
) -> anyhow::Result<Box<dyn SuggestionProvider>> {
    let username = credential_or_hint(config, ProviderId::GeoNames)?;
    Ok(Box::new(GeoNamesClient::new(username)?))
}
