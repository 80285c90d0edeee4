use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::provider::ProviderId;

/// Configuration for a single provider.
///
/// The credential is the OpenWeatherMap API key or the GeoNames username,
/// depending on the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub credential: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [providers.openweather]
    /// credential = "..."
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// Resolve the credential for a provider.
    ///
    /// The provider's environment variable (e.g. `SKYCAST_OPENWEATHER_API_KEY`)
    /// takes precedence over the config file, so credentials never have to be
    /// written to disk at all.
    pub fn credential_for(&self, id: ProviderId) -> Option<String> {
        self.credential_with_override(id, env::var(id.env_var()).ok())
    }

    fn credential_with_override(&self, id: ProviderId, overridden: Option<String>) -> Option<String> {
        overridden
            .filter(|v| !v.is_empty())
            .or_else(|| self.providers.get(id.as_str()).map(|cfg| cfg.credential.clone()))
    }

    pub fn is_provider_configured(&self, id: ProviderId) -> bool {
        self.credential_for(id).is_some()
    }

    /// Set/replace a provider credential.
    pub fn upsert_credential(&mut self, id: ProviderId, credential: String) {
        self.providers.insert(id.as_str().to_string(), ProviderConfig { credential });
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;

    #[test]
    fn missing_credential_is_none() {
        let cfg = Config::default();
        assert_eq!(cfg.credential_with_override(ProviderId::GeoNames, None), None);
    }

    #[test]
    fn upsert_and_read_back() {
        let mut cfg = Config::default();
        cfg.upsert_credential(ProviderId::OpenWeather, "OPEN_KEY".into());

        let key = cfg.credential_with_override(ProviderId::OpenWeather, None);
        assert_eq!(key.as_deref(), Some("OPEN_KEY"));
    }

    #[test]
    fn upsert_replaces_existing_credential() {
        let mut cfg = Config::default();
        cfg.upsert_credential(ProviderId::GeoNames, "first".into());
        cfg.upsert_credential(ProviderId::GeoNames, "second".into());

        let cred = cfg.credential_with_override(ProviderId::GeoNames, None);
        assert_eq!(cred.as_deref(), Some("second"));
    }

    #[test]
    fn environment_overrides_file() {
        let mut cfg = Config::default();
        cfg.upsert_credential(ProviderId::OpenWeather, "FILE_KEY".into());

        let key =
            cfg.credential_with_override(ProviderId::OpenWeather, Some("ENV_KEY".to_string()));
        assert_eq!(key.as_deref(), Some("ENV_KEY"));
    }

    #[test]
    fn empty_environment_value_falls_back_to_file() {
        let mut cfg = Config::default();
        cfg.upsert_credential(ProviderId::OpenWeather, "FILE_KEY".into());

        let key = cfg.credential_with_override(ProviderId::OpenWeather, Some(String::new()));
        assert_eq!(key.as_deref(), Some("FILE_KEY"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.upsert_credential(ProviderId::OpenWeather, "OPEN_KEY".into());
        cfg.upsert_credential(ProviderId::GeoNames, "someuser".into());

        let serialized = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");

        assert_eq!(
            parsed.credential_with_override(ProviderId::OpenWeather, None).as_deref(),
            Some("OPEN_KEY")
        );
        assert_eq!(
            parsed.credential_with_override(ProviderId::GeoNames, None).as_deref(),
            Some("someuser")
        );
    }
}
