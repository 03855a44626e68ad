use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::providers::freecurrencyapi::DEFAULT_BASE_URL;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FreeCurrencyApiConfig {
    pub base_url: String,
}

impl Default for FreeCurrencyApiConfig {
    fn default() -> Self {
        FreeCurrencyApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub freecurrencyapi: FreeCurrencyApiConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Base currency used when `--from` is not given
    pub base_currency: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Picks the API key, preferring `override_key` over the config file.
    ///
    /// The key is opaque; only its presence is checked.
    pub fn resolve_api_key(&self, override_key: Option<&str>) -> Result<String> {
        override_key
            .or(self.api_key.as_deref())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .context(
                "No FreeCurrencyAPI key configured. Set `api_key` in the config file, \
                 pass --api-key or set FREECURRENCYAPI_KEY",
            )
    }
}
