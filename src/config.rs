// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Configuration management.
//!
//! Loaded with figment from, in increasing precedence:
//! 1. Default values
//! 2. TOML file (`~/.config/lunarium/config.toml` or `--config FILE`)
//! 3. Environment variables prefixed with `LUNARIUM_`, nested with `__`
//!    (e.g. `LUNARIUM_EPHEMERIS__API_KEY`)

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_DIR_NAME: &str = "lunarium";
const ENV_PREFIX: &str = "LUNARIUM_";

/// Default phase endpoint (NASA/JPL small-body API).
pub const DEFAULT_PHASE_URL: &str = "https://ssd-api.jpl.nasa.gov/sbdb.api";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote ephemeris source.
    pub ephemeris: EphemerisConfig,
    /// Output preferences.
    pub display: DisplayConfig,
}

/// Remote ephemeris settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EphemerisConfig {
    /// Try the remote source before the local calculation.
    pub enabled: bool,
    /// Phase endpoint.
    pub phase_url: String,
    /// Events endpoint; no remote events when unset.
    pub events_url: Option<String>,
    /// API key for the phase endpoint; no remote phases when unset.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Emit JSON by default.
    pub json: bool,
    /// Directory holding `images/moon-phases/*.png`; when set, missing
    /// images are replaced by a placeholder.
    pub asset_root: Option<PathBuf>,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            phase_url: DEFAULT_PHASE_URL.to_string(),
            events_url: None,
            api_key: None,
            timeout_secs: 5,
        }
    }
}

impl EphemerisConfig {
    /// Request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether any remote lookup is configured at all.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.enabled && (self.api_key.is_some() || self.events_url.is_some())
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.ephemeris.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "ephemeris.timeout_secs must be greater than 0".to_string(),
            });
        }

        let urls = std::iter::once(&self.ephemeris.phase_url).chain(&self.ephemeris.events_url);
        for url in urls {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::ConfigValidation {
                    message: format!("ephemeris URL must be http(s): {url}"),
                });
            }
        }

        Ok(())
    }
}
