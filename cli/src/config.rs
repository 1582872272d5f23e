// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use recur_ical::{DuplicatePartBehavior, RRuleDecoder};
use tokio::fs;

/// The application name, used for the binary and the config directory.
pub const APP_NAME: &str = "recur";

const RECUR_CONFIG_ENV: &str = "RECUR_CONFIG";

/// Load the configuration.
///
/// The path is taken from the `--config` flag, then the `RECUR_CONFIG`
/// environment variable, then `{APP_NAME}/config.toml` in the user config
/// directory. Built-in defaults apply when none of them names a file.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(RECUR_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let Some(config) = get_config_dir().map(|a| a.join(format!("{APP_NAME}/config.toml")))
        else {
            tracing::debug!("user config directory not found, using defaults");
            return Ok(Config::default());
        };
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            return Ok(Config::default());
        }
        config
    };

    tracing::debug!(path = %path.display(), "reading config...");
    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<Config>()
        .map_err(|e| format!("Invalid config file at {}: {}", path.display(), e).into())
}

/// Configuration for the recur application.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Decoder settings.
    pub decoder: DecoderConfig,
}

/// The `[decoder]` table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DecoderConfig {
    /// How a rule part that occurs more than once is resolved.
    pub duplicate_parts: DuplicatePartBehavior,
}

impl DecoderConfig {
    /// Build a decoder, letting `overridden` take precedence over the file.
    pub fn decoder(self, overridden: Option<DuplicatePartBehavior>) -> RRuleDecoder {
        RRuleDecoder::new(overridden.unwrap_or(self.duplicate_parts))
    }
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir
}
