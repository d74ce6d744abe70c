// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fs, path::PathBuf, str::FromStr};

use recur_ical::FormatOptions;

use crate::APP_NAME;
use crate::util::ArgOutputFormat;

const RECUR_CONFIG_ENV: &str = "RECUR_CONFIG";

/// Line length used when the configuration does not set one.
const DEFAULT_FOLDING: usize = 75;

/// Load the configuration.
///
/// The path is taken from the `--config` flag, then the `RECUR_CONFIG`
/// environment variable, then `<config dir>/recur/config.toml`. Only a
/// missing default file falls back to the defaults.
#[tracing::instrument]
pub fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(RECUR_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            return Ok(Config::default());
        }
        config
    };

    fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse()
}

/// Configuration for the recur command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub format: FormatConfig,
}

/// The `[format]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Write UNTIL when formatting
    pub until: bool,

    /// Fold content lines at this many octets, 0 disables folding
    pub folding: usize,

    /// Output format of `parse` and `validate`
    pub output: ArgOutputFormat,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            until: false,
            folding: DEFAULT_FOLDING,
            output: ArgOutputFormat::Text,
        }
    }
}

impl Config {
    /// Formatter options, with UNTIL written when either the flag or the configuration asks.
    pub fn format_options(&self, until: bool) -> FormatOptions {
        let folding = self.format.folding;
        FormatOptions::default()
            .until(until || self.format.until)
            .folding((folding > 0).then_some(folding))
    }
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
