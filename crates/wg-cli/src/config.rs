//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Weekday;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wg_core::WeekConfig;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// First weekday of the displayed week.
    pub week_start: Weekday,

    /// Events file used when `--events` is not given.
    pub events_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("week_start", &self.week_start)
            .field("events_path", &self.events_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            week_start: WeekConfig::default().week_start,
            events_path: data_dir.join("events.json"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (WG_*)
        figment = figment.merge(Env::prefixed("WG_"));

        figment.extract()
    }

    /// The layout settings for the core builders.
    pub const fn week_config(&self) -> WeekConfig {
        WeekConfig {
            week_start: self.week_start,
        }
    }
}

/// Returns the platform-specific config directory for wg.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wg"))
}

/// Returns the platform-specific data directory for wg.
///
/// On Linux: `~/.local/share/wg`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("wg"))
}
