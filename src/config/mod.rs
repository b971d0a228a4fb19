//! # Configuration Management Module
//!
//! Settings for the game host, loaded from a TOML file with defaults for
//! every option.
//!
//! ## Configuration Structure
//!
//! - [`GameSettings`] - state file location, RNG seeding, sender normalization
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chatrpg::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     config.validate()?;
//!     println!("state file: {}", config.game.state_file);
//!     Ok(())
//! }
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Log levels accepted by `[logging] level`.
pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    /// JSON document holding players, battles, zones, items and deities.
    #[serde(default = "default_state_file")]
    pub state_file: String,
    /// Seed for the host's random generator; entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    /// Transport prefix stripped from inbound sender ids.
    #[serde(default = "default_sender_prefix")]
    pub sender_prefix: String,
    /// Persist the state after every processed command.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_state_file() -> String {
    "data/game_state.json".to_string()
}

fn default_sender_prefix() -> String {
    "whatsapp:".to_string()
}

fn default_autosave() -> bool {
    true
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            state_file: default_state_file(),
            rng_seed: None,
            sender_prefix: default_sender_prefix(),
            autosave: default_autosave(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| anyhow!("Failed to create {}: {}", parent.display(), e))?;
            }
        }
        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject settings the host cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.game.state_file.trim().is_empty() {
            return Err(anyhow!("game.state_file must not be empty"));
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(anyhow!(
                "Unknown logging.level '{}' (expected one of: {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }

    /// Parsed `[logging] level`, `Info` when unrecognized.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.logging
            .level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Info)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            game: GameSettings::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("chatrpg.log".to_string()),
            },
        }
    }
}
