use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::pagination::{CLOSE_COMMAND, DEFAULT_MAX_IDENTIFIER_LEN};

/// Shortest identifier limit that still fits the close control.
const MIN_IDENTIFIER_LEN: usize = 32;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/trackindex/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("trackindex").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The command name is a single word and not the reserved close command
    /// - The identifier limit is within what chat hosts accept
    /// - The embed colour is a 24-bit RGB value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.bot.command_name;
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationError {
                message: format!("bot.command_name '{}' must be a single word", name),
            });
        }
        if name.eq_ignore_ascii_case(CLOSE_COMMAND) {
            return Err(ConfigError::ValidationError {
                message: format!("bot.command_name '{}' is reserved", name),
            });
        }

        let len = self.bot.max_identifier_len;
        if !(MIN_IDENTIFIER_LEN..=DEFAULT_MAX_IDENTIFIER_LEN).contains(&len) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "bot.max_identifier_len must be between {} and {}, got {}",
                    MIN_IDENTIFIER_LEN, DEFAULT_MAX_IDENTIFIER_LEN, len
                ),
            });
        }

        if self.bot.embed_color > 0xFF_FFFF {
            return Err(ConfigError::ValidationError {
                message: format!("bot.embed_color {:#x} is not an RGB value", self.bot.embed_color),
            });
        }

        Ok(())
    }
}
