use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pagination::{DEFAULT_EMBED_COLOR, DEFAULT_MAX_IDENTIFIER_LEN};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command and button settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Name of the track index command (default: "trackindex").
    #[serde(default = "default_command_name")]
    pub command_name: String,
    /// Longest button identifier the host accepts, in characters (default: 100).
    #[serde(default = "default_max_identifier_len")]
    pub max_identifier_len: usize,
    /// Accent colour of rendered pages as 0xRRGGBB (default: blue).
    #[serde(default = "default_embed_color")]
    pub embed_color: u32,
}

/// Track store settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// TOML file with `[[tracks]]` entries loaded at startup.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_command_name() -> String {
    "trackindex".to_string()
}

fn default_max_identifier_len() -> usize {
    DEFAULT_MAX_IDENTIFIER_LEN
}

fn default_embed_color() -> u32 {
    DEFAULT_EMBED_COLOR
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_name: default_command_name(),
            max_identifier_len: default_max_identifier_len(),
            embed_color: default_embed_color(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
