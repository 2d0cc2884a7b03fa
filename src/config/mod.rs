mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{BotConfig, Config, LoggingConfig, StoreConfig};
