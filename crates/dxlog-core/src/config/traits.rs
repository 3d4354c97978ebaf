//! Level configuration source trait and key naming

use thiserror::Error;

/// Prefix of every per-logger level key
pub const LEVEL_KEY_PREFIX: &str = "LOGGING_LEVEL_";

/// Key consulted when a logger has no level of its own
pub const ROOT_LEVEL_KEY: &str = "LOGGING_LEVEL_ROOT";

/// Key holding the console mode flag
pub const MODE_KEY: &str = "LOGGING_ENV";

/// Value of [`MODE_KEY`] that selects the human-readable console stream
pub const DEV_MODE: &str = "dev";

/// Build the configuration key for a logger identifier.
///
/// `payments-api` becomes `LOGGING_LEVEL_PAYMENTS_API`.
pub fn level_key(id: &str) -> String {
    format!("{}{}", LEVEL_KEY_PREFIX, id.replace('-', "_").to_uppercase())
}

/// Errors that can occur while loading level configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where level and mode keys are read from
///
/// Implementations:
/// - `EnvLevelSource`: process environment
/// - `MemoryLevelSource`: in-memory map for tests
/// - `FileLevelSource`: YAML file
/// - `ChainLevelSource`: first source with a value wins
pub trait LevelSource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Read a raw value. Blank values count as absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Whether the console should use the developer stream
    fn is_dev_mode(&self) -> bool {
        self.get(MODE_KEY)
            .map(|mode| mode.trim() == DEV_MODE)
            .unwrap_or(false)
    }
}
