//! Level configuration sources
//!
//! Supports multiple configuration sources:
//! - `EnvLevelSource`: process environment (the default)
//! - `MemoryLevelSource`: in-memory for testing
//! - `FileLevelSource`: YAML file
//! - `ChainLevelSource`: ordered fallback across sources

mod traits;
mod env_source;
mod memory;
mod file;
mod chain;

pub use traits::{
    level_key, ConfigError, ConfigResult, LevelSource, DEV_MODE, LEVEL_KEY_PREFIX, MODE_KEY,
    ROOT_LEVEL_KEY,
};
pub use env_source::EnvLevelSource;
pub use memory::MemoryLevelSource;
pub use file::{FileLevelSource, LevelFile};
pub use chain::ChainLevelSource;
