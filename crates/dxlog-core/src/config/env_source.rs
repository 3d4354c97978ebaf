//! Environment variable level source

use std::env;

use super::traits::LevelSource;

/// Reads level keys from the process environment
///
/// Values are read on every call, so changes to the environment are picked
/// up by the next resolution.
///
/// # Example
///
/// ```
/// use dxlog_core::config::{EnvLevelSource, LevelSource};
///
/// let source = EnvLevelSource::new();
/// let _root = source.get("LOGGING_LEVEL_ROOT");
/// ```
#[derive(Debug, Default)]
pub struct EnvLevelSource {
    _private: (),
}

impl EnvLevelSource {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl LevelSource for EnvLevelSource {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.trim().is_empty())
    }
}
