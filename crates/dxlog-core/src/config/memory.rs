//! In-memory level source

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::LevelSource;

/// In-memory level source for tests and embedded configuration
///
/// # Example
///
/// ```
/// use dxlog_core::config::{LevelSource, MemoryLevelSource};
///
/// let source = MemoryLevelSource::new();
/// source.set("LOGGING_LEVEL_ROOT", "warn");
/// assert_eq!(source.get("LOGGING_LEVEL_ROOT"), Some("warn".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryLevelSource {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryLevelSource {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Create a source with initial key/value pairs
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    pub fn clear(&self) {
        self.values.write().clear();
    }
}

impl LevelSource for MemoryLevelSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }
}
