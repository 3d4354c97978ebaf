//! File-based level source (YAML)

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::traits::{level_key, ConfigResult, LevelSource, MODE_KEY, ROOT_LEVEL_KEY};

/// Level configuration file structure
///
/// ```yaml
/// root: warn
/// mode: dev
/// loggers:
///   payments-api: debug
///   chatty-client: off
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LevelFile {
    /// Level applied to loggers without their own entry
    #[serde(default)]
    pub root: Option<String>,

    /// Console mode, `dev` for the human-readable stream
    #[serde(default)]
    pub mode: Option<String>,

    /// Per-logger levels keyed by identifier
    #[serde(default)]
    pub loggers: HashMap<String, String>,
}

impl LevelFile {
    /// Flatten into the same keys the environment uses
    fn into_keys(self) -> HashMap<String, String> {
        let mut keys: HashMap<String, String> = self
            .loggers
            .into_iter()
            .map(|(id, level)| (level_key(&id), level))
            .collect();
        if let Some(root) = self.root {
            keys.insert(ROOT_LEVEL_KEY.to_string(), root);
        }
        if let Some(mode) = self.mode {
            keys.insert(MODE_KEY.to_string(), mode);
        }
        keys
    }
}

/// Level source backed by a YAML file, read once at load time
///
/// # Example
///
/// ```no_run
/// use dxlog_core::config::{FileLevelSource, LevelSource};
///
/// let source = FileLevelSource::load("logging.yaml").unwrap();
/// let _svc = source.get("LOGGING_LEVEL_SVC");
/// ```
#[derive(Debug)]
pub struct FileLevelSource {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileLevelSource {
    /// Load the file. A missing file yields an empty source.
    pub fn load(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                values: HashMap::new(),
            });
        }

        let content = fs::read_to_string(&path)?;
        Self::from_yaml(path, &content)
    }

    /// Parse YAML content directly
    pub fn from_yaml(path: impl Into<PathBuf>, content: &str) -> ConfigResult<Self> {
        let file: LevelFile = if content.trim().is_empty() {
            LevelFile::default()
        } else {
            serde_yaml::from_str(content)?
        };
        Ok(Self {
            path: path.into(),
            values: file.into_keys(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LevelSource for FileLevelSource {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }
}
