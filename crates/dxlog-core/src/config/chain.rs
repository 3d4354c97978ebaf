//! Chained level source with fallback behavior

use std::sync::Arc;

use super::traits::LevelSource;

/// Tries each source in order and returns the first non-blank value
///
/// # Example
///
/// ```
/// use dxlog_core::config::{ChainLevelSource, EnvLevelSource, LevelSource, MemoryLevelSource};
/// use std::sync::Arc;
///
/// let env: Arc<dyn LevelSource> = Arc::new(EnvLevelSource::new());
/// let defaults: Arc<dyn LevelSource> =
///     Arc::new(MemoryLevelSource::with_values([("LOGGING_LEVEL_ROOT", "warn")]));
/// let chain = ChainLevelSource::new(vec![env, defaults]);
/// assert!(chain.get("LOGGING_LEVEL_ROOT").is_some());
/// ```
pub struct ChainLevelSource {
    sources: Vec<Arc<dyn LevelSource>>,
}

impl ChainLevelSource {
    pub fn new(sources: Vec<Arc<dyn LevelSource>>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[Arc<dyn LevelSource>] {
        &self.sources
    }

    /// Find which source provides a key
    pub fn find_source(&self, key: &str) -> Option<&Arc<dyn LevelSource>> {
        self.sources.iter().find(|source| source.get(key).is_some())
    }
}

impl std::fmt::Debug for ChainLevelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("ChainLevelSource")
            .field("sources", &names)
            .finish()
    }
}

impl LevelSource for ChainLevelSource {
    fn name(&self) -> &str {
        "chain"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryLevelSource;

    #[test]
    fn test_chain_first_match_wins() {
        let first: Arc<dyn LevelSource> =
            Arc::new(MemoryLevelSource::with_values([("LOGGING_LEVEL_A", "debug")]));
        let second: Arc<dyn LevelSource> = Arc::new(MemoryLevelSource::with_values([
            ("LOGGING_LEVEL_A", "error"),
            ("LOGGING_LEVEL_B", "warn"),
        ]));
        let chain = ChainLevelSource::new(vec![first, second]);

        assert_eq!(chain.get("LOGGING_LEVEL_A"), Some("debug".to_string()));
        assert_eq!(chain.get("LOGGING_LEVEL_B"), Some("warn".to_string()));
        assert_eq!(chain.get("LOGGING_LEVEL_C"), None);
    }

    #[test]
    fn test_chain_skips_blank() {
        let first: Arc<dyn LevelSource> =
            Arc::new(MemoryLevelSource::with_values([("LOGGING_LEVEL_A", "")]));
        let second: Arc<dyn LevelSource> =
            Arc::new(MemoryLevelSource::with_values([("LOGGING_LEVEL_A", "trace")]));
        let chain = ChainLevelSource::new(vec![first, second]);

        assert_eq!(chain.get("LOGGING_LEVEL_A"), Some("trace".to_string()));
        assert_eq!(chain.find_source("LOGGING_LEVEL_A").map(|s| s.name()), Some("memory"));
    }

    #[test]
    fn test_empty_chain() {
        let chain = ChainLevelSource::new(Vec::new());
        assert!(chain.sources().is_empty());
        assert_eq!(chain.get("LOGGING_LEVEL_ROOT"), None);
        assert!(format!("{:?}", chain).contains("ChainLevelSource"));
    }
}
