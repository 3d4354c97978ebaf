//! Effective level resolution for logger identifiers
//!
//! Lookup order for an identifier `id`:
//! 1. `LOGGING_LEVEL_<ID>` (uppercased, `-` replaced by `_`)
//! 2. `LOGGING_LEVEL_ROOT`
//! 3. `Info`
//!
//! Values that do not parse fall back to `Info`. Resolution never fails.

use std::sync::Arc;

use crate::config::{level_key, EnvLevelSource, LevelSource, ROOT_LEVEL_KEY};
use crate::logging::Level;

/// Level used when nothing usable is configured
pub const DEFAULT_LEVEL: Level = Level::Info;

/// Resolves effective levels from a [`LevelSource`]
pub struct LevelResolver {
    source: Arc<dyn LevelSource>,
}

impl LevelResolver {
    pub fn new(source: Arc<dyn LevelSource>) -> Self {
        Self { source }
    }

    /// Resolver over the process environment
    pub fn from_env() -> Self {
        Self::new(Arc::new(EnvLevelSource::new()))
    }

    pub fn source(&self) -> &Arc<dyn LevelSource> {
        &self.source
    }

    /// Raw configured value for `id`, falling back to the root key
    pub fn configured_value(&self, id: &str) -> Option<String> {
        self.source
            .get(&level_key(id))
            .or_else(|| self.source.get(ROOT_LEVEL_KEY))
    }

    /// Effective level for a logger identifier
    pub fn resolve(&self, id: &str) -> Level {
        let Some(raw) = self.configured_value(id) else {
            return DEFAULT_LEVEL;
        };
        match raw.parse::<Level>() {
            Ok(level) => level,
            Err(err) => {
                tracing::debug!(logger = id, error = %err, "invalid level configuration, using info");
                DEFAULT_LEVEL
            }
        }
    }

    /// Level for a runtime update.
    ///
    /// A level name is taken as-is. Anything else is treated as a logger
    /// identifier and resolved through the configuration keys.
    pub fn resolve_update(&self, raw: &str) -> Level {
        match raw.parse::<Level>() {
            Ok(level) => level,
            Err(_) => self.resolve(raw),
        }
    }

    /// Whether the console should use the developer stream
    pub fn is_dev_mode(&self) -> bool {
        self.source.is_dev_mode()
    }
}

impl Default for LevelResolver {
    fn default() -> Self {
        Self::from_env()
    }
}

impl std::fmt::Debug for LevelResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelResolver")
            .field("source", &self.source.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryLevelSource;

    fn resolver(values: &[(&str, &str)]) -> LevelResolver {
        LevelResolver::new(Arc::new(MemoryLevelSource::with_values(
            values.iter().map(|(k, v)| (k.to_string(), v.to_string())),
        )))
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(resolver(&[]).resolve("fresh"), Level::Info);
    }

    #[test]
    fn test_per_logger_key() {
        let r = resolver(&[("LOGGING_LEVEL_PAYMENTS_API", "debug")]);
        assert_eq!(r.resolve("payments-api"), Level::Debug);
        assert_eq!(r.resolve("other"), Level::Info);
    }

    #[test]
    fn test_root_fallback() {
        let r = resolver(&[("LOGGING_LEVEL_ROOT", "error")]);
        assert_eq!(r.resolve("fresh"), Level::Error);
    }

    #[test]
    fn test_blank_per_logger_falls_back_to_root() {
        let r = resolver(&[("LOGGING_LEVEL_SVC", "  "), ("LOGGING_LEVEL_ROOT", "warn")]);
        assert_eq!(r.resolve("svc"), Level::Warning);
    }

    #[test]
    fn test_per_logger_overrides_root() {
        let r = resolver(&[("LOGGING_LEVEL_SVC", "trace"), ("LOGGING_LEVEL_ROOT", "error")]);
        assert_eq!(r.resolve("svc"), Level::Trace);
    }

    #[test]
    fn test_off_any_case() {
        let r = resolver(&[("LOGGING_LEVEL_A", "OFF"), ("LOGGING_LEVEL_B", "Off")]);
        assert_eq!(r.resolve("a"), Level::Off);
        assert_eq!(r.resolve("b"), Level::Off);
    }

    #[test]
    fn test_invalid_value_is_info() {
        let r = resolver(&[("LOGGING_LEVEL_SVC", "loud"), ("LOGGING_LEVEL_ROOT", "error")]);
        assert_eq!(r.resolve("svc"), Level::Info);
    }

    #[test]
    fn test_resolve_update_with_level_name() {
        let r = resolver(&[("LOGGING_LEVEL_ROOT", "error")]);
        assert_eq!(r.resolve_update("debug"), Level::Debug);
        assert_eq!(r.resolve_update("OFF"), Level::Off);
    }

    #[test]
    fn test_resolve_update_with_identifier() {
        let r = resolver(&[("LOGGING_LEVEL_WORKER", "fatal"), ("LOGGING_LEVEL_ROOT", "error")]);
        assert_eq!(r.resolve_update("worker"), Level::Fatal);
        assert_eq!(r.resolve_update("unknown-id"), Level::Error);
        assert_eq!(r.resolve_update(""), Level::Error);
    }

    #[test]
    fn test_dev_mode() {
        assert!(!resolver(&[]).is_dev_mode());
        assert!(resolver(&[("LOGGING_ENV", "dev")]).is_dev_mode());
    }
}
