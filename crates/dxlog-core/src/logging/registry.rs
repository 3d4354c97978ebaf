//! Logger registry
//!
//! Caches one [`Logger`] per (sink family, identifier). The whole
//! lookup-construct-insert sequence runs under the family's lock, so
//! concurrent first requests for an identifier build exactly one instance.
//!
//! A process-wide registry is created on first use and lives for the rest of
//! the process. Tests build their own registries with [`LoggerRegistry::new`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::console::{ConsoleOutput, ConsoleSink};
use super::file_logger::{FileHandle, FileSink};
use super::logger::Logger;
use super::option::{apply_options, LoggerContext, LoggerOption};
use super::sink::Sink;
use crate::config::{EnvLevelSource, LevelSource, MemoryLevelSource};
use crate::resolver::LevelResolver;

/// How a registry resolves levels and where console loggers write
#[derive(Clone)]
pub struct RegistryConfig {
    source: Arc<dyn LevelSource>,
    console_output: Option<ConsoleOutput>,
}

impl RegistryConfig {
    /// Environment source, console stream chosen by the mode flag
    pub fn new() -> Self {
        Self {
            source: Arc::new(EnvLevelSource::new()),
            console_output: None,
        }
    }

    /// Empty in-memory source and a captured console, for tests and examples
    pub fn in_memory() -> Self {
        Self::new()
            .with_source(Arc::new(MemoryLevelSource::new()))
            .with_console_output(ConsoleOutput::captured())
    }

    pub fn with_source(mut self, source: Arc<dyn LevelSource>) -> Self {
        self.source = source;
        self
    }

    /// Send console records here instead of stdout/stderr
    pub fn with_console_output(mut self, output: ConsoleOutput) -> Self {
        self.console_output = Some(output);
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("source", &self.source.name())
            .field("console_output", &self.console_output)
            .finish()
    }
}

type FileKey = (PathBuf, String);

pub(crate) struct RegistryInner {
    resolver: Arc<LevelResolver>,
    console_output: Option<ConsoleOutput>,
    console: Mutex<HashMap<String, Logger>>,
    files: Mutex<HashMap<FileKey, Logger>>,
    constructed: AtomicUsize,
}

/// Cache of loggers keyed by sink family and identifier
///
/// Cloning a registry yields another handle to the same cache.
///
/// # Example
///
/// ```
/// use dxlog_core::logging::{Logger, LoggerRegistry, RegistryConfig};
///
/// let registry = LoggerRegistry::new(RegistryConfig::in_memory());
/// let a = registry.get("orders", &[]);
/// let b = registry.get("orders", &[]);
/// assert!(Logger::ptr_eq(&a, &b));
/// assert_eq!(registry.constructed_count(), 1);
/// ```
#[derive(Clone)]
pub struct LoggerRegistry {
    inner: Arc<RegistryInner>,
}

impl LoggerRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_resolver(
            Arc::new(LevelResolver::new(config.source)),
            config.console_output,
        )
    }

    pub(crate) fn with_resolver(
        resolver: Arc<LevelResolver>,
        console_output: Option<ConsoleOutput>,
    ) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                resolver,
                console_output,
                console: Mutex::new(HashMap::new()),
                files: Mutex::new(HashMap::new()),
                constructed: AtomicUsize::new(0),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<RegistryInner>) -> Self {
        Self { inner }
    }

    pub fn resolver(&self) -> &Arc<LevelResolver> {
        &self.inner.resolver
    }

    /// Console logger for `id`.
    ///
    /// Options only take effect when this call constructs the logger. On a
    /// cache hit they are ignored and the existing instance is returned.
    pub fn get(&self, id: &str, options: &[LoggerOption]) -> Logger {
        let mut loggers = self.inner.console.lock();
        if let Some(logger) = loggers.get(id) {
            return logger.clone();
        }

        let resolver = &self.inner.resolver;
        let context = apply_options(LoggerContext::new(resolver.resolve(id)), options);
        let sink = Sink::Console(ConsoleSink::for_mode(
            resolver.is_dev_mode(),
            self.inner.console_output.clone(),
        ));
        let logger = self.construct(id, sink, context, options.to_vec());
        loggers.insert(id.to_string(), logger.clone());
        logger
    }

    /// File logger for `id` writing to `handle`
    pub fn get_file(&self, handle: &FileHandle, id: &str) -> Logger {
        let key = (handle.registry_key(), id.to_string());
        let mut loggers = self.inner.files.lock();
        if let Some(logger) = loggers.get(&key) {
            return logger.clone();
        }

        let context = LoggerContext::new(self.inner.resolver.resolve(id));
        let sink = Sink::File(FileSink::new(handle.clone()));
        let logger = self.construct(id, sink, context, Vec::new());
        loggers.insert(key, logger.clone());
        logger
    }

    /// The shared no-op logger. It is never cached or counted.
    pub fn no_op(&self) -> Logger {
        Logger::no_op()
    }

    fn construct(
        &self,
        id: &str,
        sink: Sink,
        context: LoggerContext,
        options: Vec<LoggerOption>,
    ) -> Logger {
        self.inner.constructed.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            logger = id,
            family = sink.family().as_str(),
            level = %context.level,
            "constructed logger"
        );
        Logger::build(
            id,
            sink,
            context,
            options,
            self.inner.resolver.clone(),
            Arc::downgrade(&self.inner),
        )
    }

    /// How many loggers this registry has built
    pub fn constructed_count(&self) -> usize {
        self.inner.constructed.load(Ordering::SeqCst)
    }

    /// Number of cached loggers across families
    pub fn len(&self) -> usize {
        self.inner.console.lock().len() + self.inner.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached logger and zero the construction count (mainly for
    /// testing). Handles already given out keep working but are no longer
    /// returned by `get`.
    pub fn reset(&self) {
        self.inner.console.lock().clear();
        self.inner.files.lock().clear();
        self.inner.constructed.store(0, Ordering::SeqCst);
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("resolver", &self.inner.resolver)
            .field("loggers", &self.len())
            .field("constructed", &self.constructed_count())
            .finish()
    }
}

/// Process-wide registry
static GLOBAL_REGISTRY: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::default);

/// The process-wide registry, reading configuration from the environment
pub fn global_registry() -> &'static LoggerRegistry {
    &GLOBAL_REGISTRY
}

/// Console logger for `id` from the process-wide registry
///
/// ```
/// use dxlog_core::logging::{get_logger, with_caller};
/// use dxlog_core::log_info;
///
/// let logger = get_logger("doc-example", &[with_caller()]);
/// log_info!(logger, "listening on port {}", 8080);
/// ```
pub fn get_logger(id: &str, options: &[LoggerOption]) -> Logger {
    GLOBAL_REGISTRY.get(id, options)
}

/// File logger for `id` from the process-wide registry
pub fn get_file_logger(handle: &FileHandle, id: &str) -> Logger {
    GLOBAL_REGISTRY.get_file(handle, id)
}

/// The shared no-op logger
pub fn no_op_logger() -> Logger {
    Logger::no_op()
}
