//! Side-channel hooks invoked for every emitted record
//!
//! Hooks run synchronously on the emitting thread, after the sink has
//! written the record. A slow hook stalls the caller.

use std::sync::Arc;

use parking_lot::Mutex;

use super::level::Level;
use super::record::Record;

/// Callback attached to a logger with [`with_hook`](super::with_hook)
pub trait Hook: Send + Sync {
    /// Called once per emitted record
    fn on_record(&self, level: Level, message: &str, record: &Record<'_>);
}

/// Type alias for a shared hook
pub type SharedHook = Arc<dyn Hook>;

/// Adapter turning a closure into a [`Hook`]
pub struct FnHook<F>(F);

impl<F> FnHook<F>
where
    F: Fn(Level, &str, &Record<'_>) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Hook for FnHook<F>
where
    F: Fn(Level, &str, &Record<'_>) + Send + Sync,
{
    fn on_record(&self, level: Level, message: &str, record: &Record<'_>) {
        (self.0)(level, message, record)
    }
}

/// Owned copy of a record kept by [`MemoryHook`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub logger: String,
    pub level: Level,
    pub message: String,
    pub caller: Option<String>,
}

/// Hook that keeps every record in memory
///
/// Useful for asserting on log output in tests.
///
/// # Example
///
/// ```
/// use dxlog_core::logging::{with_hook, Level, LoggerRegistry, MemoryHook, RegistryConfig};
/// use dxlog_core::log_info;
/// use std::sync::Arc;
///
/// let hook = Arc::new(MemoryHook::new());
/// let registry = LoggerRegistry::new(RegistryConfig::in_memory());
/// let logger = registry.get("doc-hook", &[with_hook(hook.clone())]);
///
/// log_info!(logger, "hello {}", "world");
/// assert_eq!(hook.messages(), vec!["hello world".to_string()]);
/// assert_eq!(hook.records()[0].level, Level::Info);
/// ```
#[derive(Debug, Default)]
pub struct MemoryHook {
    records: Mutex<Vec<CapturedRecord>>,
}

impl MemoryHook {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Hook for MemoryHook {
    fn on_record(&self, level: Level, message: &str, record: &Record<'_>) {
        self.records.lock().push(CapturedRecord {
            logger: record.logger.to_string(),
            level,
            message: message.to_string(),
            caller: record.caller_display(),
        });
    }
}

/// Hook that forwards records into the `tracing` ecosystem
///
/// Fatal and panic records are reported as `tracing` errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl TracingHook {
    pub fn new() -> Self {
        Self
    }
}

impl Hook for TracingHook {
    fn on_record(&self, level: Level, message: &str, record: &Record<'_>) {
        let logger = record.logger;
        match level {
            Level::Trace => tracing::trace!(logger, "{}", message),
            Level::Debug => tracing::debug!(logger, "{}", message),
            Level::Info => tracing::info!(logger, "{}", message),
            Level::Warning => tracing::warn!(logger, "{}", message),
            Level::Error | Level::Fatal | Level::Panic => {
                tracing::error!(logger, severity = level.as_str(), "{}", message)
            }
            Level::Off | Level::Unset => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_memory_hook_collects() {
        let hook = MemoryHook::new();
        assert!(hook.is_empty());

        let record = Record::new("svc", Level::Warning, "disk low");
        hook.on_record(Level::Warning, "disk low", &record);

        assert_eq!(hook.len(), 1);
        assert_eq!(
            hook.records()[0],
            CapturedRecord {
                logger: "svc".to_string(),
                level: Level::Warning,
                message: "disk low".to_string(),
                caller: None,
            }
        );

        hook.clear();
        assert!(hook.is_empty());
    }

    #[test]
    fn test_fn_hook_invoked() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let hook = FnHook::new(move |level: Level, message: &str, _record: &Record<'_>| {
            assert_eq!(level, Level::Error);
            assert_eq!(message, "boom");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        hook.on_record(Level::Error, "boom", &Record::new("svc", Level::Error, "boom"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tracing_hook_without_subscriber() {
        let hook = TracingHook::new();
        for level in Level::SEVERITIES {
            hook.on_record(level, "message", &Record::new("svc", level, "message"));
        }
    }

    #[test]
    fn test_tracing_hook_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingHook>();
        assert_send_sync::<MemoryHook>();
    }
}
