//! Logger facade
//!
//! [`Logger`] is a cheap, cloneable handle. Every handle obtained for the
//! same identifier (and sink family) points at one shared instance, so a
//! level change through one handle is seen through all of them.
//!
//! Every emission method checks the level before formatting. A call that is
//! filtered out never renders its arguments.

use std::fmt;
use std::panic::Location;
use std::sync::{Arc, Weak};

use once_cell::sync::{Lazy, OnceCell};

use super::hook::SharedHook;
use super::level::{AtomicLevel, Level};
use super::noop::NoOpSink;
use super::option::{CallerCapture, LoggerContext, LoggerOption};
use super::record::Record;
use super::registry::{LoggerRegistry, RegistryInner};
use super::sink::{Sink, SinkFamily};
use crate::resolver::LevelResolver;

/// Identifier of the shared no-op logger
pub const NOOP_LOGGER_ID: &str = "noop";

pub(crate) struct LoggerCore {
    id: String,
    level: AtomicLevel,
    sink: Sink,
    caller: Option<CallerCapture>,
    hooks: Vec<SharedHook>,
    options: Vec<LoggerOption>,
    resolver: Option<Arc<LevelResolver>>,
    registry: Weak<RegistryInner>,
    fallback: OnceCell<LoggerRegistry>,
}

/// Handle to a registered logger
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
}

static NOOP: Lazy<Logger> = Lazy::new(|| Logger::no_op_named(NOOP_LOGGER_ID));

impl Logger {
    pub(crate) fn build(
        id: &str,
        sink: Sink,
        context: LoggerContext,
        options: Vec<LoggerOption>,
        resolver: Arc<LevelResolver>,
        registry: Weak<RegistryInner>,
    ) -> Self {
        Self {
            core: Arc::new(LoggerCore {
                id: id.to_string(),
                level: AtomicLevel::new(context.level),
                sink,
                caller: context.caller,
                hooks: context.hooks,
                options,
                resolver: Some(resolver),
                registry,
                fallback: OnceCell::new(),
            }),
        }
    }

    /// The shared no-op logger
    pub fn no_op() -> Self {
        NOOP.clone()
    }

    fn no_op_named(id: &str) -> Self {
        Self {
            core: Arc::new(LoggerCore {
                id: id.to_string(),
                level: AtomicLevel::new(Level::Off),
                sink: Sink::NoOp(NoOpSink),
                caller: None,
                hooks: Vec::new(),
                options: Vec::new(),
                resolver: None,
                registry: Weak::new(),
                fallback: OnceCell::new(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.core.id
    }

    pub fn family(&self) -> SinkFamily {
        self.core.sink.family()
    }

    /// Whether two handles point at the same logger instance
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.core, &b.core)
    }

    /// Frame-skip count recorded by caller capture, if enabled
    pub fn caller_skip(&self) -> Option<usize> {
        self.core.caller.map(|c| c.skip)
    }

    // region - level

    pub fn level(&self) -> Level {
        self.core.level.load()
    }

    /// Name of the current level, e.g. `"info"` or `"off"`
    pub fn get_level(&self) -> &'static str {
        self.level().as_str()
    }

    /// Change the level of the shared instance.
    ///
    /// `raw` is either a level name or a logger identifier whose configured
    /// level should be adopted. Unusable values resolve to `info`. Ignored
    /// by no-op loggers. Concurrent calls are last-write-wins.
    pub fn set_level(&self, raw: &str) {
        if let Some(resolver) = &self.core.resolver {
            self.core.level.store(resolver.resolve_update(raw));
        }
    }

    /// Set an explicit level on the shared instance. Ignored by no-op loggers.
    pub fn set_level_to(&self, level: Level) {
        if self.core.resolver.is_some() {
            self.core.level.store(level);
        }
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.level().allows(level)
    }

    pub fn is_trace_enabled(&self) -> bool {
        self.is_enabled(Level::Trace)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    pub fn is_warning_enabled(&self) -> bool {
        self.is_enabled(Level::Warning)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }

    pub fn is_fatal_enabled(&self) -> bool {
        self.is_enabled(Level::Fatal)
    }

    pub fn is_panic_enabled(&self) -> bool {
        self.is_enabled(Level::Panic)
    }

    // endregion

    // region - emission

    /// Emit a record at `level` if the level gate allows it.
    ///
    /// The record is written, then hooks run. A `Panic` record then unwinds
    /// with the rendered message. When the gate rejects the call nothing
    /// happens, including for `Panic`.
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        // Location::caller() must not move into a closure: closures are not tracked.
        let caller = match self.core.caller {
            Some(_) => Some(Location::caller()),
            None => None,
        };
        let message = fmt::format(args);
        let record = Record::new(&self.core.id, level, &message).with_caller(caller);

        self.core.sink.write(&record);
        for hook in &self.core.hooks {
            hook.on_record(level, &message, &record);
        }

        if level == Level::Panic {
            panic!("{}", message);
        }
    }

    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warning, args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    /// Emit a fatal record. The process keeps running.
    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, args);
    }

    /// Emit a panic record, then panic with the rendered message.
    #[track_caller]
    pub fn panic(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Panic, args);
    }

    // endregion

    /// A logger of the same family and construction policy under another
    /// identifier.
    ///
    /// Console and file loggers go back through their registry, so the
    /// result is the cached instance for `new_id` if one exists. No-op
    /// loggers are simply relabeled.
    pub fn clone_as(&self, new_id: &str) -> Logger {
        match &self.core.sink {
            Sink::NoOp(_) => Logger::no_op_named(new_id),
            Sink::Console(_) => self.registry().get(new_id, &self.core.options),
            Sink::File(sink) => self.registry().get_file(sink.handle(), new_id),
        }
    }

    /// The registry that built this logger. Once that registry is dropped,
    /// a replacement with the same resolver is created on first use and
    /// kept for the lifetime of this logger.
    fn registry(&self) -> LoggerRegistry {
        if let Some(inner) = self.core.registry.upgrade() {
            return LoggerRegistry::from_inner(inner);
        }
        self.core
            .fallback
            .get_or_init(|| {
                let resolver = self
                    .core
                    .resolver
                    .clone()
                    .unwrap_or_else(|| Arc::new(LevelResolver::from_env()));
                let output = match &self.core.sink {
                    Sink::Console(console) => Some(console.output().clone()),
                    _ => None,
                };
                LoggerRegistry::with_resolver(resolver, output)
            })
            .clone()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.core.id)
            .field("family", &self.family())
            .field("level", &self.level())
            .field("caller", &self.core.caller)
            .field("hooks", &self.core.hooks.len())
            .finish()
    }
}

/// Convenience macros for logging with format arguments
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)*) => {
        $logger.trace(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warning(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)*) => {
        $logger.fatal(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)*) => {
        $logger.panic(format_args!($($arg)*))
    };
}
