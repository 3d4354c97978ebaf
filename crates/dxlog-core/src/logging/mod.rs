//! Logger facade, sinks and registry
//!
//! Components:
//! - `Level`: ordered severities plus the `Off` and `Unset` sentinels
//! - `Logger`: the facade handed to call sites
//! - sinks: `ConsoleSink`, `FileSink`, `NoOpSink`
//! - options: `with_caller`, `with_hook`, `with_level`
//! - `LoggerRegistry`: one logger per (sink family, identifier)

mod level;
mod record;
mod hook;
mod option;
mod console;
mod file_logger;
mod noop;
mod sink;
mod logger;
mod registry;

pub use level::{Level, LevelParseError};
pub use record::Record;
pub use hook::{CapturedRecord, FnHook, Hook, MemoryHook, SharedHook, TracingHook};
pub use option::{
    apply_options, with_caller, with_caller_skip, with_hook, with_hook_fn, with_level,
    CallerCapture, LoggerContext, LoggerOption, DEFAULT_CALLER_SKIP,
};
pub use console::{ConsoleFormat, ConsoleOutput, ConsoleSink};
pub use file_logger::{file_locks, FileHandle, FileLock, FileLockTable, FileSink};
pub use noop::NoOpSink;
pub use sink::{Sink, SinkFamily};
pub use logger::{Logger, NOOP_LOGGER_ID};
pub use registry::{
    get_file_logger, get_logger, global_registry, no_op_logger, LoggerRegistry, RegistryConfig,
};
