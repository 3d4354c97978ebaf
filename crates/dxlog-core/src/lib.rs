//! DxLog Core
//!
//! A logging facade that keeps call sites independent of the output backend.
//! Loggers are requested by identifier, cached process-wide, filtered by a
//! level resolved from configuration and bound to a console, file or no-op
//! sink.
//!
//! ## Configuration
//!
//! - `LOGGING_LEVEL_<ID>`: level for one logger (`payments-api` reads
//!   `LOGGING_LEVEL_PAYMENTS_API`)
//! - `LOGGING_LEVEL_ROOT`: level for loggers without their own key
//! - `LOGGING_ENV=dev`: human-readable console output on stderr
//!
//! Recognized levels: `off`, `trace`, `debug`, `info`, `warn`, `error`,
//! `fatal`, `panic`. Anything else means `info`.
//!
//! ```rust
//! use dxlog_core::logging::{get_logger, no_op_logger, with_caller};
//! use dxlog_core::{log_debug, log_info};
//!
//! let logger = get_logger("billing", &[with_caller()]);
//! log_info!(logger, "invoice {} issued", 1042);
//!
//! if logger.is_debug_enabled() {
//!     log_debug!(logger, "totals: {:?}", [12, 30]);
//! }
//!
//! // Structurally present, semantically silent.
//! let quiet = no_op_logger();
//! log_info!(quiet, "never written");
//! ```

pub mod config;
pub mod logging;
pub mod resolver;

// Re-export commonly used types
pub use config::{
    ChainLevelSource, ConfigError, ConfigResult, EnvLevelSource, FileLevelSource, LevelSource,
    MemoryLevelSource,
};

pub use logging::{
    get_file_logger, get_logger, global_registry, no_op_logger, with_caller, with_caller_skip,
    with_hook, with_hook_fn, with_level, FileHandle, Hook, Level, Logger, LoggerOption,
    LoggerRegistry, MemoryHook, RegistryConfig, SinkFamily, TracingHook,
};

pub use resolver::LevelResolver;
