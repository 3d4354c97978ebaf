//! Construction options for console loggers
//!
//! An option is a value wrapping a transformation of [`LoggerContext`].
//! Options are applied in the order given, so when two options touch the
//! same field the last one wins.

use std::fmt;
use std::sync::Arc;

use super::hook::{FnHook, Hook, SharedHook};
use super::level::Level;
use super::record::Record;

/// Default number of frames skipped by caller capture
pub const DEFAULT_CALLER_SKIP: usize = 3;

/// Caller capture settings
///
/// Facade methods are `#[track_caller]`, so the reported location is always
/// the first frame outside the facade. `skip` is kept for callers that stack
/// their own `#[track_caller]` wrappers and want to record how deep they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerCapture {
    pub skip: usize,
}

impl Default for CallerCapture {
    fn default() -> Self {
        Self {
            skip: DEFAULT_CALLER_SKIP,
        }
    }
}

/// Everything an option can change before a logger is finalized
#[derive(Clone, Default)]
pub struct LoggerContext {
    /// Initial level, seeded from the resolver
    pub level: Level,
    /// Caller capture, `None` unless requested
    pub caller: Option<CallerCapture>,
    /// Hooks run for every emitted record, in attachment order
    pub hooks: Vec<SharedHook>,
}

impl LoggerContext {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            caller: None,
            hooks: Vec::new(),
        }
    }
}

impl fmt::Debug for LoggerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerContext")
            .field("level", &self.level)
            .field("caller", &self.caller)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

type Transform = dyn Fn(LoggerContext) -> LoggerContext + Send + Sync;

/// A transformation applied to a [`LoggerContext`] at construction time
#[derive(Clone)]
pub struct LoggerOption {
    name: &'static str,
    apply: Arc<Transform>,
}

impl LoggerOption {
    /// Build a custom option
    ///
    /// The closure runs while the registry holds its construction lock. It
    /// must not request a logger from the same registry (including through
    /// [`get_logger`](crate::logging::get_logger) on the global one), or it
    /// deadlocks.
    ///
    /// ```
    /// use dxlog_core::logging::{Level, LoggerContext, LoggerOption};
    ///
    /// let quiet = LoggerOption::new("quiet", |mut ctx: LoggerContext| {
    ///     ctx.level = Level::Error;
    ///     ctx
    /// });
    /// assert_eq!(quiet.apply(LoggerContext::new(Level::Info)).level, Level::Error);
    /// ```
    pub fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(LoggerContext) -> LoggerContext + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, context: LoggerContext) -> LoggerContext {
        (self.apply)(context)
    }
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoggerOption").field(&self.name).finish()
    }
}

/// Apply options to a context, strictly in order
pub fn apply_options(context: LoggerContext, options: &[LoggerOption]) -> LoggerContext {
    options
        .iter()
        .fold(context, |context, option| option.apply(context))
}

/// Record the call site of every emitted record
pub fn with_caller() -> LoggerOption {
    with_caller_skip(DEFAULT_CALLER_SKIP)
}

/// Record the call site, noting a custom frame-skip count.
///
/// The count is informational: it is reported by
/// [`Logger::caller_skip`](crate::logging::Logger::caller_skip) but does not
/// change which frame is recorded. The facade methods are `#[track_caller]`,
/// so the recorded location is always the first frame outside the facade.
pub fn with_caller_skip(skip: usize) -> LoggerOption {
    LoggerOption::new("caller", move |mut ctx| {
        ctx.caller = Some(CallerCapture { skip });
        ctx
    })
}

/// Attach a hook run for every emitted record
pub fn with_hook(hook: SharedHook) -> LoggerOption {
    LoggerOption::new("hook", move |mut ctx| {
        ctx.hooks.push(hook.clone());
        ctx
    })
}

/// Attach a closure as a hook
pub fn with_hook_fn<F>(f: F) -> LoggerOption
where
    F: Fn(Level, &str, &Record<'_>) + Send + Sync + 'static,
{
    let hook: Arc<dyn Hook> = Arc::new(FnHook::new(f));
    with_hook(hook)
}

/// Force the initial level, ignoring configuration
pub fn with_level(level: Level) -> LoggerOption {
    LoggerOption::new("level", move |mut ctx| {
        ctx.level = level;
        ctx
    })
}
