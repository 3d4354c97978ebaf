//! The record passed to sinks and hooks

use std::panic::Location;

use chrono::{DateTime, Local};

use super::level::Level;

/// One emitted log event
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Identifier of the emitting logger
    pub logger: &'a str,
    /// Severity of the call
    pub level: Level,
    /// Emission time
    pub time: DateTime<Local>,
    /// Fully rendered message
    pub message: &'a str,
    /// Call site, present only when the logger was built with caller capture
    pub caller: Option<&'static Location<'static>>,
}

impl<'a> Record<'a> {
    pub fn new(logger: &'a str, level: Level, message: &'a str) -> Self {
        Self {
            logger,
            level,
            time: Local::now(),
            message,
            caller: None,
        }
    }

    pub fn with_caller(mut self, caller: Option<&'static Location<'static>>) -> Self {
        self.caller = caller;
        self
    }

    /// `file:line` of the call site, if captured
    pub fn caller_display(&self) -> Option<String> {
        self.caller
            .map(|location| format!("{}:{}", location.file(), location.line()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_caller() {
        let record = Record::new("svc", Level::Info, "started");
        assert_eq!(record.logger, "svc");
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.message, "started");
        assert!(record.caller_display().is_none());
    }

    #[test]
    fn test_record_caller_display() {
        let here = Location::caller();
        let record = Record::new("svc", Level::Debug, "x").with_caller(Some(here));
        let display = record.caller_display().unwrap();
        assert!(display.starts_with(file!()));
        assert!(display.ends_with(&format!(":{}", here.line())));
    }
}
