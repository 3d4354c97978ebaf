//! Severity levels and the shared, mutable level cell

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use thiserror::Error;

/// Severity of a log record, ordered from most to least verbose.
///
/// `Off` and `Unset` are sentinels: `Off` sits above every real severity so
/// nothing passes the gate, and `Unset` gates like `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
    Panic = 6,
    Off = 7,
    #[default]
    Unset = 8,
}

/// Errors produced when parsing a level name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelParseError {
    #[error("empty level value")]
    Empty,

    #[error("unknown level: {0}")]
    Unknown(String),
}

impl Level {
    /// The seven severities a record can carry, in ascending order.
    pub const SEVERITIES: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// The level used for gating: `Unset` counts as `Info`.
    pub fn effective(self) -> Level {
        match self {
            Level::Unset => Level::Info,
            other => other,
        }
    }

    /// Whether a record at `severity` passes a gate set to `self`.
    pub fn allows(self, severity: Level) -> bool {
        let threshold = self.effective();
        threshold != Level::Off && severity < Level::Off && severity >= threshold
    }

    /// Lowercase name, as accepted by `FromStr` and reported by `get_level`.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
            Level::Off => "off",
            Level::Unset => "unset",
        }
    }

    /// Three-letter tag used by the file and dev console formats.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Level::Trace => "TRC",
            Level::Debug => "DBG",
            Level::Info => "INF",
            Level::Warning => "WRN",
            Level::Error => "ERR",
            Level::Fatal => "FAT",
            Level::Panic => "PNC",
            Level::Off | Level::Unset => "NON",
        }
    }

    fn from_u8(raw: u8) -> Level {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warning,
            4 => Level::Error,
            5 => Level::Fatal,
            6 => Level::Panic,
            7 => Level::Off,
            _ => Level::Unset,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(LevelParseError::Empty);
        }
        match value.to_lowercase().as_str() {
            "off" => Ok(Level::Off),
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "panic" => Ok(Level::Panic),
            _ => Err(LevelParseError::Unknown(value.to_string())),
        }
    }
}

/// Level cell shared by every handle to one logger.
///
/// Loads and stores are relaxed. Concurrent `store` calls race and the last
/// write wins.
#[derive(Debug)]
pub(crate) struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    pub(crate) fn new(level: Level) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    pub(crate) fn load(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Relaxed))
    }

    pub(crate) fn store(&self, level: Level) {
        self.0.store(level as u8, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Panic);
        assert!(Level::Panic < Level::Off);
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!("TRACE".parse::<Level>(), Ok(Level::Trace));
        assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
        assert_eq!(" Info ".parse::<Level>(), Ok(Level::Info));
        assert_eq!("warn".parse::<Level>(), Ok(Level::Warning));
        assert_eq!("warning".parse::<Level>(), Ok(Level::Warning));
        assert_eq!("error".parse::<Level>(), Ok(Level::Error));
        assert_eq!("Fatal".parse::<Level>(), Ok(Level::Fatal));
        assert_eq!("panic".parse::<Level>(), Ok(Level::Panic));
        assert_eq!("OFF".parse::<Level>(), Ok(Level::Off));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Level>(), Err(LevelParseError::Empty));
        assert_eq!("   ".parse::<Level>(), Err(LevelParseError::Empty));
        assert_eq!(
            "verbose".parse::<Level>(),
            Err(LevelParseError::Unknown("verbose".to_string()))
        );
    }

    #[test]
    fn test_allows_matches_ordering() {
        for threshold in Level::SEVERITIES {
            for severity in Level::SEVERITIES {
                assert_eq!(threshold.allows(severity), severity >= threshold);
            }
        }
    }

    #[test]
    fn test_sentinels() {
        for severity in Level::SEVERITIES {
            assert!(!Level::Off.allows(severity));
        }
        assert!(Level::Unset.allows(Level::Info));
        assert!(!Level::Unset.allows(Level::Debug));
        assert_eq!(Level::default(), Level::Unset);
        assert_eq!(Level::Unset.effective(), Level::Info);
        assert!(!Level::Trace.allows(Level::Off));
        assert!(!Level::Trace.allows(Level::Unset));
    }

    #[test]
    fn test_abbreviations() {
        let tags: Vec<_> = Level::SEVERITIES.iter().map(|l| l.abbreviation()).collect();
        assert_eq!(tags, ["TRC", "DBG", "INF", "WRN", "ERR", "FAT", "PNC"]);
        assert_eq!(Level::Off.abbreviation(), "NON");
        assert_eq!(Level::Unset.abbreviation(), "NON");
    }

    #[test]
    fn test_atomic_level_round_trip() {
        let cell = AtomicLevel::new(Level::Info);
        assert_eq!(cell.load(), Level::Info);
        cell.store(Level::Off);
        assert_eq!(cell.load(), Level::Off);
        cell.store(Level::Unset);
        assert_eq!(cell.load(), Level::Unset);
    }
}
