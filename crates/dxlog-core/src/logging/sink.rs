//! Sink variants behind the logger facade

use super::console::ConsoleSink;
use super::file_logger::FileSink;
use super::noop::NoOpSink;
use super::record::Record;

/// Which kind of sink a logger is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkFamily {
    Console,
    File,
    NoOp,
}

impl SinkFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkFamily::Console => "console",
            SinkFamily::File => "file",
            SinkFamily::NoOp => "noop",
        }
    }
}

/// A logger's output binding
#[derive(Debug, Clone)]
pub enum Sink {
    Console(ConsoleSink),
    File(FileSink),
    NoOp(NoOpSink),
}

impl Sink {
    pub fn family(&self) -> SinkFamily {
        match self {
            Sink::Console(_) => SinkFamily::Console,
            Sink::File(_) => SinkFamily::File,
            Sink::NoOp(_) => SinkFamily::NoOp,
        }
    }

    pub fn write(&self, record: &Record<'_>) {
        match self {
            Sink::Console(sink) => sink.write(record),
            Sink::File(sink) => sink.write(record),
            Sink::NoOp(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{ConsoleFormat, ConsoleOutput, Level};

    #[test]
    fn test_family() {
        let console = Sink::Console(ConsoleSink::new(ConsoleFormat::Json, ConsoleOutput::captured()));
        assert_eq!(console.family(), SinkFamily::Console);
        assert_eq!(Sink::NoOp(NoOpSink).family(), SinkFamily::NoOp);
        assert_eq!(SinkFamily::File.as_str(), "file");
    }

    #[test]
    fn test_noop_write_is_inert() {
        Sink::NoOp(NoOpSink::new()).write(&Record::new("svc", Level::Panic, "ignored"));
    }
}
