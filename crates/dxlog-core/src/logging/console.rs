//! Console sink
//!
//! Records are handed to a `tracing-subscriber` formatter owned by the sink.
//! Two formats:
//! - machine (default): one JSON object per line on stdout
//! - dev (`LOGGING_ENV=dev`): human-readable lines on stderr, prefixed with
//!   the logger identifier

use std::fmt;
use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Dispatch;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use super::level::Level;
use super::record::Record;

/// RFC 3339, second precision
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Target of the events handed to the console backend
const TARGET: &str = "dxlog";

/// Where console records go
#[derive(Clone)]
pub enum ConsoleOutput {
    Stdout,
    Stderr,
    /// In-memory buffer, for inspecting output in tests
    Captured(Arc<Mutex<Vec<u8>>>),
}

impl ConsoleOutput {
    /// A fresh in-memory buffer
    pub fn captured() -> Self {
        ConsoleOutput::Captured(Arc::new(Mutex::new(Vec::new())))
    }

    /// Buffer contents as text, empty for the standard streams
    pub fn contents(&self) -> String {
        match self {
            ConsoleOutput::Captured(buffer) => String::from_utf8_lossy(&buffer.lock()).into_owned(),
            _ => String::new(),
        }
    }

    fn make_writer(&self) -> BoxMakeWriter {
        match self {
            ConsoleOutput::Stdout => BoxMakeWriter::new(io::stdout),
            ConsoleOutput::Stderr => BoxMakeWriter::new(io::stderr),
            ConsoleOutput::Captured(buffer) => {
                let buffer = buffer.clone();
                BoxMakeWriter::new(move || CapturedWriter(buffer.clone()))
            }
        }
    }
}

impl fmt::Debug for ConsoleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleOutput::Stdout => f.write_str("Stdout"),
            ConsoleOutput::Stderr => f.write_str("Stderr"),
            ConsoleOutput::Captured(_) => f.write_str("Captured"),
        }
    }
}

struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Line format of a console sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFormat {
    Json,
    Pretty,
}

/// Build the formatter for one sink. Filtering is done by the logger, so the
/// backend accepts every level.
fn backend(format: ConsoleFormat, output: &ConsoleOutput) -> Dispatch {
    let builder = tracing_subscriber::fmt()
        .with_writer(output.make_writer())
        .with_max_level(tracing::Level::TRACE)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_ansi(matches!(output, ConsoleOutput::Stderr))
        .with_target(false)
        .with_level(false);

    match format {
        ConsoleFormat::Json => Dispatch::new(
            builder
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        ),
        ConsoleFormat::Pretty => Dispatch::new(builder.finish()),
    }
}

/// `tracing` levels are fixed per callsite, so each severity gets its own
/// event. Fatal and panic share `ERROR`; the record keeps its own level name.
macro_rules! emit {
    ($level:expr, $($rest:tt)+) => {
        match $level {
            Level::Trace => tracing::event!(target: TARGET, tracing::Level::TRACE, $($rest)+),
            Level::Debug => tracing::event!(target: TARGET, tracing::Level::DEBUG, $($rest)+),
            Level::Info => tracing::event!(target: TARGET, tracing::Level::INFO, $($rest)+),
            Level::Warning => tracing::event!(target: TARGET, tracing::Level::WARN, $($rest)+),
            _ => tracing::event!(target: TARGET, tracing::Level::ERROR, $($rest)+),
        }
    };
}

/// Sink writing structured records to a console stream
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    format: ConsoleFormat,
    output: ConsoleOutput,
    backend: Dispatch,
}

impl ConsoleSink {
    pub fn new(format: ConsoleFormat, output: ConsoleOutput) -> Self {
        let backend = backend(format, &output);
        Self {
            format,
            output,
            backend,
        }
    }

    /// Pick format and stream from the mode flag.
    ///
    /// `output` overrides the stream but not the format.
    pub fn for_mode(dev_mode: bool, output: Option<ConsoleOutput>) -> Self {
        if dev_mode {
            Self::new(ConsoleFormat::Pretty, output.unwrap_or(ConsoleOutput::Stderr))
        } else {
            Self::new(ConsoleFormat::Json, output.unwrap_or(ConsoleOutput::Stdout))
        }
    }

    pub fn format(&self) -> ConsoleFormat {
        self.format
    }

    pub fn output(&self) -> &ConsoleOutput {
        &self.output
    }

    /// Hand a record to the backend.
    ///
    /// Machine records carry `level`, `logger`, `caller` and `message` fields.
    /// Dev records put the level abbreviation and identifier in the message
    /// prefix and carry only `caller`. The backend stamps the time. It reports
    /// its own write errors on stderr and drops the record.
    pub fn write(&self, record: &Record<'_>) {
        let caller = record.caller_display();
        let caller = caller.as_ref().map(tracing::field::display);

        tracing::dispatcher::with_default(&self.backend, || match self.format {
            ConsoleFormat::Json => emit!(
                record.level,
                level = record.level.as_str(),
                logger = record.logger,
                caller,
                "{}",
                record.message
            ),
            ConsoleFormat::Pretty => emit!(
                record.level,
                caller,
                "{} [{}] {}",
                record.level.abbreviation(),
                record.logger,
                record.message
            ),
        });
    }
}
