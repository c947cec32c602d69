//! Build console log.
//!
//! The packaging flow and every plugin report progress through a shared
//! [`BuildLog`]. Records fan out to attached sinks in order, and every
//! record is mirrored to `tracing` so operator-facing output and
//! diagnostics stay in sync.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Severity of a console record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Success,
}

impl LogLevel {
    /// Uppercase tag used in rendered lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Success => "SUCCESS",
        }
    }
}

/// One console record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogRecord {
    /// Render the record the way the console shows it.
    pub fn format_line(&self) -> String {
        format!(
            "[{}] [{}] {}",
            self.timestamp.format("%H:%M:%S"),
            self.level.as_str(),
            self.message
        )
    }
}

/// Receives every record appended to a [`BuildLog`].
///
/// Sinks must not fail; anything fallible behind a sink (a file, a socket)
/// handles its own errors.
pub trait LogSink: Send + Sync {
    fn append(&self, record: &LogRecord);
}

/// Shared build console.
///
/// Records are delivered to sinks in attachment order, synchronously on
/// the calling thread, so output stays interleaved exactly as emitted.
#[derive(Default)]
pub struct BuildLog {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl std::fmt::Debug for BuildLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildLog")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl BuildLog {
    /// A console with no sinks attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a sink. Sinks receive records in attachment order.
    pub fn attach(&mut self, sink: Arc<dyn LogSink>) {
        self.sinks.push(sink);
    }

    /// Append a record at the given level.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let record = LogRecord {
            level,
            message: message.into(),
            timestamp: Local::now(),
        };
        match level {
            LogLevel::Debug => tracing::debug!(console = %record.message),
            LogLevel::Info => tracing::info!(console = %record.message),
            LogLevel::Warning => tracing::warn!(console = %record.message),
            LogLevel::Error => tracing::error!(console = %record.message),
            LogLevel::Success => tracing::info!(console = %record.message, outcome = "success"),
        }
        for sink in &self.sinks {
            sink.append(&record);
        }
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }
}

/// In-memory sink backing the console view and assertions in tests.
#[derive(Debug, Default)]
pub struct ConsoleBuffer {
    records: Mutex<Vec<LogRecord>>,
}

impl ConsoleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records appended so far, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rendered lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.records().iter().map(LogRecord::format_line).collect()
    }
}

impl LogSink for ConsoleBuffer {
    fn append(&self, record: &LogRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}

/// Sink that prints rendered lines to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn append(&self, record: &LogRecord) {
        println!("{}", record.format_line());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_line_matches_console_layout() {
        let record = LogRecord {
            level: LogLevel::Warning,
            message: "icon not found".into(),
            timestamp: Local.with_ymd_and_hms(2025, 1, 18, 14, 30, 52).unwrap(),
        };
        assert_eq!(record.format_line(), "[14:30:52] [WARNING] icon not found");
    }

    #[test]
    fn records_fan_out_to_every_sink_in_order() {
        let first = Arc::new(ConsoleBuffer::new());
        let second = Arc::new(ConsoleBuffer::new());

        let mut log = BuildLog::new();
        log.attach(first.clone());
        log.attach(second.clone());

        log.info("starting");
        log.error("boom");
        log.success("done");

        for buffer in [&first, &second] {
            let records = buffer.records();
            assert_eq!(records.len(), 3);
            assert_eq!(records[0].level, LogLevel::Info);
            assert_eq!(records[0].message, "starting");
            assert_eq!(records[1].level, LogLevel::Error);
            assert_eq!(records[2].level, LogLevel::Success);
        }
    }

    #[test]
    fn log_without_sinks_is_a_no_op() {
        let log = BuildLog::new();
        log.info("nobody listening");
    }
}
