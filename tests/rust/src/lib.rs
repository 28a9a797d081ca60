//! Shared helpers for Vitals integration tests

use std::sync::{Arc, Mutex, OnceLock};

use vitals_core::logging::{self, LogLevel, LogSink, Logger, LoggerConfig};

/// Sink that keeps rendered lines in memory for assertions.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// All captured lines joined, for substring assertions.
    pub fn joined(&self) -> String {
        self.lines().join("\n")
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

/// A standalone logger writing into a fresh [`MemorySink`], with ANSI
/// styling disabled so lines are plain text.
pub fn capture_logger(level: LogLevel) -> (Logger, MemorySink) {
    colored::control::set_override(false);
    let sink = MemorySink::new();
    let logger = Logger::with_sink(
        LoggerConfig {
            level,
            environment: "test".to_string(),
        },
        Box::new(sink.clone()),
    );
    (logger, sink)
}

/// Installs a capturing global logger once per test binary and returns
/// its sink. The threshold is `silly` so nothing is filtered and the
/// metadata blob is always rendered.
pub fn global_capture() -> MemorySink {
    static SINK: OnceLock<MemorySink> = OnceLock::new();
    SINK.get_or_init(|| {
        let (logger, sink) = capture_logger(LogLevel::Silly);
        logging::install(logger);
        sink
    })
    .clone()
}
