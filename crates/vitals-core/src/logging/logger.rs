//! The merging/rendering core of the logging pipeline.
//!
//! Every record is merged with the active context scope before rendering:
//! default metadata, then call-site metadata, then scope fields, with scope
//! fields winning on key collision so correlation fields cannot be shadowed
//! by a call site. The logger never fails a log call: a missing scope
//! degrades to an empty record and sink errors are ignored.

use std::backtrace::BacktraceStatus;
use std::io::{self, Write};

use chrono::Utc;
use colored::Colorize;
use serde_json::Value;

use crate::context::{self, ContextMap};

use super::formatter;
use super::level::LogLevel;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Destination for rendered lines.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Default sink: stdout, one line per record. Write errors are dropped.
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&self, line: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

/// The error payload of a record.
#[derive(Debug)]
pub enum ErrorDetail {
    /// A structured error; renders its chain and, when captured, its
    /// backtrace.
    Report(anyhow::Error),
    /// An arbitrary value; renders as a string.
    Value(Value),
}

impl ErrorDetail {
    fn render(&self) -> String {
        match self {
            ErrorDetail::Report(err) => {
                let mut rendered = format!("{err:#}");
                let backtrace = err.backtrace();
                if backtrace.status() == BacktraceStatus::Captured {
                    rendered.push('\n');
                    rendered.push_str(&backtrace.to_string());
                }
                rendered
            }
            ErrorDetail::Value(Value::String(s)) => s.clone(),
            ErrorDetail::Value(other) => other.to_string(),
        }
    }
}

impl From<anyhow::Error> for ErrorDetail {
    fn from(err: anyhow::Error) -> Self {
        ErrorDetail::Report(err)
    }
}

impl From<Value> for ErrorDetail {
    fn from(value: Value) -> Self {
        ErrorDetail::Value(value)
    }
}

/// Per-call options overlaid on top of the merged record.
#[derive(Debug, Default)]
pub struct LogOptions {
    /// Forces the metadata blob onto this line regardless of the logger
    /// threshold.
    pub verbose: bool,
    /// Error payload appended to the rendered line.
    pub error: Option<ErrorDetail>,
}

/// Configuration for a [`Logger`].
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Threshold: records below this level are dropped.
    pub level: LogLevel,
    /// Carried on every record as the `environment` default field.
    pub environment: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            environment: "development".to_string(),
        }
    }
}

/// Context-merging logger.
pub struct Logger {
    level: LogLevel,
    default_meta: ContextMap,
    sink: Box<dyn LogSink>,
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_sink(config, Box::new(ConsoleSink))
    }

    pub fn with_sink(config: LoggerConfig, sink: Box<dyn LogSink>) -> Self {
        let mut default_meta = ContextMap::new();
        default_meta.insert("environment".to_string(), Value::String(config.environment));
        Self {
            level: config.level,
            default_meta,
            sink,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Core operation behind every per-level method.
    ///
    /// Merge order: default metadata, then call-site `meta`, then the
    /// active scope record. An `"error"` key in the merged record is
    /// treated as the error payload when `options.error` is absent. The
    /// metadata blob is rendered only when the threshold is `verbose` or
    /// lower-severity, or `options.verbose` is set.
    pub fn log(&self, level: LogLevel, message: &str, meta: ContextMap, options: LogOptions) {
        if level > self.level {
            return;
        }

        let mut merged = self.default_meta.clone();
        merged.extend(meta);
        merged.extend(context::get_all());

        let error = options
            .error
            .or_else(|| merged.remove("error").map(ErrorDetail::Value));

        let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();

        let mut line = formatter::level_tag(level);
        line.push(' ');
        line.push_str(&timestamp.bright_black().to_string());
        line.push_str(" : ");
        line.push_str(message);

        let show_meta = options.verbose || self.level >= LogLevel::Verbose;
        if show_meta && !merged.is_empty() {
            if let Ok(blob) = serde_json::to_string(&merged) {
                line.push(' ');
                line.push_str(&blob);
            }
        }

        if let Some(error) = error {
            line.push_str("\n ");
            line.push_str(&error.render().red().to_string());
        }

        self.sink.write_line(&line);
    }

    pub fn error(&self, message: &str, meta: ContextMap) {
        self.log(LogLevel::Error, message, meta, LogOptions::default());
    }

    pub fn warn(&self, message: &str, meta: ContextMap) {
        self.log(LogLevel::Warn, message, meta, LogOptions::default());
    }

    pub fn info(&self, message: &str, meta: ContextMap) {
        self.log(LogLevel::Info, message, meta, LogOptions::default());
    }

    pub fn http(&self, message: &str, meta: ContextMap) {
        self.log(LogLevel::Http, message, meta, LogOptions::default());
    }

    pub fn verbose(&self, message: &str, meta: ContextMap) {
        self.log(LogLevel::Verbose, message, meta, LogOptions::default());
    }

    pub fn debug(&self, message: &str, meta: ContextMap) {
        self.log(LogLevel::Debug, message, meta, LogOptions::default());
    }

    pub fn silly(&self, message: &str, meta: ContextMap) {
        self.log(LogLevel::Silly, message, meta, LogOptions::default());
    }

    /// Alias for [`Logger::silly`].
    pub fn trace(&self, message: &str, meta: ContextMap) {
        self.silly(message, meta);
    }
}
