//! Context-aware structured logging
//!
//! A fixed seven-level pipeline that merges the active context scope into
//! every record, with colored level tags and verbosity-gated metadata.
//!
//! - `level` - the ordered level set
//! - `formatter` - pure level-to-style mapping
//! - `logger` - the merging/rendering core and the global instance

pub mod formatter;
mod level;
mod logger;

pub use level::{LogLevel, ParseLevelError};
pub use logger::{ConsoleSink, ErrorDetail, LogOptions, LogSink, Logger, LoggerConfig};

use std::sync::OnceLock;

use crate::context::ContextMap;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide logger built from `config`. Later calls keep
/// the first installed instance.
pub fn init(config: LoggerConfig) -> &'static Logger {
    GLOBAL.get_or_init(|| Logger::new(config))
}

/// Installs a pre-built logger (custom sink). Later calls keep the first
/// installed instance.
pub fn install(logger: Logger) -> &'static Logger {
    GLOBAL.get_or_init(move || logger)
}

/// The process-wide logger. Falls back to a default `info` logger when
/// nothing was installed.
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(|| Logger::new(LoggerConfig::default()))
}

/// Logs through the global logger with full control over metadata and
/// options.
pub fn log(level: LogLevel, message: &str, meta: ContextMap, options: LogOptions) {
    global().log(level, message, meta, options);
}

pub fn error(message: &str) {
    global().error(message, ContextMap::new());
}

pub fn warn(message: &str) {
    global().warn(message, ContextMap::new());
}

pub fn info(message: &str) {
    global().info(message, ContextMap::new());
}

pub fn http(message: &str) {
    global().http(message, ContextMap::new());
}

pub fn verbose(message: &str) {
    global().verbose(message, ContextMap::new());
}

pub fn debug(message: &str) {
    global().debug(message, ContextMap::new());
}

pub fn silly(message: &str) {
    global().silly(message, ContextMap::new());
}

/// Alias for [`silly`].
pub fn trace(message: &str) {
    global().trace(message, ContextMap::new());
}
