//! # Vitals Core Library
//!
//! Request-scoped context propagation and the context-aware logging
//! pipeline built on top of it.
//!
//! ## Modules
//!
//! - `context` - Per-task key/value store with scoped activation
//! - `logging` - Levels, formatter, and the context-merging logger

pub mod context;
pub mod logging;

pub use context::ContextMap;
pub use logging::{ErrorDetail, LogLevel, LogOptions, LogSink, Logger, LoggerConfig};

// Re-exported for the `meta!` macro.
#[doc(hidden)]
pub use serde_json;

/// Builds a [`ContextMap`] from `serde_json::json!` object syntax.
///
/// ```
/// use vitals_core::meta;
///
/// let m = meta! { "route": "/api/health", "attempt": 2 };
/// assert_eq!(m.len(), 2);
/// ```
#[macro_export]
macro_rules! meta {
    () => {
        $crate::context::ContextMap::new()
    };
    ($($json:tt)+) => {
        match $crate::serde_json::json!({ $($json)+ }) {
            $crate::serde_json::Value::Object(map) => map,
            _ => $crate::context::ContextMap::new(),
        }
    };
}
