//! # Vitals Server
//!
//! HTTP surface for the context-propagation core:
//!
//! - `config` - environment-variable configuration with validation
//! - `server` - axum router, request-context middleware, health endpoint

pub mod config;
pub mod server;

pub use config::{Config, ConfigError, Environment};
pub use server::{AppState, ServerConfig};
