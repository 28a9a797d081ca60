//! Environment-variable configuration with validation.
//!
//! Invalid values fail startup with an error naming the variable rather
//! than falling back silently. `.env` files are loaded by the binary via
//! `dotenvy` before this module reads the environment.

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use vitals_core::logging::LogLevel;

/// Deployment environment, carried on every log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected one of development, test, production, got {0:?}")]
pub struct ParseEnvironmentError(pub String);

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            other => Err(ParseEnvironmentError(other.to_string())),
        }
    }
}

/// Configuration read error, naming the offending variable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub port: u16,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            port: 4000,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Reads `APP_ENV`, `PORT`, and `LOG_LEVEL`, applying defaults for
    /// unset or empty variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();
        Ok(Self {
            environment: parse_var("APP_ENV", defaults.environment)?,
            port: parse_var("PORT", defaults.port)?,
            log_level: parse_var("LOG_LEVEL", defaults.log_level)?,
        })
    }
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = match env::var(name) {
        Ok(raw) if !raw.is_empty() => raw,
        _ => return Ok(default),
    };
    match raw.parse::<T>() {
        Ok(value) => Ok(value),
        Err(err) => Err(ConfigError::Invalid {
            name,
            value: raw,
            reason: err.to_string(),
        }),
    }
}
