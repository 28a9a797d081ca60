//! Vitals server binary
//!
//! Loads `.env`, validates configuration, installs the global logger, and
//! serves the HTTP surface.

use vitals_core::logging::{self, LoggerConfig};
use vitals_server::config::Config;
use vitals_server::server::{self, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            logging::error(&format!("Invalid environment configuration: {err}"));
            std::process::exit(1);
        }
    };

    logging::init(LoggerConfig {
        level: config.log_level,
        environment: config.environment.to_string(),
    });

    let server_config = ServerConfig {
        port: config.port,
        ..Default::default()
    };

    server::serve(server_config, AppState::new()).await
}
