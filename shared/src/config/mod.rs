//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//!
//! Sources are layered in this order, later ones overriding earlier ones:
//! 1. `config/default.toml` (optional)
//! 2. `config/{environment}.toml` (optional)
//! 3. `APP__`-prefixed environment variables, `__` separating nested keys
//!    (`APP__JWT__SECRET`, `APP__JWT__RESPONSE__HEADER`, ...)

pub mod auth;
pub mod environment;
pub mod server;

use config::{Config, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{JwtConfig, JwtResponseConfig, JwtTokenConfig};
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "APP";

/// Errors raised while assembling the application configuration
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment the process runs in
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// JWT configuration (`jwt.secret`, `jwt.response.header`, `jwt.token.prefix`)
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables.
    ///
    /// A `.env` file, if present, is loaded into the process environment first.
    pub fn load() -> Result<Self, ConfigLoadError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        Self::load_from("config", environment)
    }

    /// Load configuration from the given directory for an explicit environment
    pub fn load_from(dir: &str, environment: Environment) -> Result<Self, ConfigLoadError> {
        let settings = Config::builder()
            .set_default("environment", environment.to_string())?
            .set_default("logging.level", LoggingConfig::for_environment(environment).level)?
            .add_source(File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", dir, environment)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
