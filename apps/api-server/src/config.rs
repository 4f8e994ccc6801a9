//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so `cargo run` works out of the box.

use std::env;
use std::path::PathBuf;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Default                 |
    /// |-----------------|-------------------------|
    /// | `PORT`          | `5000`                  |
    /// | `DATABASE_PATH` | `./data/licoreria.db`   |
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/licoreria.db".to_string())
                .into(),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Runs without PORT/DATABASE_PATH set in the test environment
        if env::var("PORT").is_err() && env::var("DATABASE_PATH").is_err() {
            let config = ServerConfig::load().unwrap();
            assert_eq!(config.port, 5000);
            assert_eq!(config.database_path, PathBuf::from("./data/licoreria.db"));
        }
    }
}
