//! Configuration module for the employee service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Maximum number of pooled database connections
    pub db_max_connections: u32,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// A configuration variable that is set but cannot be parsed.
#[derive(Debug)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {} value: {:?}", self.variable, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("EMPLOYEE_DB_PATH")
            .unwrap_or_else(|_| "./data/employees.sqlite".to_string())
            .into();

        let db_max_connections = parse_var("EMPLOYEE_DB_MAX_CONNECTIONS", "5")?;
        let bind_addr = parse_var("EMPLOYEE_BIND_ADDR", "127.0.0.1:8080")?;

        let log_level = env::var("EMPLOYEE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            db_path,
            db_max_connections,
            bind_addr,
            log_level,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    variable: &'static str,
    default: &str,
) -> Result<T, ConfigError> {
    let value = env::var(variable).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|_| ConfigError { variable, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("EMPLOYEE_DB_PATH");
        env::remove_var("EMPLOYEE_DB_MAX_CONNECTIONS");
        env::remove_var("EMPLOYEE_BIND_ADDR");
        env::remove_var("EMPLOYEE_LOG_LEVEL");

        let config = Config::from_env().unwrap();

        assert_eq!(config.db_path, PathBuf::from("./data/employees.sqlite"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("EMPLOYEE_TEST_PORT_COUNT", "many");
        let err = parse_var::<u32>("EMPLOYEE_TEST_PORT_COUNT", "1").unwrap_err();
        env::remove_var("EMPLOYEE_TEST_PORT_COUNT");

        assert_eq!(err.variable, "EMPLOYEE_TEST_PORT_COUNT");
        assert_eq!(err.value, "many");
    }
}
