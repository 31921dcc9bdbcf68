//! Environment-driven server configuration.

use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}: {1}")]
    InvalidPort(String, std::num::ParseIntError),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the relay listens on, all interfaces.
    pub port: u16,
}

impl Config {
    /// Load config from environment variables. `PORT` defaults to 8080; a
    /// value that doesn't parse is a startup error rather than a silent
    /// fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidPort(raw, e))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { port })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_port() {
        std::env::remove_var("PORT");
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_port_from_env() {
        std::env::set_var("PORT", "8765");
        let config = Config::from_env().unwrap();
        std::env::remove_var("PORT");
        assert_eq!(config.port, 8765);
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_an_error() {
        std::env::set_var("PORT", "not-a-port");
        let result = Config::from_env();
        std::env::remove_var("PORT");
        assert!(matches!(result, Err(ConfigError::InvalidPort(_, _))));
    }
}
