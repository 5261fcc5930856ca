//! Server configuration.
//!
//! Read from environment variables at startup; every setting has a default
//! that matches the bundled front end's development setup.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable for the listen address.
pub const ADDR_VAR: &str = "ROUTE_SERVER_ADDR";

/// Environment variable for the network data file.
pub const NETWORK_PATH_VAR: &str = "ROUTE_NETWORK_PATH";

/// Environment variable for the comma-separated CORS origins.
pub const ALLOWED_ORIGINS_VAR: &str = "ROUTE_ALLOWED_ORIGINS";

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 5000);

const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

/// Errors reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The listen address does not parse
    #[error("invalid ROUTE_SERVER_ADDR {value:?}: expected host:port")]
    InvalidAddr { value: String },
}

/// Configuration for the route server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Network data file. `None` serves the built-in demo network.
    pub network_path: Option<PathBuf>,

    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value. Unset or blank variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get(ADDR_VAR) {
            config.bind_addr = addr
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddr { value: addr })?;
        }

        if let Some(path) = get(NETWORK_PATH_VAR) {
            config.network_path = Some(PathBuf::from(path.trim()));
        }

        if let Some(origins) = get(ALLOWED_ORIGINS_VAR) {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    /// Set the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Serve the network in `path` instead of the demo network.
    pub fn with_network_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.network_path = Some(path.into());
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_ADDR),
            network_path: None,
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}
