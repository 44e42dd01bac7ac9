//! Server configuration: compile-time defaults with environment overrides

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Listen address when `LIDAR_ADDR` is unset
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
/// Client bundle directory when `LIDAR_PKG_DIR` is unset
pub const DEFAULT_PKG_DIR: &str = "pkg";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid listen address {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// wasm-bindgen output served under `/pkg`
    pub pkg_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            pkg_dir: PathBuf::from(DEFAULT_PKG_DIR),
        }
    }
}

impl ServerConfig {
    /// Read `LIDAR_ADDR` and `LIDAR_PKG_DIR`, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("LIDAR_ADDR").ok(),
            std::env::var("LIDAR_PKG_DIR").ok(),
        )
    }

    fn from_vars(addr: Option<String>, pkg_dir: Option<String>) -> Result<Self, ConfigError> {
        let addr_value = addr.unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                value: addr_value.clone(),
                source,
            })?;
        let pkg_dir = PathBuf::from(pkg_dir.unwrap_or_else(|| DEFAULT_PKG_DIR.to_string()));
        Ok(Self { addr, pkg_dir })
    }
}
