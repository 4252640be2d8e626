use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use log::warn;

use crate::types::AppState;

const DEFAULT_ENTRIES_DIR: &str = "entries";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    pub entries_dir: Arc<PathBuf>,
    pub static_dir: Arc<PathBuf>,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            entries_dir: Arc::new(PathBuf::from(DEFAULT_ENTRIES_DIR)),
            static_dir: Arc::new(PathBuf::from(DEFAULT_STATIC_DIR)),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Create configuration with custom values
    pub fn with_custom(
        entries_dir: PathBuf,
        static_dir: PathBuf,
        port: Option<u16>,
        host: Option<String>,
    ) -> Self {
        Self {
            entries_dir: Arc::new(entries_dir),
            static_dir: Arc::new(static_dir),
            port: port.unwrap_or(DEFAULT_PORT),
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
        }
    }

    /// Read configuration from `ENCYCLOPEDIA_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("ENCYCLOPEDIA_PORT").and_then(|raw| match raw.parse::<u16>() {
            Ok(port) => Some(port),
            Err(_) => {
                warn!("Ignoring invalid ENCYCLOPEDIA_PORT '{}', using {}", raw, DEFAULT_PORT);
                None
            }
        });

        Self::with_custom(
            lookup("ENCYCLOPEDIA_ENTRIES_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRIES_DIR)),
            lookup("ENCYCLOPEDIA_STATIC_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            port,
            lookup("ENCYCLOPEDIA_HOST"),
        )
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = self.host.parse::<IpAddr>().unwrap_or_else(|_| {
            warn!("Ignoring invalid host '{}', binding to {}", self.host, DEFAULT_HOST);
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        });
        SocketAddr::new(ip, self.port)
    }

    /// Build handler state from this configuration
    pub fn app_state(&self) -> AppState {
        AppState {
            entries_dir: Arc::clone(&self.entries_dir),
            static_dir: Arc::clone(&self.static_dir),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.entries_dir.as_path(), std::path::Path::new("entries"));
        assert_eq!(config.socket_addr(), "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("ENCYCLOPEDIA_ENTRIES_DIR", "/tmp/wiki"),
            ("ENCYCLOPEDIA_PORT", "9000"),
            ("ENCYCLOPEDIA_HOST", "127.0.0.1"),
        ]));
        assert_eq!(config.entries_dir.as_path(), std::path::Path::new("/tmp/wiki"));
        assert_eq!(config.socket_addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("ENCYCLOPEDIA_PORT", "not-a-port"),
            ("ENCYCLOPEDIA_HOST", "nowhere"),
        ]));
        assert_eq!(config.port, 8000);
        assert_eq!(config.socket_addr(), "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    }
}
