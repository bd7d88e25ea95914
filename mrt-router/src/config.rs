//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the timetable data directory.
pub const DATA_DIR_VAR: &str = "MRT_DATA_DIR";

/// Environment variable naming the listen address.
pub const BIND_ADDR_VAR: &str = "MRT_BIND_ADDR";

/// Environment variable giving the schedule cache TTL in seconds.
pub const CACHE_TTL_VAR: &str = "MRT_CACHE_TTL_SECS";

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not valid: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Root of the timetable data; schedules live under
    /// `arrival_times/generated/<LINE>/`.
    pub data_dir: PathBuf,

    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// How long a loaded schedule stays cached.
    pub cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment. Unset variables
    /// take the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's
    /// value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup(DATA_DIR_VAR).map_or(defaults.data_dir, PathBuf::from);

        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(value) => value.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                reason: e.to_string(),
                value,
            })?,
            None => defaults.bind_addr,
        };

        let cache_ttl = match lookup(CACHE_TTL_VAR) {
            Some(value) => value
                .parse()
                .map(Duration::from_secs)
                .map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                    var: CACHE_TTL_VAR,
                    reason: e.to_string(),
                    value,
                })?,
            None => defaults.cache_ttl,
        };

        Ok(Self {
            data_dir,
            bind_addr,
            cache_ttl,
        })
    }
}
