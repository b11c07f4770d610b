//! Server configuration
//!
//! Values come from environment variables, falling back to defaults:
//!
//! | Variable           | Default         |
//! |--------------------|-----------------|
//! | `SMS_RELAY_HOST`   | `0.0.0.0`       |
//! | `SMS_RELAY_PORT`   | `8081`          |
//! | `SMS_LOG_FILE`     | `sms_log.jsonl` |
//! | `SMS_KEEPALIVE_MS` | `500`           |

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

pub const HOST_VAR: &str = "SMS_RELAY_HOST";
pub const PORT_VAR: &str = "SMS_RELAY_PORT";
pub const LOG_FILE_VAR: &str = "SMS_LOG_FILE";
pub const KEEPALIVE_VAR: &str = "SMS_KEEPALIVE_MS";

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_LOG_FILE: &str = "sms_log.jsonl";
const DEFAULT_KEEPALIVE: Duration = Duration::from_millis(500);

/// Configuration for the relay server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// Append-only JSONL log of every ingested SMS
    pub log_path: PathBuf,
    /// Upper bound on how long a stream pump waits before sending a keep-alive
    pub keepalive_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            keepalive_interval: DEFAULT_KEEPALIVE,
        }
    }
}

impl ServerConfig {
    /// Create config with a custom log path and defaults for everything else
    pub fn with_log_path<P: AsRef<Path>>(log_path: P) -> Self {
        Self {
            log_path: log_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Set the keep-alive interval
    pub fn keepalive_interval(mut self, interval: Duration) -> Self {
        self.keepalive_interval = interval;
        self
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(&current_dir, |key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Relative log paths are resolved against `base_dir`.
    pub fn from_lookup<F>(base_dir: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_var(&lookup, HOST_VAR).unwrap_or_else(|| defaults.bind_addr.ip());
        let port = parse_var(&lookup, PORT_VAR).unwrap_or_else(|| defaults.bind_addr.port());

        let log_path = lookup(LOG_FILE_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);
        let log_path = if log_path.is_absolute() {
            log_path
        } else {
            base_dir.join(log_path)
        };

        let keepalive_interval = parse_var::<u64, _>(&lookup, KEEPALIVE_VAR)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.keepalive_interval);

        Self {
            bind_addr: SocketAddr::new(host, port),
            log_path,
            keepalive_interval,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}
