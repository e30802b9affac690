use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

use crate::Error;
use crate::Result;
use crate::DEFAULT_MAX_LINE_LENGTH;
use crate::DEFAULT_PORT;

/// Smallest line limit that still fits a minimal `EX` request
const MIN_LINE_LENGTH: usize = 16;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the TCP listener binds to
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,

    /// Optional plain-text file whose first token is a port number.
    /// When readable and valid it replaces the port of `listen_address`.
    #[serde(default)]
    pub port_file: Option<PathBuf>,

    /// Longest accepted request line in bytes, terminator excluded
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Async worker threads serving sessions
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Upper bound on threads parked in blocking read/take/exchange calls
    #[serde(default = "default_max_blocking_threads")]
    pub max_blocking_threads: usize,

    /// How long shutdown waits for in-flight blocking calls
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_in_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            port_file: None,
            max_line_length: default_max_line_length(),
            worker_threads: default_worker_threads(),
            max_blocking_threads: default_max_blocking_threads(),
            shutdown_timeout_in_ms: default_shutdown_timeout(),
        }
    }
}

impl ServerConfig {
    /// Validates listener and runtime sizing
    /// # Errors
    /// Returns `Error::InvalidConfig` if any rule is violated
    pub fn validate(&self) -> Result<()> {
        if self.max_line_length < MIN_LINE_LENGTH {
            return Err(Error::InvalidConfig(format!(
                "max_line_length {} too small, minimum {} bytes",
                self.max_line_length, MIN_LINE_LENGTH
            )));
        }

        if self.worker_threads == 0 {
            return Err(Error::InvalidConfig("worker_threads must be at least 1".into()));
        }

        if self.max_blocking_threads == 0 {
            return Err(Error::InvalidConfig(
                "max_blocking_threads must be at least 1".into(),
            ));
        }

        if let Some(path) = &self.port_file {
            if path.as_os_str().is_empty() {
                return Err(Error::InvalidConfig("port_file path cannot be empty".into()));
            }
        }

        Ok(())
    }

    /// Listen address with `port_file` applied.
    ///
    /// A missing or unreadable port file is ignored. A file whose first token
    /// is not a port in 1..=65535 is ignored with a warning.
    pub fn resolved_listen_address(&self) -> SocketAddr {
        let mut address = self.listen_address;
        if let Some(path) = &self.port_file {
            let Ok(content) = fs::read_to_string(path) else {
                return address;
            };
            match parse_port(&content) {
                Some(port) => address.set_port(port),
                None => warn!(
                    "invalid port in {}; using {}",
                    path.display(),
                    address.port()
                ),
            }
        }
        address
    }
}

fn parse_port(content: &str) -> Option<u16> {
    content
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<u16>().ok())
        .filter(|port| *port != 0)
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
}
fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}
fn default_worker_threads() -> usize {
    4
}
fn default_max_blocking_threads() -> usize {
    512
}
fn default_shutdown_timeout() -> u64 {
    1000
}
