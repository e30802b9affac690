//! Prometheus endpoint settings.
//!
//! The endpoint shares the host with the tuple space listener, so an enabled
//! endpoint must not claim the port clients connect to.

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::Error;
use crate::Result;

const DEFAULT_PROMETHEUS_PORT: u16 = 9100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitoringConfig {
    /// Serve `/metrics`; counters are collected either way
    #[serde(default)]
    pub prometheus_enabled: bool,

    #[serde(default = "default_prometheus_port")]
    pub prometheus_port: u16,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            prometheus_enabled: false,
            prometheus_port: DEFAULT_PROMETHEUS_PORT,
        }
    }
}

impl MonitoringConfig {
    /// `server_port` is the port the tuple space listens on after any
    /// port file has been applied.
    ///
    /// # Errors
    /// `Error::InvalidConfig` when an enabled endpoint uses port 0, a
    /// privileged port, or `server_port`.
    pub fn validate(
        &self,
        server_port: u16,
    ) -> Result<()> {
        if !self.prometheus_enabled {
            debug!("prometheus endpoint disabled");
            return Ok(());
        }

        match self.prometheus_port {
            0 => Err(Error::InvalidConfig(
                "prometheus_port must be fixed when monitoring is enabled".into(),
            )),
            port if port < 1024 => Err(Error::InvalidConfig(format!(
                "prometheus_port {} is privileged",
                port
            ))),
            port if port == server_port => Err(Error::InvalidConfig(format!(
                "prometheus_port {} collides with the tuple space listener",
                port
            ))),
            _ => Ok(()),
        }
    }
}

fn default_prometheus_port() -> u16 {
    DEFAULT_PROMETHEUS_PORT
}
