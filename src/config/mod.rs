//! Configuration management for the tuple space server.
//!
//! Provides hierarchical configuration loading and validation with:
//! - Default values as code base
//! - Configuration file support (`CONFIG_PATH`, TOML)
//! - Environment variable overrides (`LINDA__SECTION__FIELD`)
//! - Section-wise validation

mod logging;
mod monitoring;
mod server;
pub use logging::*;
pub use monitoring::*;
pub use server::*;

#[cfg(test)]
mod config_test;

use std::env;
use std::fmt::Debug;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Result;

pub(crate) const ENV_PREFIX: &str = "LINDA";
pub(crate) const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Main configuration container
///
/// Sources are merged in this order (later overrides earlier):
/// 1. Default values from code
/// 2. Configuration file named by `CONFIG_PATH`
/// 3. Environment variables with the `LINDA__` prefix
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct LindaConfig {
    /// Listener, framing and runtime sizing
    #[serde(default)]
    pub server: ServerConfig,
    /// Prometheus endpoint
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    /// Log destination and filter
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Debug for LindaConfig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("LindaConfig")
            .field("server", &self.server)
            .field("monitoring", &self.monitoring)
            .field("logging", &self.logging)
            .finish()
    }
}

impl LindaConfig {
    /// Loads configuration from hierarchical sources without validation.
    ///
    /// # Note
    /// Validation is deferred so that `with_override_config()` can still be
    /// applied. Callers must call `validate()` before using the result.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("CONFIG_PATH", "config/linda.toml");
    /// std::env::set_var("LINDA__SERVER__LISTEN_ADDRESS", "127.0.0.1:6000");
    /// let cfg = LindaConfig::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(env_source());

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Applies one more configuration file on top of the current values.
    /// Environment variables are re-applied last so they keep priority.
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validates every section and returns the validated instance.
    pub fn validate(self) -> Result<Self> {
        self.server.validate()?;
        self.monitoring
            .validate(self.server.resolved_listen_address().port())?;
        self.logging.validate()?;
        Ok(self)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}
