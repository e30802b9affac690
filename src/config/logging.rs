use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// File name used inside `log_dir`
pub const LOG_FILE_NAME: &str = "linda.log";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Directory for `linda.log`; stdout when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// `EnvFilter` directive used when `RUST_LOG` is not set
    #[serde(default = "default_filter")]
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            default_filter: default_filter(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_filter.trim().is_empty() {
            return Err(Error::InvalidConfig("default_filter cannot be empty".into()));
        }
        if let Some(dir) = &self.log_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::InvalidConfig("log_dir path cannot be empty".into()));
            }
        }
        Ok(())
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME))
    }
}

fn default_filter() -> String {
    "info".to_string()
}
