/// CLI configuration
use crate::error::{CliError, Result};
use cadence_queue::types::{DEFAULT_HISTORY_SIZE, DEFAULT_STORAGE_KEY};
use cadence_queue::QueueConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_queue")]
    pub queue: QueueSettings,

    #[serde(default = "default_log")]
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,

    #[serde(default = "default_key")]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QueueSettings {
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogSettings {
    /// Fallback filter when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `cadence.toml`; an explicit path must
    /// exist, the default one is optional. `CADENCE_`-prefixed environment
    /// variables win over the file (nested keys joined with `__`, e.g.
    /// `CADENCE_STORAGE__STATE_PATH`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(CliError::Config(
                "storage key must not be empty (set CADENCE_STORAGE__KEY)".to_string(),
            ));
        }

        if self.queue.history_size == 0 {
            return Err(CliError::Config(
                "history size must be at least 1".to_string(),
            ));
        }

        if self.storage.state_path.as_os_str().is_empty() {
            return Err(CliError::Config("state path must not be empty".to_string()));
        }

        Ok(())
    }

    /// Queue manager settings derived from this config
    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            storage_key: self.storage.key.clone(),
            history_size: self.queue.history_size,
        }
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        state_path: default_state_path(),
        key: default_key(),
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./data/queue-state.json")
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_queue() -> QueueSettings {
    QueueSettings {
        history_size: default_history_size(),
    }
}

fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

fn default_log() -> LogSettings {
    LogSettings {
        level: default_level(),
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            queue: default_queue(),
            log: default_log(),
        }
    }
}
