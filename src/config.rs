use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Loaded lazily so commands that pass --server never touch the
/// configuration file.
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| Config::load().unwrap_or_default());

#[derive(Debug)]
pub enum ConfigError {
    FileNotFound,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound => write!(
                f,
                "No configuration file found. Please use mlmetrics configure"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct Config {
    pub default_server: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        confy::load::<Config>("mlmetrics", "config").map_err(|_| ConfigError::FileNotFound)
    }

    pub fn file_path() -> Result<String, ConfigError> {
        confy::get_configuration_file_path("mlmetrics", "config")
            .map(|s| s.display().to_string())
            .map_err(|_| ConfigError::FileNotFound)
    }

    pub fn default_server(&self) -> Option<&String> {
        self.default_server.as_ref()
    }
}
