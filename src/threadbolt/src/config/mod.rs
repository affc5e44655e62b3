mod loader;

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use snafu::prelude::*;
use tracing::{debug, warn};

pub use loader::ENV_PREFIX;

/// Application settings, loaded from `config/config.yaml` (or `config.yaml`)
/// and overridden by `THREADBOLT_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub environment: String,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Loads the settings of the project in the current directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(".")
    }

    pub fn load_from(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let root = root.as_ref();
        let env_file = root.join(".env");
        // Variables already present in the process take precedence over `.env`.
        match dotenvy::from_path(&env_file) {
            Ok(()) => debug!(path = %env_file.display(), "Loaded .env file"),
            Err(err) if err.not_found() => {}
            Err(err) => warn!(path = %env_file.display(), error = %err, "Could not load .env file"),
        }
        loader::load(root, std::env::vars_os())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).context(ParseSnafu { path: "<inline>" })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: String::from("development"),
            server: ServerSettings::default(),
            database: DatabaseSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub driver: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub username: String,
    pub password: String,
    pub sslmode: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            driver: String::from("sqlite"),
            host: String::from("localhost"),
            port: 5432,
            name: String::from("threadbolt_dev"),
            username: String::new(),
            password: String::new(),
            sslmode: String::from("disable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ConfigError {
    #[snafu(display("could not read the config file {}", path.display()))]
    #[non_exhaustive]
    ReadFile { path: PathBuf, source: io::Error },
    #[snafu(display("could not parse the config file {}", path.display()))]
    #[non_exhaustive]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[snafu(display("invalid value '{value}' for config key {key}"))]
    #[non_exhaustive]
    InvalidValue { key: String, value: String },
}
