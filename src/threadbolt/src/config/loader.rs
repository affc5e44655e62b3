use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use snafu::prelude::*;
use tracing::{debug, info};

use crate::config::{
    ConfigError, InvalidValueSnafu, LogFormat, ParseSnafu, ReadFileSnafu, Settings,
};

/// Prefix of the environment variables that override config keys.
pub const ENV_PREFIX: &str = "THREADBOLT_";

const CANDIDATES: [&str; 2] = ["config/config.yaml", "config.yaml"];

pub(crate) fn load<I>(root: &Path, vars: I) -> Result<Settings, ConfigError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut settings = match find_config_file(root) {
        Some(path) => read_config_file(&path)?,
        None => {
            info!("No config file found, using defaults and environment variables");
            Settings::default()
        }
    };
    apply_env(&mut settings, vars)?;
    Ok(settings)
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}

fn read_config_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).context(ReadFileSnafu { path })?;
    debug!(path = %path.display(), "Loading config file");

    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(&content).context(ParseSnafu { path })
}

/// Overrides settings from `THREADBOLT_<SECTION>_<KEY>` variables.
///
/// Variables whose name is not valid UTF-8 cannot carry the prefix and are
/// skipped. A recognized key with a non-UTF-8 value is an error.
pub(crate) fn apply_env<I>(settings: &mut Settings, vars: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    for (name, value) in vars {
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(key) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let key = match key.to_lowercase().split_once('_') {
            Some((section, field)) => format!("{section}.{field}"),
            None => key.to_lowercase(),
        };
        if !KEYS.contains(&key.as_str()) {
            debug!(%name, "Ignoring unknown config variable");
            continue;
        }

        let value = match value.into_string() {
            Ok(value) => value,
            Err(raw) => {
                let value = raw.to_string_lossy().into_owned();
                return InvalidValueSnafu { key, value }.fail();
            }
        };
        set_key(settings, &key, value)?;
        debug!(%key, "Config key overridden by environment");
    }
    Ok(())
}

const KEYS: [&str; 12] = [
    "environment",
    "server.host",
    "server.port",
    "database.driver",
    "database.host",
    "database.port",
    "database.name",
    "database.username",
    "database.password",
    "database.sslmode",
    "logging.level",
    "logging.format",
];

fn set_key(settings: &mut Settings, key: &str, value: String) -> Result<(), ConfigError> {
    match key {
        "environment" => settings.environment = value,
        "server.host" => settings.server.host = value,
        "server.port" => settings.server.port = parse_value(key, value)?,
        "database.driver" => settings.database.driver = value,
        "database.host" => settings.database.host = value,
        "database.port" => settings.database.port = parse_value(key, value)?,
        "database.name" => settings.database.name = value,
        "database.username" => settings.database.username = value,
        "database.password" => settings.database.password = value,
        "database.sslmode" => settings.database.sslmode = value,
        "logging.level" => settings.logging.level = value,
        "logging.format" => settings.logging.format = parse_value(key, value)?,
        _ => {}
    }
    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(_) => InvalidValueSnafu { key, value }.fail(),
    }
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}
