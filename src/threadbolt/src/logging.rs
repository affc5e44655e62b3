use std::env;
use std::ffi::OsString;

use snafu::prelude::*;
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::fmt;

use crate::config::{LogFormat, LoggingSettings};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. A malformed
/// `RUST_LOG` is reported rather than replaced by the configured level.
pub fn init(settings: &LoggingSettings) -> Result<(), LoggingError> {
    let filter = select_filter(env::var_os(EnvFilter::DEFAULT_ENV), &settings.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match settings.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
    }
    .context(InstallSnafu)
}

fn select_filter(env_value: Option<OsString>, level: &str) -> Result<EnvFilter, LoggingError> {
    match env_value {
        Some(directives) if !directives.is_empty() => build_filter(&directives.to_string_lossy()),
        _ => build_filter(level),
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).context(InvalidLevelSnafu { level })
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum LoggingError {
    #[snafu(display("invalid log level '{level}'"))]
    #[non_exhaustive]
    InvalidLevel { level: String, source: ParseError },
    #[snafu(display("could not install the log subscriber"))]
    #[non_exhaustive]
    Install { source: TryInitError },
}
