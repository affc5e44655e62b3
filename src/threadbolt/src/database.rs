//! Database driver selection.
//!
//! Connecting is left to the ORM layer. This module only decides which driver
//! the application uses and how its connection string looks, and publishes
//! the result as the `db` service.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::Arc;

use snafu::prelude::*;
use tracing::info;

use crate::config::{DatabaseSettings, Settings};
use crate::container::lookup::TypedLookup;
use crate::container::ServiceRegistry;
use crate::module::Module;

/// Name under which the database handle is registered.
pub const DATABASE_SERVICE: &str = "db";

/// Name under which the loaded [`Settings`] are registered.
pub const CONFIG_SERVICE: &str = "config";

const DEFAULT_SQLITE_FILE: &str = "threadbolt.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseDriver {
    Postgres,
    Mysql,
    Sqlite,
}

impl DatabaseDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    pub fn dsn(&self, settings: &DatabaseSettings) -> String {
        let DatabaseSettings {
            host,
            port,
            name,
            username,
            password,
            sslmode,
            ..
        } = settings;

        match self {
            Self::Postgres => format!(
                "host={host} user={username} password={password} dbname={name} port={port} sslmode={sslmode}"
            ),
            Self::Mysql => format!(
                "{username}:{password}@tcp({host}:{port})/{name}?charset=utf8mb4&parseTime=True&loc=Local"
            ),
            Self::Sqlite if name.is_empty() => String::from(DEFAULT_SQLITE_FILE),
            Self::Sqlite => name.clone(),
        }
    }
}

impl FromStr for DatabaseDriver {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" => Ok(Self::Postgres),
            "mysql" => Ok(Self::Mysql),
            "sqlite" => Ok(Self::Sqlite),
            _ => UnsupportedDriverSnafu { driver: s }.fail(),
        }
    }
}

impl Display for DatabaseDriver {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Silent,
    Info,
}

/// Connection descriptor handed to the ORM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    driver: DatabaseDriver,
    dsn: String,
    log_mode: LogMode,
}

impl Database {
    pub fn open(settings: &Settings) -> Result<Self, DatabaseError> {
        let driver: DatabaseDriver = settings.database.driver.parse()?;
        let log_mode = if settings.is_production() {
            LogMode::Silent
        } else {
            LogMode::Info
        };

        Ok(Self {
            driver,
            dsn: driver.dsn(&settings.database),
            log_mode,
        })
    }

    pub fn driver(&self) -> DatabaseDriver {
        self.driver
    }

    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn log_mode(&self) -> LogMode {
        self.log_mode
    }
}

/// Registers a [`Database`] built from the `config` service.
pub struct DatabaseModule;

impl Module for DatabaseModule {
    fn configure(&self, registry: &ServiceRegistry) -> Result<(), Box<dyn Error + Send + Sync>> {
        let settings = registry.get_as::<Settings>(CONFIG_SERVICE)?;
        let database = Database::open(&settings)?;
        info!(driver = %database.driver(), "Database selected");
        registry.register(DATABASE_SERVICE, Arc::new(database));
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DatabaseError {
    #[snafu(display("unsupported database driver: {driver}"))]
    #[non_exhaustive]
    UnsupportedDriver { driver: String },
}

#[cfg(test)]
mod tests {
    use crate::container::lookup::LookupError;

    use super::*;

    fn database_settings() -> DatabaseSettings {
        DatabaseSettings {
            driver: String::from("postgres"),
            host: String::from("db.internal"),
            port: 5433,
            name: String::from("blog"),
            username: String::from("app"),
            password: String::from("secret"),
            sslmode: String::from("require"),
        }
    }

    #[test]
    fn driver_from_str_succeeds_for_supported_drivers() {
        assert_eq!("postgres".parse::<DatabaseDriver>().unwrap(), DatabaseDriver::Postgres);
        assert_eq!("mysql".parse::<DatabaseDriver>().unwrap(), DatabaseDriver::Mysql);
        assert_eq!("sqlite".parse::<DatabaseDriver>().unwrap(), DatabaseDriver::Sqlite);
    }

    #[test]
    fn driver_from_str_fails_for_unknown_driver() {
        let err = "oracle".parse::<DatabaseDriver>().unwrap_err();
        assert!(matches!(err, DatabaseError::UnsupportedDriver { ref driver } if driver == "oracle"));
        assert_eq!(err.to_string(), "unsupported database driver: oracle");
    }

    #[test]
    fn driver_dsn_follows_driver_format() {
        let settings = database_settings();

        assert_eq!(
            DatabaseDriver::Postgres.dsn(&settings),
            "host=db.internal user=app password=secret dbname=blog port=5433 sslmode=require"
        );
        assert_eq!(
            DatabaseDriver::Mysql.dsn(&settings),
            "app:secret@tcp(db.internal:5433)/blog?charset=utf8mb4&parseTime=True&loc=Local"
        );
        assert_eq!(DatabaseDriver::Sqlite.dsn(&settings), "blog");
    }

    #[test]
    fn sqlite_dsn_falls_back_to_default_file() {
        let settings = DatabaseSettings {
            name: String::new(),
            ..database_settings()
        };
        assert_eq!(DatabaseDriver::Sqlite.dsn(&settings), "threadbolt.db");
    }

    #[test]
    fn database_open_silences_logs_in_production() {
        let mut settings = Settings::default();
        assert_eq!(Database::open(&settings).unwrap().log_mode(), LogMode::Info);

        settings.environment = String::from("production");
        let database = Database::open(&settings).unwrap();
        assert_eq!(database.log_mode(), LogMode::Silent);
        assert_eq!(database.driver(), DatabaseDriver::Sqlite);
        assert_eq!(database.dsn(), "threadbolt_dev");
    }

    #[test]
    fn database_module_registers_db_service() {
        let registry = ServiceRegistry::new();
        registry.register(CONFIG_SERVICE, Arc::new(Settings::default()));

        DatabaseModule.configure(&registry).unwrap();

        let database = registry.get_as::<Database>(DATABASE_SERVICE).unwrap();
        assert_eq!(database.driver(), DatabaseDriver::Sqlite);
    }

    #[test]
    fn database_module_fails_without_config_service() {
        let registry = ServiceRegistry::new();

        let err = DatabaseModule.configure(&registry).unwrap_err();
        let err = err.downcast::<LookupError>().unwrap();
        assert!(err.is_not_found());
        assert!(!registry.contains(DATABASE_SERVICE));
    }

    #[test]
    fn database_module_fails_for_unsupported_driver() {
        let registry = ServiceRegistry::new();
        let mut settings = Settings::default();
        settings.database.driver = String::from("oracle");
        registry.register(CONFIG_SERVICE, Arc::new(settings));

        let err = DatabaseModule.configure(&registry).unwrap_err();
        assert!(err.downcast_ref::<DatabaseError>().is_some());
    }
}
