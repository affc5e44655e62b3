use std::path::Path;
use std::sync::Arc;

use snafu::prelude::*;
use tracing::info;

use crate::config::{ConfigError, Settings};
use crate::container::inject::Injectable;
use crate::container::lookup::{LookupError, TypedLookup};
use crate::container::ServiceRegistry;
use crate::database::{Database, DatabaseModule, CONFIG_SERVICE, DATABASE_SERVICE};
use crate::module::{self, BootstrapError, Configuration, Module};
use crate::project::{ProjectError, ProjectLayout};

/// A bootstrapped application: its settings and the services built from them.
#[derive(Debug, Clone)]
pub struct App {
    settings: Arc<Settings>,
    registry: Arc<ServiceRegistry>,
}

impl App {
    /// Loads the project in the current directory and registers the
    /// framework services.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(".")
    }

    /// Validates the project layout under `root`, then loads its settings
    /// and registers the framework services.
    pub fn load_from(root: impl AsRef<Path>) -> Result<Self, AppError> {
        let root = root.as_ref();
        ProjectLayout::default()
            .validate(root)
            .context(ProjectStructureSnafu)?;
        let settings = Settings::load_from(root).context(ConfigSnafu)?;
        Self::builder(settings).build()
    }

    pub fn builder(settings: Settings) -> AppBuilder {
        AppBuilder {
            settings,
            modules: Configuration::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    pub fn database(&self) -> Result<Arc<Database>, LookupError> {
        self.registry.get_as(DATABASE_SERVICE)
    }

    pub fn inject<T>(&self, target: &mut T) -> Result<(), LookupError>
    where
        T: Injectable + ?Sized,
    {
        self.registry.inject(target)
    }
}

pub struct AppBuilder {
    settings: Settings,
    modules: Configuration,
}

impl AppBuilder {
    /// Adds a module that runs after the framework services are registered.
    pub fn module<M: Module>(mut self, module: M) -> Self {
        self.modules = self.modules.with(module);
        self
    }

    pub fn build(self) -> Result<App, AppError> {
        let settings = Arc::new(self.settings);
        let registry = Arc::new(ServiceRegistry::new());
        registry.register(CONFIG_SERVICE, Arc::clone(&settings));

        let modules = Configuration::new()
            .with(DatabaseModule)
            .compose(self.modules);
        module::bootstrap(&registry, &modules).context(BootstrapSnafu)?;

        info!(
            environment = %settings.environment,
            services = registry.len(),
            version = crate::VERSION,
            "Application bootstrapped"
        );
        Ok(App { settings, registry })
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum AppError {
    #[snafu(display("invalid project structure"))]
    #[non_exhaustive]
    ProjectStructure { source: ProjectError },
    #[snafu(display("failed to load config"))]
    #[non_exhaustive]
    Config { source: ConfigError },
    #[snafu(display("failed to bootstrap the application"))]
    #[non_exhaustive]
    Bootstrap { source: BootstrapError },
}
