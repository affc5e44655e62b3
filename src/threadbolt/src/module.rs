use std::any;
use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use snafu::prelude::*;
use tracing::{debug, warn};

use crate::container::ServiceRegistry;

/// A unit of application bootstrap that registers services.
pub trait Module: 'static {
    fn setup(&self, registry: &ServiceRegistry, errors: &mut Vec<BootstrapError>) {
        let module = any::type_name::<Self>();
        debug!(module, "Configuring module");
        if let Err(source) = self.configure(registry) {
            warn!(module, error = %source, "Module failed to configure");
            errors.push(BootstrapError::Module { module, source });
        }
    }

    fn configure(&self, registry: &ServiceRegistry) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// An ordered group of modules.
#[derive(Default)]
pub struct Configuration {
    modules: Vec<Box<dyn Module>>,
}

impl Configuration {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn compose(mut self, mut other: Configuration) -> Self {
        self.modules.append(&mut other.modules);
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Module for Configuration {
    fn setup(&self, registry: &ServiceRegistry, errors: &mut Vec<BootstrapError>) {
        self.modules
            .iter()
            .for_each(|module| module.setup(registry, errors));
    }

    fn configure(&self, registry: &ServiceRegistry) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut errors = Vec::new();
        self.setup(registry, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Box::new(BootstrapError::Aggregated { errors }))
        }
    }
}

/// Runs `module` against `registry`, collecting every failure.
pub fn bootstrap<M>(registry: &ServiceRegistry, module: &M) -> Result<(), BootstrapError>
where
    M: Module + ?Sized,
{
    let mut errors = Vec::new();
    module.setup(registry, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(BootstrapError::Aggregated { errors })
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum BootstrapError {
    #[snafu(display("module {module} fails to setup the services"))]
    #[non_exhaustive]
    Module {
        module: &'static str,
        source: Box<dyn Error + Send + Sync>,
    },
    #[snafu(display("aggregated bootstrap errors:\n{}", AggregatedDisplayer::new(errors)))]
    Aggregated { errors: Vec<BootstrapError> },
}

struct AggregatedDisplayer<'a> {
    errors: &'a [BootstrapError],
}

impl<'a> AggregatedDisplayer<'a> {
    fn new(errors: &'a [BootstrapError]) -> Self {
        Self { errors }
    }
}

impl Display for AggregatedDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "{:4}: {}", i + 1, error)?;
        }
        Ok(())
    }
}
