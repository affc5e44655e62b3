extern crate self as threadbolt;

pub mod app;
pub mod config;
pub mod container;
pub mod database;
pub mod logging;
pub mod module;
pub mod project;
mod util;

pub use threadbolt_derive::Injectable;

/// The framework version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use crate::app::App;
    pub use crate::config::Settings;
    pub use crate::container::inject::{Injectable, InjectionPoint, Slot};
    pub use crate::container::lookup::{Lookup, LookupError, TypedLookup};
    pub use crate::container::{Service, ServiceRegistry};
    pub use crate::module::{Configuration, Module};
    pub use crate::project::ProjectLayout;
    pub use crate::Injectable;
}
