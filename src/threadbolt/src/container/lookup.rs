use std::any;
use std::sync::Arc;

use snafu::prelude::*;

use crate::container::inject::Injectable;
use crate::container::{Managed, Service};

#[cfg_attr(test, mockall::automock)]
pub trait Lookup: Send + Sync {
    fn get(&self, name: &str) -> Result<Service, LookupError>;
}

pub trait TypedLookup: Lookup {
    fn get_as<T>(&self, name: &str) -> Result<Arc<T>, LookupError>
    where
        T: Managed,
    {
        let service = self.get(name)?;
        match service.downcast::<T>() {
            Some(object) => Ok(object),
            None => Err(LookupError::TypeMismatch {
                name: name.to_string(),
                expected: any::type_name::<T>(),
                found: service.type_name(),
            }),
        }
    }

    /// Stores the service bound to `name` into a polymorphic slot.
    ///
    /// Only `Option<Service>` and `Service` are accepted as destinations. The
    /// target is checked before the lookup, so a wrong target never touches
    /// the registry.
    fn get_typed(&self, name: &str, target: &mut dyn Managed) -> Result<(), LookupError> {
        let target_type = (*target).type_name();
        let target = (*target).as_any_mut();

        if let Some(slot) = target.downcast_mut::<Option<Service>>() {
            *slot = Some(self.get(name)?);
            Ok(())
        } else if let Some(slot) = target.downcast_mut::<Service>() {
            *slot = self.get(name)?;
            Ok(())
        } else {
            Err(LookupError::InvalidTarget {
                target: target_type,
                expected: "Option<Service> or Service",
                found: "a service",
            })
        }
    }

    /// Fills every injection point of `target` from the registry.
    ///
    /// Points are visited in declaration order. The first failure is returned
    /// and fields filled before it stay filled.
    ///
    /// Only [`Injectable`] types can be targets, so a plain value is rejected
    /// at compile time:
    ///
    /// ```compile_fail,E0277
    /// use threadbolt::prelude::*;
    ///
    /// let registry = ServiceRegistry::new();
    /// registry.inject(&mut 5u32).unwrap();
    /// ```
    fn inject<T>(&self, target: &mut T) -> Result<(), LookupError>
    where
        T: Injectable + ?Sized,
    {
        for point in target.injection_points() {
            if point.key().is_empty() {
                continue;
            }
            let service = self.get(point.key()).context(InjectionSnafu {
                field: point.field(),
                key: point.key(),
            })?;
            point.fill(service)?;
        }
        Ok(())
    }
}

impl<T: Lookup + ?Sized> TypedLookup for T {}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum LookupError {
    #[snafu(display("service '{name}' not found"))]
    #[non_exhaustive]
    NotFound { name: String },
    #[snafu(display("service '{name}' is a {found}, not a {expected}"))]
    #[non_exhaustive]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[snafu(display("target {target} cannot receive {found}, expected {expected}"))]
    #[non_exhaustive]
    InvalidTarget {
        target: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[snafu(display("failed to inject '{key}' into field `{field}`"))]
    #[non_exhaustive]
    Injection {
        field: &'static str,
        key: String,
        #[snafu(source(from(LookupError, Box::new)))]
        source: Box<LookupError>,
    },
}

impl LookupError {
    /// The innermost error, looking through injection context.
    pub fn root(&self) -> &LookupError {
        match self {
            Self::Injection { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound { .. })
    }

    pub fn is_invalid_target(&self) -> bool {
        matches!(self.root(), Self::InvalidTarget { .. })
    }
}
