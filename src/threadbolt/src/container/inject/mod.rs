mod slot;

use crate::container::lookup::LookupError;
use crate::container::Service;

pub use slot::Slot;

/// A struct whose fields can be filled from a service registry.
///
/// Implementations list their injectable fields in declaration order. The
/// usual way to implement it is `#[derive(Injectable)]`:
///
/// ```
/// use std::sync::Arc;
/// use threadbolt::prelude::*;
///
/// struct Database;
///
/// #[derive(Default, Injectable)]
/// struct PostController {
///     #[inject("db")]
///     db: Option<Arc<Database>>,
///     page_size: usize,
/// }
///
/// let registry = ServiceRegistry::new();
/// registry.register("db", Arc::new(Database));
///
/// let mut controller = PostController::default();
/// registry.inject(&mut controller).unwrap();
/// assert!(controller.db.is_some());
/// ```
pub trait Injectable {
    fn injection_points(&mut self) -> Vec<InjectionPoint<'_>>;
}

/// One field of an [`Injectable`] together with the key it is bound to.
pub struct InjectionPoint<'a> {
    field: &'static str,
    key: &'static str,
    slot: &'a mut dyn Slot,
}

impl<'a> InjectionPoint<'a> {
    pub fn new(field: &'static str, key: &'static str, slot: &'a mut dyn Slot) -> Self {
        Self { field, key, slot }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn fill(self, service: Service) -> Result<(), LookupError> {
        let target = self.slot.slot_type();
        let expected = self.slot.expected_type();
        self.slot.fill(service).map_err(|service| {
            let source = LookupError::InvalidTarget {
                target,
                expected,
                found: service.type_name(),
            };
            LookupError::Injection {
                field: self.field,
                key: self.key.to_string(),
                source: Box::new(source),
            }
        })
    }
}
