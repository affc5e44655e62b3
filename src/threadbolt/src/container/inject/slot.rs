use std::any;
use std::sync::Arc;

use crate::container::{Managed, Service};

/// A settable cell that a service can be stored into.
pub trait Slot {
    fn slot_type(&self) -> &'static str;

    /// The type of service this slot can hold.
    fn expected_type(&self) -> &'static str;

    /// Stores `service`, or hands it back if this slot cannot hold it.
    fn fill(&mut self, service: Service) -> Result<(), Service>;
}

impl<T: Managed> Slot for Option<Arc<T>> {
    fn slot_type(&self) -> &'static str {
        any::type_name::<Self>()
    }

    fn expected_type(&self) -> &'static str {
        any::type_name::<T>()
    }

    fn fill(&mut self, service: Service) -> Result<(), Service> {
        match service.downcast::<T>() {
            Some(object) => {
                *self = Some(object);
                Ok(())
            }
            None => Err(service),
        }
    }
}

impl Slot for Option<Service> {
    fn slot_type(&self) -> &'static str {
        any::type_name::<Self>()
    }

    fn expected_type(&self) -> &'static str {
        "any service"
    }

    fn fill(&mut self, service: Service) -> Result<(), Service> {
        *self = Some(service);
        Ok(())
    }
}
