use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::Managed;
use crate::util::any::AsAny;

/// A type-erased, shared handle to a registered service.
///
/// Cloning a `Service` clones the handle, never the service itself. The
/// concrete type is remembered so that retrieval can be checked instead of
/// blindly cast.
#[derive(Clone)]
pub struct Service {
    object: Arc<dyn Managed>,
}

impl Service {
    pub fn new<T: Managed>(object: T) -> Self {
        Self::from_shared(Arc::new(object))
    }

    pub fn from_shared<T: Managed>(object: Arc<T>) -> Self {
        Self { object }
    }

    pub fn type_name(&self) -> &'static str {
        (*self.object).type_name()
    }

    pub fn is<T: Managed>(&self) -> bool {
        (*self.object).as_any().is::<T>()
    }

    pub fn downcast<T: Managed>(&self) -> Option<Arc<T>> {
        AsAny::into_any_arc(Arc::clone(&self.object))
            .downcast::<T>()
            .ok()
    }

    pub fn downcast_ref<T: Managed>(&self) -> Option<&T> {
        (*self.object).as_any().downcast_ref::<T>()
    }

    /// Returns `true` if both handles point to the same allocation.
    pub fn ptr_eq(&self, other: &Service) -> bool {
        self.addr() == other.addr()
    }

    /// Returns `true` if this handle points to the allocation behind `object`.
    pub fn is_same<T: Managed>(&self, object: &Arc<T>) -> bool {
        self.addr() == Arc::as_ptr(object) as *const ()
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.object) as *const ()
    }
}

impl<T: Managed> From<Arc<T>> for Service {
    fn from(object: Arc<T>) -> Self {
        Self::from_shared(object)
    }
}

impl Debug for Service {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Service")
            .field("type", &self.type_name())
            .finish_non_exhaustive()
    }
}
