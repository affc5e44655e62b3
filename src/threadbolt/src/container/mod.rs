pub mod inject;
pub mod lookup;

mod registry;
mod service;

use crate::util::any::AsAny;

pub use registry::ServiceRegistry;
pub use service::Service;

pub trait Managed: AsAny + 'static {}

impl<T> Managed for T where T: AsAny + 'static {}
