use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::container::lookup::{Lookup, LookupError};
use crate::container::{Managed, Service};

/// A thread-safe map from service names to shared service instances.
///
/// Registration takes the write lock, every lookup takes the read lock for
/// the duration of a single map access.
#[derive(Default)]
pub struct ServiceRegistry {
    entries: RwLock<HashMap<String, Service>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Binds `service` to `name`, replacing any previous binding.
    pub fn register<T>(&self, name: impl Into<String>, service: Arc<T>)
    where
        T: Managed,
    {
        self.register_service(name, Service::from_shared(service));
    }

    pub fn register_service(&self, name: impl Into<String>, service: Service) {
        self.entries.write().insert(name.into(), service);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Lookup for ServiceRegistry {
    fn get(&self, name: &str) -> Result<Service, LookupError> {
        match self.entries.read().get(name) {
            Some(service) => Ok(service.clone()),
            None => Err(LookupError::NotFound {
                name: name.to_string(),
            }),
        }
    }
}

impl Debug for ServiceRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ServiceRegistry")
            .field("entries", &*self.entries.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;

    use crate::container::inject::{Injectable, InjectionPoint};
    use crate::container::lookup::TypedLookup;

    use super::*;

    struct Database {
        name: &'static str,
    }

    struct Cache;

    #[derive(Default)]
    struct Repository {
        db: Option<Arc<Database>>,
        cache: Option<Arc<Cache>>,
    }

    impl Injectable for Repository {
        fn injection_points(&mut self) -> Vec<InjectionPoint<'_>> {
            vec![
                InjectionPoint::new("db", "db", &mut self.db),
                InjectionPoint::new("cache", "cache", &mut self.cache),
            ]
        }
    }

    #[test]
    fn registry_get_returns_the_registered_instance() {
        let registry = ServiceRegistry::new();
        let db = Arc::new(Database { name: "primary" });
        registry.register("db", Arc::clone(&db));

        let service = registry.get("db").unwrap();
        assert!(service.is_same(&db));
        assert_eq!(registry.get_as::<Database>("db").unwrap().name, "primary");
    }

    #[test]
    fn registry_register_replaces_previous_binding() {
        let registry = ServiceRegistry::new();
        let first = Arc::new(Database { name: "first" });
        let second = Arc::new(Database { name: "second" });

        registry.register("db", Arc::clone(&first));
        registry.register("db", Arc::clone(&second));

        let object: Arc<Database> = registry.get_as("db").unwrap();
        assert!(Arc::ptr_eq(&object, &second));
        assert_eq!(registry.len(), 1);
        assert_eq!(Arc::strong_count(&first), 1);
    }

    #[test]
    fn registry_register_accepts_any_name_and_type() {
        let registry = ServiceRegistry::new();
        registry.register("", Arc::new(0u8));
        registry.register_service("db", Service::new(Database { name: "db" }));
        registry.register("db", Arc::new(String::from("replaced with another type")));

        assert!(registry.contains(""));
        assert_eq!(registry.names(), vec![String::new(), String::from("db")]);
        assert!(registry.get_as::<String>("db").is_ok());
        assert!(matches!(
            registry.get_as::<Database>("db"),
            Err(LookupError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn registry_get_fails_when_name_is_missing() {
        let registry = ServiceRegistry::new();

        assert!(registry.is_empty());
        assert!(matches!(
            registry.get("missing"),
            Err(LookupError::NotFound { ref name }) if name == "missing"
        ));
    }

    #[test]
    fn registry_inject_fills_tagged_fields() {
        let registry = ServiceRegistry::new();
        registry.register("db", Arc::new(Database { name: "db" }));
        registry.register("cache", Arc::new(Cache));

        let mut repository = Repository::default();
        registry.inject(&mut repository).unwrap();

        assert_eq!(repository.db.unwrap().name, "db");
        assert!(repository.cache.is_some());
    }

    #[test]
    fn registry_supports_concurrent_readers() {
        const READERS: usize = 16;

        let registry = Arc::new(ServiceRegistry::new());
        registry.register("db", Arc::new(Database { name: "db" }));
        let barrier = Arc::new(Barrier::new(READERS));

        let handles: Vec<_> = (0..READERS)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..1000 {
                        let db: Arc<Database> = registry.get_as("db").unwrap();
                        assert_eq!(db.name, "db");
                    }
                })
            })
            .collect();

        handles
            .into_iter()
            .for_each(|h| h.join().expect("Each reader should not `panic!()`"));
    }

    #[test]
    fn registry_reads_observe_concurrent_registration() {
        let registry = Arc::new(ServiceRegistry::new());

        let writer = thread::spawn({
            let registry = Arc::clone(&registry);
            move || {
                for i in 0..100u32 {
                    registry.register(format!("service-{i}"), Arc::new(i));
                }
            }
        });
        let reader = thread::spawn({
            let registry = Arc::clone(&registry);
            move || {
                for i in 0..100u32 {
                    if let Ok(value) = registry.get_as::<u32>(&format!("service-{i}")) {
                        assert_eq!(*value, i);
                    }
                }
            }
        });

        writer.join().expect("The writer should not `panic!()`");
        reader.join().expect("The reader should not `panic!()`");

        for i in 0..100u32 {
            assert_eq!(*registry.get_as::<u32>(&format!("service-{i}")).unwrap(), i);
        }
        assert_eq!(registry.len(), 100);
    }
}
