use std::marker::PhantomData;
use std::sync::Arc;

use threadbolt::prelude::*;

pub struct Database;

#[derive(Default, Injectable)]
pub struct Controller<'a, T: Send + Sync + 'static> {
    #[inject("db")]
    pub db: Option<Arc<Database>>,
    #[inject]
    pub r#type: Option<Arc<T>>,
    pub name: &'a str,
    _marker: PhantomData<T>,
}

#[derive(Injectable)]
pub struct Empty {}

fn main() {
    let registry = ServiceRegistry::new();
    registry.register("db", Arc::new(Database));
    registry.register("type", Arc::new(42u32));

    let mut controller: Controller<'_, u32> = Controller::default();
    registry.inject(&mut controller).unwrap();
    assert_eq!(controller.r#type.as_deref(), Some(&42));

    let mut empty = Empty {};
    registry.inject(&mut empty).unwrap();
}
