#![allow(dead_code)]

use threadbolt::Injectable;

#[derive(Injectable)]
struct Handler {
    #[inject("")]
    db: Option<std::sync::Arc<u32>>,
}

fn main() {}
