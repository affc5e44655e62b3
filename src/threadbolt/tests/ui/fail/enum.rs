#![allow(dead_code)]

use threadbolt::Injectable;

#[derive(Injectable)]
enum Mode {
    Fast,
}

fn main() {}
