#![allow(dead_code)]

use threadbolt::Injectable;

#[derive(Injectable)]
struct Pair(u32);

fn main() {}
