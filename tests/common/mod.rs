#![allow(dead_code)]

pub mod fixtures;
pub mod test_home;

pub use test_home::TestHomeGuard;
