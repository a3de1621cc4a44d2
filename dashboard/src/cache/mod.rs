//! Session caches

pub mod resources;
