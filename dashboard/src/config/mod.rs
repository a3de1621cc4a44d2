//! Configuration module

pub mod settings;
