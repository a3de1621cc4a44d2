//! Search query module

pub mod matcher;
