//! Data models

pub mod release;
pub mod resource;
pub mod status;
