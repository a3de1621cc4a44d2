//! HTTP gateway to the releases API

pub mod client;
pub mod releases;
