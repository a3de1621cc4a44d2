//! Application session

pub mod session;
