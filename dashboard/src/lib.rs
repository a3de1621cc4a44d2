//! Ship-it Dashboard Library
//!
//! Headless core of the release dashboard: release records, search, the
//! grid/detail state machine and the view model a renderer draws from.

pub mod app;
pub mod cache;
pub mod config;
pub mod controller;
pub mod errors;
pub mod gateway;
pub mod http;
pub mod logs;
pub mod models;
pub mod query;
pub mod utils;
pub mod view;
