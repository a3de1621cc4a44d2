//! Wire models for the Ship-it releases API

pub mod models;
