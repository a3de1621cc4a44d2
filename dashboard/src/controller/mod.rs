//! Grid/detail interaction controller

pub mod grid;
pub mod load;
pub mod panel;
pub mod selection;
