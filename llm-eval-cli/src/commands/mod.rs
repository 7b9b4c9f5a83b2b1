//! Command implementations

pub mod evaluate;
pub mod generate;
pub mod interactive;
