pub mod generation;
pub mod report;

pub use generation::*;
pub use report::*;
