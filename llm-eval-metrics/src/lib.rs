pub mod calculators;
pub mod evaluator;
pub mod lines;

pub use calculators::*;
pub use evaluator::*;
pub use lines::*;
