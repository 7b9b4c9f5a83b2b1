pub mod bleu;
pub mod edit_distance;
pub mod rouge;

pub use bleu::*;
pub use edit_distance::*;
pub use rouge::*;
