pub mod client;
pub mod inference;
pub mod prompts;

pub use client::*;
pub use inference::*;
pub use prompts::*;
