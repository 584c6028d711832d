pub mod inspect;
pub mod json;
pub mod types;

pub use inspect::*;
pub use types::*;
