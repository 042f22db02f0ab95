mod error;
pub mod plan;

pub use error::*;
