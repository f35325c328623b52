// Admin domain models
pub mod injection;

pub use injection::*;
