// Transfer domain models
pub mod transfer;

pub use transfer::*;
