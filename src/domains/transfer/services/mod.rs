// Transfer domain services
pub mod transfer_service;
pub mod state;

pub use transfer_service::*;
pub use state::*;
