// Wallet domain services
pub mod wallet_store;
pub mod wallet_service;
pub mod state;

pub use wallet_store::*;
pub use wallet_service::*;
pub use state::*;
