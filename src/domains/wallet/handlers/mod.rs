// Wallet domain handlers
pub mod wallet_handler;
