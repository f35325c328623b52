// Transfer domain handlers
pub mod transfer_handler;
