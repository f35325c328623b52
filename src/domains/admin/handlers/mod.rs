// Admin domain handlers
pub mod admin_handler;
