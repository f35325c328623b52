// Domain modules
pub mod admin;
pub mod auth;
pub mod token;
pub mod transfer;
pub mod wallet;
