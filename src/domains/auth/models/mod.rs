// Auth domain models
pub mod auth;
pub mod jwt;

pub use auth::*;
pub use jwt::*;
