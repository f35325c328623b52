// Request extractors (session, admin credential, JSON body)
pub mod admin;
pub mod auth;
pub mod json;

pub use admin::*;
pub use auth::*;
pub use json::*;
