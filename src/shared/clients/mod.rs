// External collaborators
pub mod price_feed;
pub mod token_metadata;

pub use price_feed::*;
pub use token_metadata::*;
