// Token domain models
pub mod token;
pub mod transaction;
pub mod catalog;

pub use token::*;
pub use transaction::*;
pub use catalog::*;
