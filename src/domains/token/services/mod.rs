// Token domain services
pub mod ledger;
pub mod transaction_log;
pub mod price_service;
pub mod token_service;
pub mod state;

pub use ledger::*;
pub use transaction_log::*;
pub use price_service::*;
pub use token_service::*;
pub use state::*;
