// Ledger repositories (wallets, tokens, transactions, injections)
pub mod wallet_repository;
pub mod token_repository;
pub mod transaction_repository;
pub mod injection_repository;

pub use wallet_repository::*;
pub use token_repository::*;
pub use transaction_repository::*;
pub use injection_repository::*;
