// All repositories module
pub mod ledger;

pub use ledger::*;
