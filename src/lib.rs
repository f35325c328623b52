// Wallet API: custodial demo wallet ledger
pub mod domains;
pub mod shared;
pub mod routes;
