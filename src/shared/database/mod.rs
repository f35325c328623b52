// Database module
pub mod connection;
pub mod unit_of_work;
pub mod repositories;

pub use connection::*;
pub use unit_of_work::*;
pub use repositories::*;
