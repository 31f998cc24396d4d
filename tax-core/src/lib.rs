pub mod calculations;
pub mod ledger;
pub mod models;

pub use ledger::{Aggregate, LedgerSource};
pub use models::*;
