//! File and process I/O around the tax computation.
//!
//! Loads the YAML parameter tables and personal settings, and answers
//! ledger queries by running `hledger` with a content-addressed cache.

pub mod cache;
pub mod error;
pub mod hledger;
pub mod loader;
pub mod personal;
pub mod queries;

pub use cache::{QueryCache, cache_key, fingerprint};
pub use error::ConfigError;
pub use hledger::{HledgerSource, parse_balance_output};
pub use loader::ParameterLoader;
pub use personal::{PersonalSettings, load_personal};
pub use queries::{AccountEntry, QueryArgs, QueryBook, QueryDef};
