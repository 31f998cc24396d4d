//! Tax calculations for a yearly federal and state estimate.
//!
//! Each per-topic module is a set of pure functions over [`Decimal`]
//! amounts. [`TaxSummaryWorksheet`] threads their results together into a
//! [`TaxSummary`](crate::TaxSummary).
//!
//! [`Decimal`]: rust_decimal::Decimal

pub mod brackets;
pub mod common;
pub mod interest;
pub mod investment;
pub mod medicare;
pub mod retirement;
pub mod self_emp;
pub mod social_security;
pub mod summary;

pub use brackets::{bracket_tax, surcharge_total};
pub use interest::mortgage_interest;
pub use investment::investment_tax;
pub use medicare::medicare_true_up;
pub use retirement::{max_solo_401k_contribution, solo_401k_contribution};
pub use self_emp::self_employment_tax;
pub use social_security::social_security_true_up;
pub use summary::TaxSummaryWorksheet;
