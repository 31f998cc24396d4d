use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// Loan terms used to estimate mortgage interest from an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amortization {
    pub principal: Decimal,
    pub monthly_rate: Decimal,
    pub payment: Decimal,
    /// Calendar year of the first monthly payment.
    pub start_year: i32,
}

/// Where the yearly mortgage interest figure comes from.
///
/// The options are tried in field order; see
/// [`mortgage_interest`](crate::calculations::interest::mortgage_interest).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestSource {
    /// Explicit amounts keyed by year string (`"2024"`).
    pub by_year: BTreeMap<String, Decimal>,
    /// Ledger account whose yearly balance is the interest paid.
    pub account: Option<String>,
    pub amortization: Option<Amortization>,
}

/// Home office deduction inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeOffice {
    /// Ledger accounts whose yearly totals are home expenses.
    pub accounts: Vec<String>,
    /// Business-use fraction applied to home expenses and mortgage interest.
    pub deduction_rate: Decimal,
    pub fixed_deduction: Decimal,
}

/// How much of the maximum solo 401(k) contribution to make.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionPolicy {
    #[default]
    Maximize,
    Nothing,
    /// Percentage (0 to 100) of the maximum.
    Percentage(Decimal),
}

/// Personal settings that shape the computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalConfig {
    pub filing_status: FilingStatus,
    pub interest: InterestSource,
    pub home_office: HomeOffice,
    pub contribution_policy: ContributionPolicy,
    pub additional_federal_deduction: Decimal,
}
