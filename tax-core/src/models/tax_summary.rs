use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// Result of a full federal and state computation for one year.
///
/// Line numbers refer to Form 1040.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub year: i32,
    /// Filing status whose federal parameters were used.
    pub federal_status: FilingStatus,
    /// Filing status whose state parameters were used.
    pub state_status: FilingStatus,

    // Income (Lines 1 through 8)
    pub wages: Decimal,
    pub interest: Decimal,
    pub interest_state: Decimal,
    pub dividends_short_term: Decimal,
    pub capital_gains_short_term: Decimal,
    pub short_term_total: Decimal,
    pub dividends_long_term: Decimal,
    pub capital_gains_long_term: Decimal,
    pub long_term_total: Decimal,
    pub loss: Decimal,
    pub business_income: Decimal,
    pub mortgage_interest: Decimal,
    pub home_office_deduction: Decimal,
    pub business_expenses: Decimal,
    pub net_business_income: Decimal,

    // Adjustments and deductions (Lines 9 through 15)
    pub total_income: Decimal,
    pub adjustments: Decimal,
    pub deductions: Decimal,
    pub line_15_taxable_income: Decimal,
    pub adjusted_gross_income: Decimal,
    pub investment_income: Decimal,
    pub federal_taxable_income: Decimal,

    // Federal taxes
    pub tax_liability: Decimal,
    pub self_employment_tax: Decimal,
    pub investment_tax: Decimal,
    /// Social Security reconciliation. Positive means overpaid; the total
    /// subtracts it.
    pub social_security_extra: Decimal,
    pub medicare_extra: Decimal,
    pub foreign_tax_credit: Decimal,
    pub total_tax: Decimal,
    pub federal_tax_paid: Decimal,
    pub federal_owed: Decimal,

    // State taxes
    pub state_taxable_income: Decimal,
    pub state_tax: Decimal,
    pub state_surcharge: Decimal,
    pub state_tax_paid: Decimal,
    pub state_owed: Decimal,

    pub solo_401k_contribution: Decimal,
}
