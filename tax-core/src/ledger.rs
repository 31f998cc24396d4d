//! The ledger collaborator.
//!
//! Every financial total the computation needs is read through
//! [`LedgerSource`]. Implementations never fail: a query that cannot be
//! answered reports zero and logs why.

use rust_decimal::Decimal;

/// Named totals read from the ledger for a tax year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Wages,
    MedicareWages,
    StateWages,
    TotalIncome,
    DividendsLongTerm,
    DividendsShortTerm,
    DividendsShortTermState,
    DividendsQualified,
    CapitalGainsLongTerm,
    CapitalGainsShortTerm,
    Loss,
    Interest,
    InterestState,
    ForeignCredit,
    BusinessExpenses,
    FederalTaxPaid,
    SocialSecurityTaxPaid,
    MedicareTaxPaid,
    StateTaxPaid,
}

impl Aggregate {
    pub const ALL: [Aggregate; 19] = [
        Self::Wages,
        Self::MedicareWages,
        Self::StateWages,
        Self::TotalIncome,
        Self::DividendsLongTerm,
        Self::DividendsShortTerm,
        Self::DividendsShortTermState,
        Self::DividendsQualified,
        Self::CapitalGainsLongTerm,
        Self::CapitalGainsShortTerm,
        Self::Loss,
        Self::Interest,
        Self::InterestState,
        Self::ForeignCredit,
        Self::BusinessExpenses,
        Self::FederalTaxPaid,
        Self::SocialSecurityTaxPaid,
        Self::MedicareTaxPaid,
        Self::StateTaxPaid,
    ];

    /// Name of the query that produces this total in the query book.
    pub fn query_name(&self) -> &'static str {
        match self {
            Self::Wages => "w2",
            Self::MedicareWages => "w2_medicare",
            Self::StateWages => "w2_ca",
            Self::TotalIncome => "total_inc",
            Self::DividendsLongTerm => "dividend_longterm",
            Self::DividendsShortTerm => "dividend_shortterm",
            Self::DividendsShortTermState => "dividend_shortterm_state",
            Self::DividendsQualified => "dividend_qualified",
            Self::CapitalGainsLongTerm => "capital_gain_longterm",
            Self::CapitalGainsShortTerm => "capital_gain_shortterm",
            Self::Loss => "loss",
            Self::Interest => "interest",
            Self::InterestState => "interest_state",
            Self::ForeignCredit => "foreign_credit",
            Self::BusinessExpenses => "business_expenses",
            Self::FederalTaxPaid => "fed_tax_paid",
            Self::SocialSecurityTaxPaid => "soc_tax_paid",
            Self::MedicareTaxPaid => "med_tax_paid",
            Self::StateTaxPaid => "state_tax_paid",
        }
    }

    /// Payments are booked to per-year subaccounts rather than dated within
    /// the tax year, so these totals are not restricted to a period.
    pub fn is_paid_to_date(&self) -> bool {
        matches!(
            self,
            Self::FederalTaxPaid
                | Self::SocialSecurityTaxPaid
                | Self::MedicareTaxPaid
                | Self::StateTaxPaid
        )
    }
}

/// Source of ledger totals.
pub trait LedgerSource {
    /// Total for a named aggregate in `year`.
    fn aggregate(
        &self,
        aggregate: Aggregate,
        year: i32,
    ) -> Decimal;

    /// Balance of a single account over `year`.
    fn account_total(
        &self,
        account: &str,
        year: i32,
    ) -> Decimal;
}
