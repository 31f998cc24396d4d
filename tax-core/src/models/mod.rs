mod aggregates;
mod filing_status;
mod jurisdiction;
mod personal;
mod tax_bracket;
mod tax_summary;

pub use aggregates::FinancialAggregates;
pub use filing_status::FilingStatus;
pub use jurisdiction::{JurisdictionParams, JurisdictionTable, ParameterError, TaxParameters};
pub use personal::{Amortization, ContributionPolicy, HomeOffice, InterestSource, PersonalConfig};
pub use tax_bracket::{Surcharge, TaxBracket};
pub use tax_summary::TaxSummary;
