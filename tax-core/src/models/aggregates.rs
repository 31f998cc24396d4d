use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ledger::{Aggregate, LedgerSource};

/// Ledger totals for one tax year.
///
/// Each field is retrieved independently; a total the ledger could not
/// produce is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialAggregates {
    pub wages: Decimal,
    pub medicare_wages: Decimal,
    pub state_wages: Decimal,
    /// Wages plus business receipts.
    pub total_income: Decimal,
    pub dividends_long_term: Decimal,
    pub dividends_short_term: Decimal,
    pub dividends_short_term_state: Decimal,
    pub dividends_qualified: Decimal,
    pub capital_gains_long_term: Decimal,
    pub capital_gains_short_term: Decimal,
    pub loss: Decimal,
    pub interest: Decimal,
    pub interest_state: Decimal,
    pub foreign_credit: Decimal,
    pub business_expenses: Decimal,
    pub home_office_expenses: Decimal,
    pub federal_tax_paid: Decimal,
    pub social_security_tax_paid: Decimal,
    pub medicare_tax_paid: Decimal,
    pub state_tax_paid: Decimal,
}

impl FinancialAggregates {
    /// Reads every total for `year` from `source`.
    ///
    /// Home office expenses are the sum of the yearly totals of
    /// `home_office_accounts`, each queried on its own.
    pub fn gather(
        source: &dyn LedgerSource,
        home_office_accounts: &[String],
        year: i32,
    ) -> Self {
        let get = |aggregate: Aggregate| source.aggregate(aggregate, year);

        let home_office_expenses = home_office_accounts
            .iter()
            .map(|account| source.account_total(account, year))
            .sum();

        let aggregates = Self {
            wages: get(Aggregate::Wages),
            medicare_wages: get(Aggregate::MedicareWages),
            state_wages: get(Aggregate::StateWages),
            total_income: get(Aggregate::TotalIncome),
            dividends_long_term: get(Aggregate::DividendsLongTerm),
            dividends_short_term: get(Aggregate::DividendsShortTerm),
            dividends_short_term_state: get(Aggregate::DividendsShortTermState),
            dividends_qualified: get(Aggregate::DividendsQualified),
            capital_gains_long_term: get(Aggregate::CapitalGainsLongTerm),
            capital_gains_short_term: get(Aggregate::CapitalGainsShortTerm),
            loss: get(Aggregate::Loss),
            interest: get(Aggregate::Interest),
            interest_state: get(Aggregate::InterestState),
            foreign_credit: get(Aggregate::ForeignCredit),
            business_expenses: get(Aggregate::BusinessExpenses),
            home_office_expenses,
            federal_tax_paid: get(Aggregate::FederalTaxPaid),
            social_security_tax_paid: get(Aggregate::SocialSecurityTaxPaid),
            medicare_tax_paid: get(Aggregate::MedicareTaxPaid),
            state_tax_paid: get(Aggregate::StateTaxPaid),
        };

        debug!(year, ?aggregates, "gathered ledger totals");
        aggregates
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    /// Answers each aggregate with its position in `Aggregate::ALL` and each
    /// account with a fixed amount, recording every request.
    #[derive(Default)]
    struct CountingLedger {
        calls: RefCell<Vec<String>>,
    }

    impl LedgerSource for CountingLedger {
        fn aggregate(
            &self,
            aggregate: Aggregate,
            year: i32,
        ) -> Decimal {
            self.calls
                .borrow_mut()
                .push(format!("{}@{}", aggregate.query_name(), year));
            let index = Aggregate::ALL
                .iter()
                .position(|a| *a == aggregate)
                .unwrap_or_default();
            Decimal::from(index as i64 + 1)
        }

        fn account_total(
            &self,
            account: &str,
            year: i32,
        ) -> Decimal {
            self.calls.borrow_mut().push(format!("{account}@{year}"));
            dec!(100.50)
        }
    }

    #[test]
    fn gather_queries_each_aggregate_once() {
        let ledger = CountingLedger::default();

        FinancialAggregates::gather(&ledger, &[], 2024);

        assert_eq!(ledger.calls.borrow().len(), Aggregate::ALL.len());
        assert!(ledger.calls.borrow().iter().all(|c| c.ends_with("@2024")));
    }

    #[test]
    fn gather_maps_aggregates_to_fields() {
        let ledger = CountingLedger::default();

        let aggregates = FinancialAggregates::gather(&ledger, &[], 2024);

        assert_eq!(aggregates.wages, dec!(1));
        assert_eq!(aggregates.total_income, dec!(4));
        assert_eq!(aggregates.loss, dec!(11));
        assert_eq!(aggregates.business_expenses, dec!(15));
        assert_eq!(aggregates.state_tax_paid, dec!(19));
    }

    #[test]
    fn gather_sums_home_office_accounts() {
        let ledger = CountingLedger::default();
        let accounts = vec![
            "expenses:utilities".to_string(),
            "expenses:insurance:home".to_string(),
        ];

        let aggregates = FinancialAggregates::gather(&ledger, &accounts, 2023);

        assert_eq!(aggregates.home_office_expenses, dec!(201.00));
        assert!(
            ledger
                .calls
                .borrow()
                .contains(&"expenses:insurance:home@2023".to_string())
        );
    }
}
