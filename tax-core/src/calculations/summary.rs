//! Full federal and state computation for one year.
//!
//! Combines the ledger totals with the year's parameter tables and the
//! personal configuration, threading values through the per-topic
//! calculators. Line numbers refer to Form 1040.
//!
//! | Quantity              | Formula |
//! |-----------------------|---------|
//! | Home office deduction | (home expenses + mortgage interest) × rate + fixed |
//! | Net business income   | total income − wages − home office − business expenses |
//! | AGI                   | wages + interest + NBI + short-term − loss − SE/2 − solo 401(k) |
//! | Federal taxable       | AGI − standard − additional − 20% of qualified dividends |
//! | Tax liability         | brackets + 20% of long-term income |
//! | Total tax             | liability + NIIT − SS extra + SE + Medicare extra, floored at 0 |
//! | State tax             | brackets + surcharges on state taxable income |
//! | State taxable         | state wages + state interest + NBI + state short-term − loss − SE/2 − solo 401(k) + long-term − state standard |
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxSummaryWorksheet;
//! use tax_core::{
//!     FinancialAggregates, JurisdictionParams, JurisdictionTable, PersonalConfig, TaxBracket,
//!     TaxParameters,
//! };
//!
//! let flat = |jurisdiction: &str, rate| JurisdictionTable {
//!     jurisdiction: jurisdiction.to_string(),
//!     year: 2024,
//!     statuses: BTreeMap::from([(
//!         "joint".to_string(),
//!         JurisdictionParams {
//!             brackets: vec![TaxBracket { threshold: dec!(0), rate }],
//!             standard_deduction: dec!(0),
//!             ss_max: dec!(0),
//!             surcharges: Vec::new(),
//!             niit_threshold: dec!(250000),
//!             medicare_threshold: dec!(250000),
//!         },
//!     )]),
//! };
//! let parameters = TaxParameters {
//!     federal: flat("federal", dec!(0.10)),
//!     state: flat("ca", dec!(0.05)),
//! };
//! let personal = PersonalConfig::default();
//! let aggregates = FinancialAggregates {
//!     wages: dec!(50000),
//!     total_income: dec!(50000),
//!     state_wages: dec!(50000),
//!     ..FinancialAggregates::default()
//! };
//!
//! let summary = TaxSummaryWorksheet::new(&parameters, &personal)
//!     .calculate(&aggregates, dec!(0), 2024)
//!     .unwrap();
//!
//! assert_eq!(summary.federal_taxable_income, dec!(50000));
//! assert_eq!(summary.tax_liability, dec!(5000));
//! assert_eq!(summary.state_owed, dec!(2500));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::brackets::{bracket_tax, surcharge_total};
use crate::calculations::common::{LONG_TERM_RATE, max};
use crate::calculations::investment::investment_tax;
use crate::calculations::medicare::medicare_true_up;
use crate::calculations::retirement::solo_401k_contribution;
use crate::calculations::self_emp::self_employment_tax;
use crate::calculations::social_security::social_security_true_up;
use crate::models::{
    FinancialAggregates, HomeOffice, ParameterError, PersonalConfig, TaxParameters, TaxSummary,
};

/// Calculator for the yearly tax summary.
///
/// Holds the immutable inputs that do not come from the ledger: the parameter
/// tables for the year and the personal configuration.
#[derive(Debug, Clone)]
pub struct TaxSummaryWorksheet<'a> {
    parameters: &'a TaxParameters,
    personal: &'a PersonalConfig,
}

impl<'a> TaxSummaryWorksheet<'a> {
    pub fn new(
        parameters: &'a TaxParameters,
        personal: &'a PersonalConfig,
    ) -> Self {
        Self {
            parameters,
            personal,
        }
    }

    /// Computes every summary quantity for `year`.
    ///
    /// `mortgage_interest` is the year's figure from
    /// [`mortgage_interest`](crate::calculations::interest::mortgage_interest).
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::MissingFilingStatus`] if either
    /// jurisdiction has no entry for the configured filing status or `joint`.
    pub fn calculate(
        &self,
        aggregates: &FinancialAggregates,
        mortgage_interest: Decimal,
        year: i32,
    ) -> Result<TaxSummary, ParameterError> {
        let status = &self.personal.filing_status;
        let (federal, federal_status) = self.parameters.federal.resolve(status)?;
        let (state, state_status) = self.parameters.state.resolve(status)?;
        let a = aggregates;

        // Business income (Line 8)
        let home_office_deduction = self.home_office_deduction(
            &self.personal.home_office,
            a.home_office_expenses,
            mortgage_interest,
        );
        let business_income = a.total_income - a.wages;
        let net_business_income = business_income - home_office_deduction - a.business_expenses;

        let solo_401k_contribution =
            solo_401k_contribution(net_business_income, self.personal.contribution_policy);
        let self_employment_tax = self_employment_tax(net_business_income);
        let half_se_and_solo = self_employment_tax / Decimal::TWO + solo_401k_contribution;

        let short_term_total = a.dividends_short_term + a.capital_gains_short_term;
        let long_term_total = a.dividends_long_term + a.capital_gains_long_term;

        // Investment tax and payroll reconciliation
        let investment_income = a.interest + short_term_total + long_term_total - a.loss;
        let adjusted_gross_income =
            a.wages + a.interest + net_business_income + short_term_total - a.loss
                - half_se_and_solo;
        let investment_tax =
            investment_tax(investment_income, adjusted_gross_income, federal.niit_threshold);
        let social_security_extra = social_security_true_up(
            a.medicare_wages,
            net_business_income,
            federal.ss_max,
            a.social_security_tax_paid,
            status,
        );
        // Threshold comes from the resolved federal entry, so an unset filing
        // status uses the joint threshold.
        let medicare_extra = medicare_true_up(
            a.medicare_wages,
            net_business_income,
            a.medicare_tax_paid,
            federal.medicare_threshold,
        );

        // Lines 9 through 15
        let total_income =
            a.wages + a.interest + short_term_total + long_term_total - a.loss + net_business_income;
        let deductions = federal.standard_deduction
            + self.personal.additional_federal_deduction
            + LONG_TERM_RATE * a.dividends_qualified;
        let line_15_taxable_income = total_income - half_se_and_solo - deductions;

        // Federal tax
        let federal_taxable_income = adjusted_gross_income - deductions;
        // Federal surcharge entries are read but not applied.
        let tax_liability =
            bracket_tax(federal_taxable_income, &federal.brackets) + LONG_TERM_RATE * long_term_total;
        let total_tax = max(
            tax_liability + investment_tax - social_security_extra
                + self_employment_tax
                + medicare_extra,
            Decimal::ZERO,
        );
        let federal_owed = total_tax - a.federal_tax_paid - a.foreign_credit;

        // State tax
        let state_taxable_income = a.state_wages
            + a.interest_state
            + net_business_income
            + (a.dividends_short_term_state + a.capital_gains_short_term)
            - a.loss
            - half_se_and_solo
            + long_term_total
            - state.standard_deduction;
        let state_tax = bracket_tax(state_taxable_income, &state.brackets);
        let state_surcharge = surcharge_total(state_taxable_income, &state.surcharges);
        let state_owed = state_tax + state_surcharge - a.state_tax_paid;

        debug!(
            year,
            %net_business_income,
            %adjusted_gross_income,
            %federal_taxable_income,
            %state_taxable_income,
            "computed tax summary"
        );

        Ok(TaxSummary {
            year,
            federal_status,
            state_status,
            wages: a.wages,
            interest: a.interest,
            interest_state: a.interest_state,
            dividends_short_term: a.dividends_short_term,
            capital_gains_short_term: a.capital_gains_short_term,
            short_term_total,
            dividends_long_term: a.dividends_long_term,
            capital_gains_long_term: a.capital_gains_long_term,
            long_term_total,
            loss: a.loss,
            business_income,
            mortgage_interest,
            home_office_deduction,
            business_expenses: a.business_expenses,
            net_business_income,
            total_income,
            adjustments: half_se_and_solo,
            deductions,
            line_15_taxable_income,
            adjusted_gross_income,
            investment_income,
            federal_taxable_income,
            tax_liability,
            self_employment_tax,
            investment_tax,
            social_security_extra,
            medicare_extra,
            foreign_tax_credit: a.foreign_credit,
            total_tax,
            federal_tax_paid: a.federal_tax_paid,
            federal_owed,
            state_taxable_income,
            state_tax,
            state_surcharge,
            state_tax_paid: a.state_tax_paid,
            state_owed,
            solo_401k_contribution,
        })
    }

    /// Business share of home expenses and mortgage interest, plus the fixed amount.
    fn home_office_deduction(
        &self,
        home_office: &HomeOffice,
        home_office_expenses: Decimal,
        mortgage_interest: Decimal,
    ) -> Decimal {
        home_office_expenses * home_office.deduction_rate
            + mortgage_interest * home_office.deduction_rate
            + home_office.fixed_deduction
    }
}
