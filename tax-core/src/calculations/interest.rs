//! Yearly mortgage interest.
//!
//! The figure comes from the first configured source, in this order:
//!
//! 1. an explicit amount for the year,
//! 2. the yearly balance of a ledger account,
//! 3. an amortization schedule with monthly payments,
//!
//! and is zero when nothing is configured.

use rust_decimal::{Decimal, MathematicalOps};
use tracing::{debug, warn};

use crate::ledger::LedgerSource;
use crate::models::{Amortization, InterestSource};

/// Returns the mortgage interest paid during `year`.
pub fn mortgage_interest(
    source: &InterestSource,
    ledger: &dyn LedgerSource,
    year: i32,
) -> Decimal {
    if let Some(amount) = source.by_year.get(&year.to_string()) {
        debug!(year, %amount, "mortgage interest from per-year override");
        return *amount;
    }

    if let Some(account) = &source.account {
        debug!(year, account, "mortgage interest from ledger account");
        return ledger.account_total(account, year);
    }

    if let Some(loan) = &source.amortization {
        debug!(year, ?loan, "mortgage interest from amortization schedule");
        return loan.interest_in_year(year);
    }

    Decimal::ZERO
}

impl Amortization {
    /// Loan balance after `months` payments.
    ///
    /// Returns `None` if the compounding factor overflows.
    pub fn balance_after(
        &self,
        months: u64,
    ) -> Option<Decimal> {
        let m = Decimal::from(months);
        if self.monthly_rate.is_zero() {
            return Some(self.principal - self.payment * m);
        }

        let factor = (Decimal::ONE + self.monthly_rate).checked_powu(months)?;
        let grown = self.principal.checked_mul(factor)?;
        let paid_down = self
            .payment
            .checked_mul(factor - Decimal::ONE)?
            .checked_div(self.monthly_rate)?;
        grown.checked_sub(paid_down)
    }

    /// Cumulative interest paid through `months` payments.
    ///
    /// Everything paid that did not reduce the principal was interest.
    pub fn interest_paid_through(
        &self,
        months: u64,
    ) -> Option<Decimal> {
        let total_paid = self.payment * Decimal::from(months);
        let principal_reduction = self.principal - self.balance_after(months)?;
        Some(total_paid - principal_reduction)
    }

    /// Interest paid during the twelve payments of calendar `year`.
    ///
    /// Years before `start_year` are treated as the first year of the loan.
    pub fn interest_in_year(
        &self,
        year: i32,
    ) -> Decimal {
        let elapsed_months = 12 * (i64::from(year) - i64::from(self.start_year));
        let start_month = u64::try_from(elapsed_months).unwrap_or(0);
        let end_month = start_month + 12;

        match (
            self.interest_paid_through(end_month),
            self.interest_paid_through(start_month),
        ) {
            (Some(end), Some(start)) => end - start,
            _ => {
                warn!(year, start_month, "amortization schedule overflowed; using zero interest");
                Decimal::ZERO
            }
        }
    }
}
