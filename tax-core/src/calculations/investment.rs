//! Net investment income tax (NIIT).

use rust_decimal::Decimal;

use crate::calculations::common::{NIIT_RATE, max, min};

/// Computes the 3.8% tax on investment income once AGI passes `threshold`.
///
/// The taxed amount is the smaller of `investment_income` and the AGI
/// excess over the threshold. Nothing is owed at or below the threshold.
pub fn investment_tax(
    investment_income: Decimal,
    agi: Decimal,
    threshold: Decimal,
) -> Decimal {
    if agi <= threshold {
        return Decimal::ZERO;
    }

    let taxable = min(investment_income, agi - threshold);
    NIIT_RATE * max(taxable, Decimal::ZERO)
}
