//! Medicare reconciliation including the additional Medicare tax.

use rust_decimal::Decimal;

use crate::calculations::common::{
    ADDITIONAL_MEDICARE_RATE, MEDICARE_WAGE_RATE, NET_EARNINGS_FACTOR, excess_over, max,
};

/// Extra Medicare tax still owed after withholding.
///
/// Owed is 1.45% of `medicare_wages` plus 0.9% of combined wages and net
/// self-employment earnings above `threshold`. The result never goes below
/// zero; over-withholding is not refunded here.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::medicare_true_up;
///
/// let extra = medicare_true_up(dec!(300000), dec!(0), dec!(4350), dec!(200000));
/// assert_eq!(extra, dec!(900));
/// ```
pub fn medicare_true_up(
    medicare_wages: Decimal,
    net_business_income: Decimal,
    paid: Decimal,
    threshold: Decimal,
) -> Decimal {
    let earnings = medicare_wages + net_business_income * NET_EARNINGS_FACTOR;
    let owed = MEDICARE_WAGE_RATE * medicare_wages
        + ADDITIONAL_MEDICARE_RATE * excess_over(earnings, threshold);

    max(owed - paid, Decimal::ZERO)
}
