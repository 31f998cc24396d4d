//! Self-employment tax.
//!
//! Only the Medicare-equivalent part (2.9% of 92.35% of net earnings) is
//! computed here. The Social Security part depends on how much of the
//! Social Security cap wages already used, so it is settled together with
//! wage withholding in [`social_security_true_up`].
//!
//! [`social_security_true_up`]: crate::calculations::social_security::social_security_true_up

use rust_decimal::Decimal;

use crate::calculations::common::{NET_EARNINGS_FACTOR, SE_MEDICARE_RATE};

/// Medicare-equivalent self-employment tax on `net_business_income`.
///
/// Not clamped: a business loss produces a negative amount, which lowers the
/// total tax and the half-SE-tax adjustment accordingly.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::self_employment_tax;
///
/// assert_eq!(self_employment_tax(dec!(100000)), dec!(2678.15));
/// ```
pub fn self_employment_tax(net_business_income: Decimal) -> Decimal {
    net_business_income * NET_EARNINGS_FACTOR * SE_MEDICARE_RATE
}
