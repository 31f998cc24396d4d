//! Progressive bracket tax and flat surcharges.

use rust_decimal::Decimal;

use crate::calculations::common::{excess_over, max, min};
use crate::models::{Surcharge, TaxBracket};

/// Computes progressive tax on `taxable_income`.
///
/// `brackets` must be sorted by ascending threshold. Each bracket taxes the
/// slice of income between its threshold and the next bracket's threshold
/// at its own rate; the last bracket has no upper bound. Negative income and
/// an empty table both yield zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::TaxBracket;
/// use tax_core::calculations::bracket_tax;
///
/// let brackets = vec![
///     TaxBracket { threshold: dec!(0), rate: dec!(0.10) },
///     TaxBracket { threshold: dec!(10000), rate: dec!(0.20) },
/// ];
///
/// assert_eq!(bracket_tax(dec!(15000), &brackets), dec!(2000));
/// ```
pub fn bracket_tax(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    let tax: Decimal = brackets
        .iter()
        .enumerate()
        .filter(|(_, bracket)| taxable_income > bracket.threshold)
        .map(|(i, bracket)| {
            let upper = brackets
                .get(i + 1)
                .map_or(taxable_income, |next| min(taxable_income, next.threshold));
            (upper - bracket.threshold) * bracket.rate
        })
        .sum();

    max(tax, Decimal::ZERO)
}

/// Sums `rate * max(income - threshold, 0)` over every surcharge.
///
/// Surcharges are independent of each other and of the bracket schedule.
pub fn surcharge_total(
    income: Decimal,
    surcharges: &[Surcharge],
) -> Decimal {
    surcharges
        .iter()
        .map(|s| s.rate * excess_over(income, s.threshold))
        .sum()
}
