//! Shared helpers and fixed statutory rates.
//!
//! Rates that vary by year or jurisdiction live in the parameter files; the
//! constants here are the ones the computation hard-wires.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Portion of net self-employment earnings subject to SE tax.
pub const NET_EARNINGS_FACTOR: Decimal = dec!(0.9235);

/// Combined employer and employee Medicare rate on SE earnings.
pub const SE_MEDICARE_RATE: Decimal = dec!(0.029);

/// Combined employer and employee Social Security rate.
pub const SOCIAL_SECURITY_RATE: Decimal = dec!(0.124);

/// Employee Medicare rate on W-2 wages.
pub const MEDICARE_WAGE_RATE: Decimal = dec!(0.0145);

/// Additional Medicare tax on earnings above the threshold.
pub const ADDITIONAL_MEDICARE_RATE: Decimal = dec!(0.009);

/// Net investment income tax rate.
pub const NIIT_RATE: Decimal = dec!(0.038);

/// Maximum solo 401(k) employer contribution as a fraction of net business income.
pub const SOLO_401K_FACTOR: Decimal = dec!(0.19732);

/// Flat rate applied to long-term gains and qualified dividends, and the
/// share of qualified dividends deducted from ordinary income.
pub const LONG_TERM_RATE: Decimal = dec!(0.2);

/// Rounds to cents, with midpoints rounded away from zero.
///
/// Calculators keep full precision; this is for presentation.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(9866.004)), dec!(9866.00));
/// assert_eq!(round_half_up(dec!(9866.005)), dec!(9866.01));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the smaller of two values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// The amount by which `value` exceeds `threshold`, or zero.
pub fn excess_over(
    value: Decimal,
    threshold: Decimal,
) -> Decimal {
    max(value - threshold, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_midpoint_up() {
        assert_eq!(round_half_up(dec!(10679.995)), dec!(10680.00));
    }

    #[test]
    fn round_half_up_rounds_below_midpoint_down() {
        assert_eq!(round_half_up(dec!(10679.994)), dec!(10679.99));
    }

    #[test]
    fn round_half_up_moves_negative_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(-2.675)), dec!(-2.68));
    }

    // =========================================================================
    // max / min tests
    // =========================================================================

    #[test]
    fn max_and_min_pick_the_right_side() {
        assert_eq!(max(dec!(-1), dec!(3)), dec!(3));
        assert_eq!(max(dec!(3), dec!(-1)), dec!(3));
        assert_eq!(min(dec!(-1), dec!(3)), dec!(-1));
        assert_eq!(min(dec!(3), dec!(-1)), dec!(-1));
    }

    // =========================================================================
    // excess_over tests
    // =========================================================================

    #[test]
    fn excess_over_is_zero_at_or_below_threshold() {
        assert_eq!(excess_over(dec!(200000), dec!(200000)), Decimal::ZERO);
        assert_eq!(excess_over(dec!(-5), dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn excess_over_returns_difference_above_threshold() {
        assert_eq!(excess_over(dec!(200001), dec!(200000)), dec!(1));
    }
}
