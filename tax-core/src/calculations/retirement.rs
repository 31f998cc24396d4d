//! Solo 401(k) contribution sizing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::SOLO_401K_FACTOR;
use crate::models::ContributionPolicy;

/// Largest employer contribution allowed on `net_business_income`.
pub fn max_solo_401k_contribution(net_business_income: Decimal) -> Decimal {
    net_business_income * SOLO_401K_FACTOR
}

/// Contribution chosen by `policy`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::ContributionPolicy;
/// use tax_core::calculations::solo_401k_contribution;
///
/// let half = ContributionPolicy::Percentage(dec!(50));
/// assert_eq!(solo_401k_contribution(dec!(100000), half), dec!(9866));
/// ```
pub fn solo_401k_contribution(
    net_business_income: Decimal,
    policy: ContributionPolicy,
) -> Decimal {
    let max_contribution = max_solo_401k_contribution(net_business_income);
    match policy {
        ContributionPolicy::Maximize => max_contribution,
        ContributionPolicy::Nothing => Decimal::ZERO,
        ContributionPolicy::Percentage(percent) => max_contribution * percent / dec!(100),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn maximize_contributes_full_factor() {
        assert_eq!(
            solo_401k_contribution(dec!(100000), ContributionPolicy::Maximize),
            dec!(19732.0)
        );
    }

    #[test]
    fn percentage_scales_the_maximum() {
        assert_eq!(
            solo_401k_contribution(dec!(100000), ContributionPolicy::Percentage(dec!(50))),
            dec!(9866.0)
        );
    }

    #[test]
    fn nothing_contributes_zero() {
        assert_eq!(
            solo_401k_contribution(dec!(100000), ContributionPolicy::Nothing),
            Decimal::ZERO
        );
    }

    #[test]
    fn zero_percent_contributes_zero() {
        assert_eq!(
            solo_401k_contribution(dec!(100000), ContributionPolicy::Percentage(dec!(0))),
            Decimal::ZERO
        );
    }

    #[test]
    fn business_loss_gives_negative_maximum() {
        assert_eq!(max_solo_401k_contribution(dec!(-1000)), dec!(-197.32));
    }
}
