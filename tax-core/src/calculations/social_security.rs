//! Social Security reconciliation across wages and self-employment.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{
    NET_EARNINGS_FACTOR, SOCIAL_SECURITY_RATE, excess_over, min,
};
use crate::models::FilingStatus;

/// Reconciles Social Security tax owed against what was already paid.
///
/// The wage-side tax is `medicare_wages * 12.4%` capped at `ss_max`; the
/// self-employment side fills whatever cap remains. When filing jointly the
/// cap is doubled, on the assumption that both spouses reach the per-person
/// limit.
///
/// The result is `paid - owed`: a shortfall comes back *negative* and an
/// overpayment positive. Callers subtract it from the total tax.
pub fn social_security_true_up(
    medicare_wages: Decimal,
    net_business_income: Decimal,
    ss_max: Decimal,
    paid: Decimal,
    status: &FilingStatus,
) -> Decimal {
    let cap = if status.is_joint() {
        ss_max * Decimal::TWO
    } else {
        ss_max
    };

    let wage_tax = min(medicare_wages * SOCIAL_SECURITY_RATE, cap);
    let remaining = excess_over(cap, wage_tax);
    debug!(%cap, %wage_tax, %remaining, "social security cap headroom");

    let self_employment_tax = min(
        net_business_income * NET_EARNINGS_FACTOR * SOCIAL_SECURITY_RATE,
        remaining,
    );

    -(wage_tax + self_employment_tax - paid)
}
