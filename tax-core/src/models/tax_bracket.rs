use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of a progressive rate schedule.
///
/// `rate` applies to income between this bracket's `threshold` and the next
/// bracket's threshold; the last bracket of a table has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// A flat surtax on income above `threshold`, independent of brackets and
/// of other surcharges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surcharge {
    #[serde(default)]
    pub threshold: Decimal,
    #[serde(default)]
    pub rate: Decimal,
}
