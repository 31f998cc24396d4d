use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{FilingStatus, Surcharge, TaxBracket};

/// Errors raised while selecting or checking jurisdiction parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    /// Neither the requested filing status nor `joint` has an entry.
    #[error("no {jurisdiction} tax parameters found for filing status '{status}' or 'joint'")]
    MissingFilingStatus {
        jurisdiction: String,
        status: FilingStatus,
    },

    /// Bracket thresholds must be strictly increasing.
    #[error("{status}: bracket thresholds must be strictly increasing ({previous} then {next})")]
    UnorderedBrackets {
        status: String,
        previous: Decimal,
        next: Decimal,
    },

    /// Every rate must be a fraction in [0, 1].
    #[error("{status}: rate {rate} is outside [0, 1]")]
    RateOutOfRange { status: String, rate: Decimal },
}

fn default_threshold() -> Decimal {
    dec!(200000)
}

/// Tax parameters for one filing status of one jurisdiction and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionParams {
    #[serde(default)]
    pub brackets: Vec<TaxBracket>,

    #[serde(default)]
    pub standard_deduction: Decimal,

    /// Social Security cap. Only meaningful for the federal table.
    #[serde(default)]
    pub ss_max: Decimal,

    #[serde(default)]
    pub surcharges: Vec<Surcharge>,

    /// AGI above which the net investment income tax applies.
    #[serde(default = "default_threshold")]
    pub niit_threshold: Decimal,

    /// Combined wages and SE earnings above which the additional Medicare tax applies.
    #[serde(default = "default_threshold")]
    pub medicare_threshold: Decimal,
}

impl JurisdictionParams {
    /// Checks bracket ordering and that every rate is a fraction.
    pub fn validate(
        &self,
        status: &str,
    ) -> Result<(), ParameterError> {
        for pair in self.brackets.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(ParameterError::UnorderedBrackets {
                    status: status.to_string(),
                    previous: pair[0].threshold,
                    next: pair[1].threshold,
                });
            }
        }

        let rates = self
            .brackets
            .iter()
            .map(|b| b.rate)
            .chain(self.surcharges.iter().map(|s| s.rate));
        for rate in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ParameterError::RateOutOfRange {
                    status: status.to_string(),
                    rate,
                });
            }
        }

        Ok(())
    }
}

/// All filing-status entries of one jurisdiction's parameter file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionTable {
    /// Jurisdiction name as used in messages, e.g. `federal` or `ca`.
    pub jurisdiction: String,

    /// Year of the file the table was read from. May be earlier than the
    /// requested year when the loader fell back to the latest file on hand.
    pub year: i32,

    pub statuses: BTreeMap<String, JurisdictionParams>,
}

impl JurisdictionTable {
    /// Selects the entry for `status`, falling back to `joint`.
    ///
    /// Returns the parameters together with the status that was actually used.
    pub fn resolve(
        &self,
        status: &FilingStatus,
    ) -> Result<(&JurisdictionParams, FilingStatus), ParameterError> {
        if let Some(params) = self.statuses.get(status.as_str()) {
            return Ok((params, status.clone()));
        }

        if let Some(params) = self.statuses.get(FilingStatus::Joint.as_str()) {
            debug!(
                jurisdiction = %self.jurisdiction,
                requested = %status,
                "filing status missing; using joint parameters"
            );
            return Ok((params, FilingStatus::Joint));
        }

        Err(ParameterError::MissingFilingStatus {
            jurisdiction: self.jurisdiction.clone(),
            status: status.clone(),
        })
    }

    /// Validates every filing-status entry.
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.statuses
            .iter()
            .try_for_each(|(status, params)| params.validate(status))
    }
}

/// The federal and state tables for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxParameters {
    pub federal: JurisdictionTable,
    pub state: JurisdictionTable,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn params(standard_deduction: Decimal) -> JurisdictionParams {
        JurisdictionParams {
            brackets: vec![
                TaxBracket {
                    threshold: dec!(0),
                    rate: dec!(0.10),
                },
                TaxBracket {
                    threshold: dec!(10000),
                    rate: dec!(0.20),
                },
            ],
            standard_deduction,
            ss_max: dec!(168600),
            surcharges: Vec::new(),
            niit_threshold: dec!(250000),
            medicare_threshold: dec!(250000),
        }
    }

    fn table(entries: &[(&str, Decimal)]) -> JurisdictionTable {
        JurisdictionTable {
            jurisdiction: "federal".to_string(),
            year: 2024,
            statuses: entries
                .iter()
                .map(|(status, sd)| (status.to_string(), params(*sd)))
                .collect(),
        }
    }

    // =========================================================================
    // resolve tests
    // =========================================================================

    #[test]
    fn resolve_uses_exact_status_when_present() {
        let table = table(&[("single", dec!(14600)), ("joint", dec!(29200))]);

        let (params, status) = table.resolve(&FilingStatus::Single).unwrap();

        assert_eq!(params.standard_deduction, dec!(14600));
        assert_eq!(status, FilingStatus::Single);
    }

    #[test]
    fn resolve_falls_back_to_joint() {
        let table = table(&[("joint", dec!(29200))]);

        let (params, status) = table.resolve(&FilingStatus::HeadOfHousehold).unwrap();

        assert_eq!(params.standard_deduction, dec!(29200));
        assert_eq!(status, FilingStatus::Joint);
    }

    #[test]
    fn resolve_unlisted_status_falls_back_to_joint() {
        let table = table(&[("single", dec!(14600)), ("joint", dec!(29200))]);
        let status = FilingStatus::parse("qualifying_surviving_spouse");

        let (params, resolved) = table.resolve(&status).unwrap();

        assert_eq!(params.standard_deduction, dec!(29200));
        assert_eq!(resolved, FilingStatus::Joint);
    }

    #[test]
    fn resolve_fails_without_status_or_joint() {
        let table = table(&[("single", dec!(14600))]);

        let result = table.resolve(&FilingStatus::Separate);

        assert_eq!(
            result,
            Err(ParameterError::MissingFilingStatus {
                jurisdiction: "federal".to_string(),
                status: FilingStatus::Separate,
            })
        );
    }

    #[test]
    fn missing_filing_status_message_names_jurisdiction() {
        let error = ParameterError::MissingFilingStatus {
            jurisdiction: "ca".to_string(),
            status: FilingStatus::Single,
        };

        assert_eq!(
            error.to_string(),
            "no ca tax parameters found for filing status 'single' or 'joint'"
        );
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_ascending_brackets() {
        assert_eq!(params(dec!(0)).validate("joint"), Ok(()));
    }

    #[test]
    fn validate_rejects_repeated_threshold() {
        let mut params = params(dec!(0));
        params.brackets[1].threshold = dec!(0);

        assert_eq!(
            params.validate("joint"),
            Err(ParameterError::UnorderedBrackets {
                status: "joint".to_string(),
                previous: dec!(0),
                next: dec!(0),
            })
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut params = params(dec!(0));
        params.surcharges.push(Surcharge {
            threshold: dec!(1000000),
            rate: dec!(1.5),
        });

        assert_eq!(
            params.validate("single"),
            Err(ParameterError::RateOutOfRange {
                status: "single".to_string(),
                rate: dec!(1.5),
            })
        );
    }
}
