//! Personal settings from `personal.yaml`.
//!
//! ```yaml
//! filing_status: joint
//! journal_directory: ~/cloud/finance
//! interest_by_year: {"2023": 11250.40}
//! interest_account: expenses:mortgage:interest
//! principal: 300000
//! monthly_rate: 0.003
//! payment: 1500
//! start_year: 2020
//! home_office:
//!   accounts: [expenses:utilities]
//!   deduction_rate: 0.12
//!   fixed_deduction: 0
//! solo_401k_contribution: maximize
//! additional_federal_deduction: 0
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_yaml::Value;
use tax_core::{
    Amortization, ContributionPolicy, FilingStatus, HomeOffice, InterestSource, PersonalConfig,
};
use tracing::warn;

use crate::error::ConfigError;
use crate::loader::load_yaml;

const DEFAULT_JOURNAL_DIRECTORY: &str = "~/cloud/finance";

/// Everything read from `personal.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalSettings {
    pub config: PersonalConfig,
    /// Directory holding the ledger journals, with `~` expanded.
    pub journal_directory: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct PersonalFile {
    filing_status: Option<String>,
    journal_directory: Option<String>,
    #[serde(default)]
    interest_by_year: serde_yaml::Mapping,
    interest_account: Option<String>,
    principal: Option<Decimal>,
    monthly_rate: Option<Decimal>,
    payment: Option<Decimal>,
    start_year: Option<i32>,
    #[serde(default)]
    home_office: HomeOfficeFile,
    solo_401k_contribution: Option<Value>,
    #[serde(default)]
    additional_federal_deduction: Decimal,
}

#[derive(Debug, Default, Deserialize)]
struct HomeOfficeFile {
    #[serde(default)]
    accounts: Vec<String>,
    #[serde(default)]
    deduction_rate: Decimal,
    #[serde(default)]
    fixed_deduction: Decimal,
}

/// Reads `personal.yaml` at `path`.
///
/// # Errors
///
/// Fails if the file is missing or is not valid YAML. Any filing status is
/// accepted; one without a parameter entry resolves to `joint` later.
pub fn load_personal(path: &Path) -> Result<PersonalSettings, ConfigError> {
    let file: PersonalFile = load_yaml(path)?;

    let filing_status = file
        .filing_status
        .as_deref()
        .map(FilingStatus::parse)
        .unwrap_or_default();

    let interest = InterestSource {
        by_year: interest_overrides(&file.interest_by_year, path)?,
        account: file.interest_account,
        amortization: match (file.principal, file.monthly_rate, file.payment, file.start_year) {
            (Some(principal), Some(monthly_rate), Some(payment), Some(start_year)) => {
                Some(Amortization {
                    principal,
                    monthly_rate,
                    payment,
                    start_year,
                })
            }
            _ => None,
        },
    };

    let journal_directory = expand_home(
        file.journal_directory
            .as_deref()
            .unwrap_or(DEFAULT_JOURNAL_DIRECTORY),
    );

    Ok(PersonalSettings {
        config: PersonalConfig {
            filing_status,
            interest,
            home_office: HomeOffice {
                accounts: file.home_office.accounts,
                deduction_rate: file.home_office.deduction_rate,
                fixed_deduction: file.home_office.fixed_deduction,
            },
            contribution_policy: contribution_policy(file.solo_401k_contribution.as_ref()),
            additional_federal_deduction: file.additional_federal_deduction,
        },
        journal_directory,
    })
}

/// Per-year interest amounts. Keys may be written as numbers or strings.
fn interest_overrides(
    mapping: &serde_yaml::Mapping,
    path: &Path,
) -> Result<BTreeMap<String, Decimal>, ConfigError> {
    mapping
        .iter()
        .map(|(key, value)| {
            let year = match key {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(ConfigError::parse(
                        path,
                        format!("interest_by_year key {other:?} is not a year"),
                    ));
                }
            };
            let amount: Decimal =
                serde_yaml::from_value(value.clone()).map_err(|e| ConfigError::parse(path, e))?;
            Ok((year, amount))
        })
        .collect()
}

/// Interprets `solo_401k_contribution`.
///
/// `maximize`, `none`, or a percentage in `[0, 100]`. Anything else is
/// reported and treated as `maximize`.
pub(crate) fn contribution_policy(value: Option<&Value>) -> ContributionPolicy {
    let Some(value) = value else {
        return ContributionPolicy::Maximize;
    };

    match value {
        Value::String(s) if s == "maximize" => ContributionPolicy::Maximize,
        Value::String(s) if s == "none" => ContributionPolicy::Nothing,
        Value::Number(n) => match n.to_string().parse::<Decimal>() {
            Ok(p) if p.is_zero() => ContributionPolicy::Nothing,
            Ok(p) if p > Decimal::ZERO && p <= Decimal::ONE_HUNDRED => {
                ContributionPolicy::Percentage(p)
            }
            _ => {
                warn!(value = %n, "solo_401k_contribution is not a percentage in [0, 100]; maximizing");
                ContributionPolicy::Maximize
            }
        },
        other => {
            warn!(value = ?other, "unrecognized solo_401k_contribution; maximizing");
            ContributionPolicy::Maximize
        }
    }
}

/// Expands a leading `~` using `$HOME`.
fn expand_home(path: &str) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
