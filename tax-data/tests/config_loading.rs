//! Loading the bundled fixture configuration.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{ContributionPolicy, FilingStatus};
use tax_data::{ConfigError, ParameterLoader, QueryBook, load_personal};

fn test_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data")
}

fn loader() -> ParameterLoader {
    ParameterLoader::new(test_data().join("tax_parameters"))
}

#[test]
fn loads_exact_year_for_both_jurisdictions() {
    let parameters = loader().load(2024, "ca").unwrap();

    assert_eq!(parameters.federal.year, 2024);
    assert_eq!(parameters.state.year, 2024);
    assert_eq!(parameters.federal.statuses.len(), 2);
    assert_eq!(
        parameters.state.statuses["joint"].surcharges[0].threshold,
        dec!(1000000)
    );
}

#[test]
fn earlier_year_uses_its_own_file() {
    let federal = loader().load_table("federal", 2023).unwrap();

    assert_eq!(federal.year, 2023);
    assert_eq!(federal.statuses["joint"].ss_max, dec!(160200));
}

#[test]
fn missing_year_falls_back_to_latest() {
    let parameters = loader().load(2030, "ca").unwrap();

    assert_eq!(parameters.federal.year, 2024);
    assert_eq!(parameters.state.year, 2024);
}

#[test]
fn state_without_single_entry_resolves_to_joint() {
    let parameters = loader().load(2024, "ca").unwrap();

    let (federal, federal_status) = parameters.federal.resolve(&FilingStatus::Single).unwrap();
    let (state, state_status) = parameters.state.resolve(&FilingStatus::Single).unwrap();

    assert_eq!(federal_status, FilingStatus::Single);
    assert_eq!(federal.standard_deduction, dec!(14600));
    assert_eq!(state_status, FilingStatus::Joint);
    assert_eq!(state.standard_deduction, dec!(10726));
}

#[test]
fn unlisted_filing_status_resolves_to_joint() {
    let parameters = loader().load(2024, "ca").unwrap();
    let status = FilingStatus::parse("qualifying_surviving_spouse");

    let (federal, federal_status) = parameters.federal.resolve(&status).unwrap();
    let (_, state_status) = parameters.state.resolve(&status).unwrap();

    assert_eq!(federal_status, FilingStatus::Joint);
    assert_eq!(federal.standard_deduction, dec!(29200));
    assert_eq!(state_status, FilingStatus::Joint);
}

#[test]
fn unknown_jurisdiction_has_no_parameter_files() {
    let result = loader().load(2024, "ny");

    assert!(matches!(
        result,
        Err(ConfigError::NoParameterFiles { jurisdiction, .. }) if jurisdiction == "ny"
    ));
}

#[test]
fn loads_personal_fixture() {
    let settings = load_personal(&test_data().join("hledger_parameters/personal.yaml")).unwrap();
    let config = settings.config;

    assert_eq!(config.filing_status, FilingStatus::Joint);
    assert_eq!(config.interest.by_year["2023"], dec!(9800));
    assert!(config.interest.amortization.is_some());
    assert_eq!(config.home_office.accounts, vec!["expenses:home:utilities"]);
    assert_eq!(config.contribution_policy, ContributionPolicy::Percentage(dec!(50)));
    assert_eq!(settings.journal_directory, PathBuf::from("journals"));
}

#[test]
fn loads_query_book_fixture() {
    let book = QueryBook::load(&test_data().join("hledger_parameters/aliases.yaml")).unwrap();

    assert_eq!(book.args("w2").to_args(), vec!["income:salary"]);
    assert_eq!(
        book.args("w2_ca").to_args(),
        vec!["income:salary", "--alias", "income:salary:hsa=xyz"]
    );
    assert_eq!(
        book.args("fed_tax_paid").to_args_for_year_account(2024),
        vec!["expenses:taxes:federal:2024", "assets:transfers:2024"]
    );
}
