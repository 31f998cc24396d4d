//! Yearly estimate runs: configuration, ledger totals, computation, output.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tax_core::calculations::{TaxSummaryWorksheet, mortgage_interest};
use tax_core::{FinancialAggregates, TaxSummary};
use tax_data::{
    HledgerSource, ParameterLoader, PersonalSettings, QueryBook, QueryCache, load_personal,
};
use tracing::{debug, error, info};

use crate::report::SummaryReport;

const PERSONAL_FILE: &str = "personal.yaml";
const QUERY_BOOK_FILE: &str = "aliases.yaml";

/// Where configuration lives and how results are written.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory of per-jurisdiction parameter tables.
    pub params_dir: PathBuf,
    /// Directory holding `personal.yaml` and `aliases.yaml`.
    pub config_dir: PathBuf,
    pub state: String,
    /// The `hledger` executable.
    pub hledger: PathBuf,
    pub cache_file: Option<PathBuf>,
    pub no_cache: bool,
    pub json: bool,
}

/// Everything needed to estimate any year.
pub struct Estimator {
    settings: PersonalSettings,
    source: HledgerSource,
    loader: ParameterLoader,
    state: String,
}

impl Estimator {
    /// Reads the personal settings and query book and prepares the ledger.
    pub fn from_options(options: &RunOptions) -> Result<Self> {
        let personal_path = options.config_dir.join(PERSONAL_FILE);
        let settings = load_personal(&personal_path)
            .with_context(|| format!("loading personal settings from {}", personal_path.display()))?;

        let book_path = options.config_dir.join(QUERY_BOOK_FILE);
        let book = QueryBook::load(&book_path)
            .with_context(|| format!("loading ledger queries from {}", book_path.display()))?;

        let mut source = HledgerSource::new(&options.hledger, book);
        if options.no_cache {
            debug!("query cache disabled");
        } else {
            let path = options
                .cache_file
                .clone()
                .unwrap_or_else(QueryCache::default_path);
            debug!(cache = %path.display(), "using query cache");
            source = source.with_cache(QueryCache::new(path, &settings.journal_directory));
        }

        Ok(Self {
            settings,
            source,
            loader: ParameterLoader::new(&options.params_dir),
            state: options.state.clone(),
        })
    }

    /// Computes the summary for `year`.
    pub fn estimate(
        &self,
        year: i32,
    ) -> Result<TaxSummary> {
        let parameters = self
            .loader
            .load(year, &self.state)
            .with_context(|| format!("loading tax parameters for {year}"))?;

        let config = &self.settings.config;
        let aggregates = FinancialAggregates::gather(&self.source, &config.home_office.accounts, year);
        let interest = mortgage_interest(&config.interest, &self.source, year);

        TaxSummaryWorksheet::new(&parameters, config)
            .calculate(&aggregates, interest, year)
            .with_context(|| format!("computing taxes for {year}"))
    }

    pub fn state(&self) -> &str {
        &self.state
    }
}

/// Estimates each year in order and writes the results to `out`.
///
/// A year that fails is logged and skipped. Returns `false` if any year
/// failed.
///
/// # Errors
///
/// Fails if the personal settings or query book cannot be read, or if
/// writing to `out` fails.
pub fn run<W: Write>(
    options: &RunOptions,
    years: &[i32],
    out: &mut W,
) -> Result<bool> {
    let estimator = Estimator::from_options(options)?;
    let mut all_ok = true;

    for &year in years {
        info!(year, state = %options.state, "estimating taxes");
        let summary = match estimator.estimate(year) {
            Ok(summary) => summary,
            Err(e) => {
                error!(year, "{:#}", e);
                all_ok = false;
                continue;
            }
        };

        if options.json {
            serde_json::to_writer(&mut *out, &summary).context("writing JSON summary")?;
            writeln!(out)?;
        } else {
            write!(out, "{}", SummaryReport::new(&summary, estimator.state()))?;
        }
    }

    Ok(all_ok)
}
