use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use tax_cli::app::{self, RunOptions};
use tax_cli::logging::init_logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Estimated federal and state taxes from hledger journals.
///
/// Reads ledger totals for each requested year, applies that year's tax
/// parameters and prints a summary of what is owed.
#[derive(Debug, Parser)]
#[command(name = "taxes", version)]
struct Cli {
    /// Tax years to estimate, in order.
    #[arg(required = true, value_name = "YEAR")]
    years: Vec<i32>,

    /// Directory of tax parameter tables, one subdirectory per jurisdiction.
    #[arg(long, value_name = "DIR", default_value = "tax_parameters")]
    params_dir: PathBuf,

    /// Directory holding `personal.yaml` and `aliases.yaml`.
    #[arg(long, value_name = "DIR", default_value = "hledger_parameters")]
    config_dir: PathBuf,

    /// State jurisdiction.
    #[arg(long, value_name = "NAME", default_value = "ca")]
    state: String,

    /// The hledger executable.
    #[arg(long, value_name = "PATH", default_value = "hledger")]
    hledger: PathBuf,

    /// Query cache file. Defaults to `hledger_query_cache.json` in the
    /// system temporary directory.
    #[arg(long, value_name = "PATH")]
    cache_file: Option<PathBuf>,

    /// Run every ledger query without consulting the cache.
    #[arg(long)]
    no_cache: bool,

    /// Print one JSON object per year instead of the text report.
    #[arg(long)]
    json: bool,

    /// Log filter, e.g. `debug` or `tax_data=trace`. Overrides `RUST_LOG`.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    debug!(?cli, "parsed arguments");

    let options = RunOptions {
        params_dir: cli.params_dir,
        config_dir: cli.config_dir,
        state: cli.state,
        hledger: cli.hledger,
        cache_file: cli.cache_file,
        no_cache: cli.no_cache,
        json: cli.json,
    };

    let mut stdout = std::io::stdout().lock();
    let all_ok = app::run(&options, &cli.years, &mut stdout)?;

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
