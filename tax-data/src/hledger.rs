//! Ledger totals read by running `hledger bal`.

use std::path::PathBuf;
use std::process::Command;

use rust_decimal::Decimal;
use tax_core::{Aggregate, LedgerSource};
use tracing::{debug, warn};

use crate::cache::{QueryCache, cache_key};
use crate::queries::QueryBook;

/// Extracts the grand total from `hledger bal ... -1` output.
///
/// Takes the first token of the last non-blank line, drops `$` and the
/// thousands separator, and returns its absolute value. Blank or
/// unparseable output is zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_data::parse_balance_output;
///
/// let output = "      $-1,234.56  income:salary\n--------------------\n      $-1,234.56\n";
/// assert_eq!(parse_balance_output(output), dec!(1234.56));
/// ```
pub fn parse_balance_output(output: &str) -> Decimal {
    let Some(token) = output
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .and_then(|line| line.split_whitespace().next())
    else {
        return Decimal::ZERO;
    };

    let normalized = token.replace(['$', ','], "");
    match normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
    {
        Ok(value) => value.abs(),
        Err(e) => {
            debug!(token, "unparseable hledger total: {}", e);
            Decimal::ZERO
        }
    }
}

/// [`LedgerSource`] backed by the `hledger` command line tool.
///
/// Period totals run `hledger bal -p <year> <args> -1`. Paid-to-date
/// totals run without a period and narrow each account to its `:<year>`
/// sub-account. Results are cached when a [`QueryCache`] is attached.
#[derive(Debug, Clone)]
pub struct HledgerSource {
    program: PathBuf,
    book: QueryBook,
    cache: Option<QueryCache>,
}

impl HledgerSource {
    pub fn new(
        program: impl Into<PathBuf>,
        book: QueryBook,
    ) -> Self {
        Self {
            program: program.into(),
            book,
            cache: None,
        }
    }

    pub fn with_cache(
        mut self,
        cache: QueryCache,
    ) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Runs one balance query, consulting the cache first.
    ///
    /// A query that cannot be run, or exits unsuccessfully, is zero and is
    /// not cached.
    pub fn query(
        &self,
        args: &[String],
        year: Option<i32>,
    ) -> Decimal {
        let key = cache_key(args, year);
        if let Some(value) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            debug!(key, %value, "hledger cache hit");
            return value;
        }

        let Some(value) = self.run(args, year) else {
            return Decimal::ZERO;
        };

        if let Some(cache) = &self.cache {
            cache.put(&key, value);
        }
        value
    }

    fn run(
        &self,
        args: &[String],
        year: Option<i32>,
    ) -> Option<Decimal> {
        let mut command = Command::new(&self.program);
        command.arg("bal");
        if let Some(year) = year {
            command.arg("-p").arg(year.to_string());
        }
        command.args(args).arg("-1");
        debug!(?command, "running hledger");

        let output = match command.output() {
            Ok(output) => output,
            Err(error) => {
                warn!(program = %self.program.display(), %error, "could not run hledger; using zero");
                return None;
            }
        };

        if !output.status.success() {
            warn!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                ?args,
                "hledger query failed; using zero"
            );
            return None;
        }

        Some(parse_balance_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl LedgerSource for HledgerSource {
    fn aggregate(
        &self,
        aggregate: Aggregate,
        year: i32,
    ) -> Decimal {
        let name = aggregate.query_name();

        if aggregate == Aggregate::BusinessExpenses {
            return self
                .book
                .accounts(name)
                .iter()
                .map(|account| self.account_total(account, year))
                .sum();
        }

        let args = self.book.args(name);
        if aggregate.is_paid_to_date() {
            self.query(&args.to_args_for_year_account(year), None)
        } else {
            self.query(&args.to_args(), Some(year))
        }
    }

    fn account_total(
        &self,
        account: &str,
        year: i32,
    ) -> Decimal {
        self.query(&[account.to_string()], Some(year))
    }
}
