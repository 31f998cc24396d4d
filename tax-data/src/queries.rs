//! The ledger query book from `aliases.yaml`.
//!
//! Top-level keys other than `queries` are named account groups. Each entry
//! under `queries` describes one logical total:
//!
//! ```yaml
//! transfers:
//!   - assets:checking
//!   - assets:savings
//! queries:
//!   w2:
//!     accounts:
//!       - income: salary
//!     remove_groups: [transfers]
//!     exclude_accounts: [income:salary:bonus]
//! ```
//!
//! An account entry is either a string or a one-key map, since YAML reads
//! `- income: salary` as a map. Both render as `income:salary`. A map with
//! several keys becomes several patterns.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::ConfigError;
use crate::loader::load_yaml;

/// One account filter as written in the query book.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AccountEntry {
    Name(String),
    Nested(BTreeMap<String, Value>),
}

impl AccountEntry {
    /// The hledger account patterns this entry stands for, one per argument.
    ///
    /// A map with several keys yields one pattern per key.
    pub fn patterns(&self) -> Vec<String> {
        match self {
            Self::Name(name) => vec![name.clone()],
            Self::Nested(map) => map
                .iter()
                .map(|(parent, child)| match child {
                    Value::String(s) => format!("{parent}:{s}"),
                    Value::Number(n) => format!("{parent}:{n}"),
                    Value::Bool(b) => format!("{parent}:{b}"),
                    _ => format!("{parent}:"),
                })
                .collect(),
        }
    }
}

/// How one logical total is queried.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryDef {
    #[serde(default)]
    pub accounts: Vec<AccountEntry>,
    /// Groups whose accounts are added to the filter.
    #[serde(default)]
    pub remove_groups: Vec<String>,
    /// Accounts masked out through `--alias <account>=xyz`.
    #[serde(default)]
    pub exclude_accounts: Vec<String>,
}

/// The argument pieces for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// Account patterns, from the query's own entries and its groups.
    pub accounts: Vec<String>,
    /// Accounts masked out of the total.
    pub excluded: Vec<String>,
}

impl QueryArgs {
    /// Arguments for a query restricted to a period with `-p`.
    pub fn to_args(&self) -> Vec<String> {
        self.render(|account| account.to_string())
    }

    /// Arguments for a paid-to-date query, where every account pattern is
    /// narrowed to the `:<year>` sub-account instead of a period.
    pub fn to_args_for_year_account(
        &self,
        year: i32,
    ) -> Vec<String> {
        self.render(|account| format!("{account}:{year}"))
    }

    fn render(
        &self,
        account: impl Fn(&str) -> String,
    ) -> Vec<String> {
        let accounts = self.accounts.iter().map(|a| account(a.as_str()));
        let aliases = self
            .excluded
            .iter()
            .flat_map(|a| ["--alias".to_string(), format!("{a}=xyz")]);
        accounts.chain(aliases).collect()
    }
}

#[derive(Debug, Deserialize)]
struct QueryBookFile {
    #[serde(default)]
    queries: BTreeMap<String, QueryDef>,
    #[serde(flatten)]
    groups: BTreeMap<String, Vec<AccountEntry>>,
}

/// Named account groups and the queries built from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBook {
    groups: BTreeMap<String, Vec<AccountEntry>>,
    queries: BTreeMap<String, QueryDef>,
}

impl QueryBook {
    pub fn new(
        groups: BTreeMap<String, Vec<AccountEntry>>,
        queries: BTreeMap<String, QueryDef>,
    ) -> Self {
        Self { groups, queries }
    }

    /// Reads the query book from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file: QueryBookFile = load_yaml(path)?;
        Ok(Self::new(file.groups, file.queries))
    }

    pub fn query(
        &self,
        name: &str,
    ) -> Option<&QueryDef> {
        self.queries.get(name)
    }

    /// Builds the argument pieces for the query called `name`.
    ///
    /// An unknown query, or a group that does not exist, contributes nothing.
    pub fn args(
        &self,
        name: &str,
    ) -> QueryArgs {
        let Some(query) = self.queries.get(name) else {
            return QueryArgs::default();
        };

        let own = query.accounts.iter().flat_map(AccountEntry::patterns);
        let grouped = query
            .remove_groups
            .iter()
            .filter_map(|group| self.groups.get(group))
            .flatten()
            .flat_map(AccountEntry::patterns);

        QueryArgs {
            accounts: own.chain(grouped).collect(),
            excluded: query.exclude_accounts.clone(),
        }
    }

    /// The query's own account patterns, without groups or exclusions.
    pub fn accounts(
        &self,
        name: &str,
    ) -> Vec<String> {
        self.queries
            .get(name)
            .map(|q| q.accounts.iter().flat_map(AccountEntry::patterns).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const BOOK: &str = "
transfers:
  - assets:checking
  - assets:savings
retirement:
  - assets: 401k
queries:
  w2:
    accounts:
      - income: salary
      - income:
    remove_groups: [transfers, missing]
    exclude_accounts: [income:salary:bonus]
  business_expenses:
    accounts:
      - expenses:business:software
      - expenses:business:travel
    remove_groups: [retirement]
  fed_tax_paid:
    accounts: [expenses:taxes:federal]
";

    fn book() -> QueryBook {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aliases.yaml");
        fs::write(&path, BOOK).unwrap();
        QueryBook::load(&path).unwrap()
    }

    // =========================================================================
    // AccountEntry tests
    // =========================================================================

    #[test]
    fn nested_entries_join_with_colon() {
        let entries: Vec<AccountEntry> =
            serde_yaml::from_str("[income:salary, {income: salary}, {income: null}, {assets: 401}]")
                .unwrap();

        let patterns: Vec<String> = entries.iter().flat_map(AccountEntry::patterns).collect();

        assert_eq!(
            patterns,
            vec!["income:salary", "income:salary", "income:", "assets:401"]
        );
    }

    #[test]
    fn multi_key_entry_yields_one_pattern_per_key() {
        let entry: AccountEntry =
            serde_yaml::from_str("{income: salary, expenses: business}").unwrap();

        assert_eq!(entry.patterns(), vec!["expenses:business", "income:salary"]);
    }

    #[test]
    fn multi_key_entry_becomes_separate_arguments() {
        let book = QueryBook::new(
            BTreeMap::new(),
            BTreeMap::from([(
                "combined".to_string(),
                QueryDef {
                    accounts: vec![serde_yaml::from_str("{a: b, c: d}").unwrap()],
                    ..QueryDef::default()
                },
            )]),
        );

        assert_eq!(book.args("combined").to_args(), vec!["a:b", "c:d"]);
    }

    // =========================================================================
    // QueryBook tests
    // =========================================================================

    #[test]
    fn load_splits_groups_from_queries() {
        let book = book();

        assert!(book.query("w2").is_some());
        assert!(book.query("transfers").is_none());
        assert_eq!(book.groups.len(), 2);
    }

    #[test]
    fn args_combine_accounts_groups_and_exclusions() {
        let args = book().args("w2");

        assert_eq!(
            args.to_args(),
            vec![
                "income:salary",
                "income:",
                "assets:checking",
                "assets:savings",
                "--alias",
                "income:salary:bonus=xyz",
            ]
        );
    }

    #[test]
    fn paid_to_date_args_suffix_accounts_only() {
        let args = book().args("w2");

        assert_eq!(
            args.to_args_for_year_account(2024),
            vec![
                "income:salary:2024",
                "income::2024",
                "assets:checking:2024",
                "assets:savings:2024",
                "--alias",
                "income:salary:bonus=xyz",
            ]
        );
    }

    #[test]
    fn unknown_query_has_no_args() {
        assert_eq!(book().args("nonexistent").to_args(), Vec::<String>::new());
    }

    #[test]
    fn accounts_lists_only_own_entries() {
        assert_eq!(
            book().accounts("business_expenses"),
            vec!["expenses:business:software", "expenses:business:travel"]
        );
        assert!(book().accounts("nonexistent").is_empty());
    }
}
