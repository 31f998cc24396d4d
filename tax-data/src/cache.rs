//! Content-addressed cache of ledger query results.
//!
//! Results are stored in one JSON file as `{fingerprint: {key: value}}`.
//! The fingerprint changes whenever any file in the journal directory is
//! added, removed, resized or touched, so stale results are never read.
//! Entries under old fingerprints are kept.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use tracing::debug;

type CacheFile = BTreeMap<String, BTreeMap<String, Decimal>>;

/// Separates query arguments inside a cache key.
const ARG_SEPARATOR: &str = "\u{1f}";

/// Builds the cache key for a query's arguments and optional period year.
pub fn cache_key(
    args: &[String],
    year: Option<i32>,
) -> String {
    let year = year.map_or_else(|| "-".to_string(), |y| y.to_string());
    let joined = args.join(ARG_SEPARATOR);
    format!("{joined}|{year}")
}

/// Hashes the path, modification time and size of every file under `dir`.
///
/// Files are visited in sorted order so the result does not depend on
/// directory iteration order. Unreadable entries are skipped; a missing
/// directory hashes like an empty one.
pub fn fingerprint(dir: &Path) -> String {
    let mut hasher = Sha256::new();
    let mut files = Vec::new();
    collect_files(dir, &mut files);
    files.sort();

    for path in files {
        let Ok(metadata) = fs::metadata(&path) else {
            continue;
        };
        let modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update(modified.to_string().as_bytes());
        hasher.update(metadata.len().to_string().as_bytes());
    }

    hex::encode(hasher.finalize())
}

fn collect_files(
    dir: &Path,
    files: &mut Vec<PathBuf>,
) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => collect_files(&path, files),
            Ok(kind) if kind.is_file() => files.push(path),
            _ => {}
        }
    }
}

/// Query results for one journal state, persisted to a JSON file.
///
/// The file is read before and written after every lookup, so concurrent
/// runs may lose each other's entries but never see a wrong value.
#[derive(Debug, Clone)]
pub struct QueryCache {
    path: PathBuf,
    fingerprint: String,
}

impl QueryCache {
    /// Opens the cache at `path` for the current state of `journal_dir`.
    pub fn new(
        path: impl Into<PathBuf>,
        journal_dir: &Path,
    ) -> Self {
        let fingerprint = fingerprint(journal_dir);
        debug!(journal = %journal_dir.display(), %fingerprint, "fingerprinted journal directory");
        Self::with_fingerprint(path, fingerprint)
    }

    pub fn with_fingerprint(
        path: impl Into<PathBuf>,
        fingerprint: String,
    ) -> Self {
        Self {
            path: path.into(),
            fingerprint,
        }
    }

    /// Default cache location in the system temporary directory.
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join("hledger_query_cache.json")
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<Decimal> {
        self.read()
            .get(&self.fingerprint)
            .and_then(|entries| entries.get(key))
            .copied()
    }

    /// Stores `value` under `key`. Write failures are logged and ignored.
    pub fn put(
        &self,
        key: &str,
        value: Decimal,
    ) {
        let mut cache = self.read();
        cache
            .entry(self.fingerprint.clone())
            .or_default()
            .insert(key.to_string(), value);

        let written = serde_json::to_string(&cache)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(&self.path, json).map_err(|e| e.to_string()));
        if let Err(error) = written {
            debug!(path = %self.path.display(), %error, "could not write query cache");
        }
    }

    /// Current cache contents. A missing or unreadable file is an empty cache.
    fn read(&self) -> CacheFile {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return CacheFile::new();
        };
        serde_json::from_str(&content).unwrap_or_else(|error| {
            debug!(path = %self.path.display(), %error, "ignoring corrupt query cache");
            CacheFile::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // =========================================================================
    // cache_key tests
    // =========================================================================

    #[test]
    fn cache_key_distinguishes_year_and_no_year() {
        let args = args(&["income:salary"]);

        assert_eq!(cache_key(&args, Some(2024)), "income:salary|2024");
        assert_eq!(cache_key(&args, None), "income:salary|-");
    }

    #[test]
    fn cache_key_keeps_argument_boundaries() {
        let split = cache_key(&args(&["a", "b"]), None);
        let joined = cache_key(&args(&["a b"]), None);

        assert_ne!(split, joined);
    }

    // =========================================================================
    // fingerprint tests
    // =========================================================================

    #[test]
    fn fingerprint_is_stable_for_unchanged_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.journal"), "2024-01-01 opening\n").unwrap();

        assert_eq!(fingerprint(dir.path()), fingerprint(dir.path()));
    }

    #[test]
    fn fingerprint_changes_when_a_file_grows() {
        let dir = TempDir::new().unwrap();
        let journal = dir.path().join("main.journal");
        fs::write(&journal, "2024-01-01 opening\n").unwrap();
        let before = fingerprint(dir.path());

        fs::write(&journal, "2024-01-01 opening\n2024-02-01 rent\n").unwrap();

        assert_ne!(before, fingerprint(dir.path()));
    }

    #[test]
    fn fingerprint_includes_nested_files() {
        let dir = TempDir::new().unwrap();
        let before = fingerprint(dir.path());

        fs::create_dir(dir.path().join("2024")).unwrap();
        fs::write(dir.path().join("2024").join("jan.journal"), "x").unwrap();

        assert_ne!(before, fingerprint(dir.path()));
    }

    #[test]
    fn fingerprint_of_missing_directory_is_empty_hash() {
        let dir = TempDir::new().unwrap();
        let empty = fingerprint(dir.path());

        assert_eq!(fingerprint(&dir.path().join("missing")), empty);
    }

    // =========================================================================
    // QueryCache tests
    // =========================================================================

    #[test]
    fn put_then_get_returns_value() {
        let dir = TempDir::new().unwrap();
        let cache = QueryCache::with_fingerprint(dir.path().join("cache.json"), "abc".into());

        cache.put("w2|2024", dec!(1234.56));

        assert_eq!(cache.get("w2|2024"), Some(dec!(1234.56)));
        assert_eq!(cache.get("w2|2023"), None);
    }

    #[test]
    fn other_fingerprint_does_not_see_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let old = QueryCache::with_fingerprint(&path, "old".into());
        let new = QueryCache::with_fingerprint(&path, "new".into());

        old.put("w2|2024", dec!(10));
        new.put("w2|2024", dec!(20));

        assert_eq!(old.get("w2|2024"), Some(dec!(10)));
        assert_eq!(new.get("w2|2024"), Some(dec!(20)));
    }

    #[test]
    fn corrupt_cache_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "not json").unwrap();
        let cache = QueryCache::with_fingerprint(&path, "abc".into());

        assert_eq!(cache.get("w2|2024"), None);

        cache.put("w2|2024", dec!(5));
        assert_eq!(cache.get("w2|2024"), Some(dec!(5)));
    }

    #[test]
    fn unwritable_cache_is_ignored() {
        let dir = TempDir::new().unwrap();
        let cache =
            QueryCache::with_fingerprint(dir.path().join("missing").join("cache.json"), "abc".into());

        cache.put("w2|2024", dec!(5));

        assert_eq!(cache.get("w2|2024"), None);
    }
}
