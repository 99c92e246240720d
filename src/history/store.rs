//! JSON persistence for the ledger and usage stats
//!
//! Both live under `.luacloak/` in the project root:
//! - `history.json`: the compile ledger, newest first
//! - `stats.json`: the usage counter

use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

use super::ledger::HistoryLedger;
use super::stats::UsageStats;

/// Data directory name under the project root
pub const DATA_DIR: &str = ".luacloak";
const HISTORY_FILE: &str = "history.json";
const STATS_FILE: &str = "stats.json";

/// Loads and saves the compile ledger
pub struct HistoryStore<FS: FileSystem = RealFileSystem> {
    root: PathBuf,
    fs: FS,
}

impl HistoryStore<RealFileSystem> {
    /// Store rooted at `project_root`
    pub fn new(project_root: &Path) -> Self {
        Self::with_fs(project_root, RealFileSystem)
    }
}

impl<FS: FileSystem> HistoryStore<FS> {
    /// Store with a custom filesystem implementation
    pub fn with_fs(project_root: &Path, fs: FS) -> Self {
        Self {
            root: project_root.to_path_buf(),
            fs,
        }
    }

    /// Path of the history file
    pub fn path(&self) -> PathBuf {
        self.root.join(DATA_DIR).join(HISTORY_FILE)
    }

    /// Load the ledger; a missing file is an empty ledger
    pub fn load(&self) -> Result<HistoryLedger> {
        Ok(load_json(&self.fs, &self.path(), "compile history")?.unwrap_or_default())
    }

    /// Save the ledger, creating `.luacloak/` if needed
    pub fn save(&self, ledger: &HistoryLedger) -> Result<()> {
        save_json(&self.fs, &self.root, &self.path(), ledger, "compile history")
    }

    /// Replace the stored ledger with an empty one
    pub fn clear(&self) -> Result<()> {
        self.save(&HistoryLedger::new())
    }
}

/// Loads and saves the usage counter
pub struct StatsStore<FS: FileSystem = RealFileSystem> {
    root: PathBuf,
    fs: FS,
}

impl StatsStore<RealFileSystem> {
    /// Store rooted at `project_root`
    pub fn new(project_root: &Path) -> Self {
        Self::with_fs(project_root, RealFileSystem)
    }
}

impl<FS: FileSystem> StatsStore<FS> {
    /// Store with a custom filesystem implementation
    pub fn with_fs(project_root: &Path, fs: FS) -> Self {
        Self {
            root: project_root.to_path_buf(),
            fs,
        }
    }

    /// Path of the stats file
    pub fn path(&self) -> PathBuf {
        self.root.join(DATA_DIR).join(STATS_FILE)
    }

    /// Load the counter; a missing file means zero
    pub fn load(&self) -> Result<UsageStats> {
        Ok(load_json(&self.fs, &self.path(), "usage stats")?.unwrap_or_default())
    }

    /// Save the counter
    pub fn save(&self, stats: &UsageStats) -> Result<()> {
        save_json(&self.fs, &self.root, &self.path(), stats, "usage stats")
    }

    /// Load, add `n`, save and return the new counter
    pub fn record(&self, n: u64) -> Result<UsageStats> {
        let stats = self.load()?.increment_by(n);
        self.save(&stats)?;
        Ok(stats)
    }
}

fn load_json<FS: FileSystem, T: DeserializeOwned>(
    fs: &FS,
    path: &Path,
    what: &str,
) -> Result<Option<T>> {
    let contents = match fs.read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {what} from {}", path.display()))
        }
    };

    let value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {what} in {}", path.display()))?;
    Ok(Some(value))
}

fn save_json<FS: FileSystem, T: Serialize>(
    fs: &FS,
    root: &Path,
    path: &Path,
    value: &T,
    what: &str,
) -> Result<()> {
    fs.create_dir_all(&root.join(DATA_DIR))
        .with_context(|| format!("Failed to create {DATA_DIR} directory"))?;

    let contents =
        serde_json::to_string_pretty(value).with_context(|| format!("Failed to serialize {what}"))?;

    fs.write(path, contents)
        .with_context(|| format!("Failed to write {what} to {}", path.display()))?;

    log::debug!("saved {what} to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::CompileRecord;
    use crate::transform::EncodingMethod;
    use std::fs;
    use tempfile::TempDir;

    fn record(id: u64) -> CompileRecord {
        CompileRecord::new(id, "print(1)", "artifact", EncodingMethod::HexPairs)
    }

    #[test]
    fn test_history_load_missing_file_returns_empty() {
        let temp = TempDir::new().unwrap();
        let ledger = HistoryStore::new(temp.path()).load().unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_history_save_and_load_preserves_records() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());

        let ledger = HistoryLedger::new().append(record(1), 50).append(record(2), 50);
        store.save(&ledger).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, ledger);
        assert_eq!(loaded.latest().unwrap().method, EncodingMethod::HexPairs);
    }

    #[test]
    fn test_history_save_creates_directory_if_needed() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        assert!(!temp.path().join(DATA_DIR).exists());

        store.save(&HistoryLedger::new()).unwrap();

        assert!(temp.path().join(DATA_DIR).is_dir());
        assert!(store.path().is_file());
    }

    #[test]
    fn test_history_load_with_corrupted_json_returns_error() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        fs::create_dir_all(temp.path().join(DATA_DIR)).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse compile history"));
    }

    #[test]
    fn test_history_load_with_invalid_schema_returns_error() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        fs::create_dir_all(temp.path().join(DATA_DIR)).unwrap();
        fs::write(store.path(), r#"{"records": [{"id": "x"}]}"#).unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn test_history_clear_writes_empty_ledger() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        store
            .save(&HistoryLedger::new().append(record(1), 50))
            .unwrap();

        store.clear().unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_history_multiple_save_load_cycles() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());

        for id in 0..5 {
            let ledger = store.load().unwrap().append(record(id), 3);
            store.save(&ledger).unwrap();
        }

        let ids: Vec<u64> = store.load().unwrap().records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
    }

    #[test]
    fn test_stats_missing_file_is_zero_and_record_accumulates() {
        let temp = TempDir::new().unwrap();
        let store = StatsStore::new(temp.path());

        assert_eq!(store.load().unwrap().total, 0);
        assert_eq!(store.record(1).unwrap().total, 1);
        assert_eq!(store.record(3).unwrap().total, 4);
        assert_eq!(store.load().unwrap().total, 4);
    }

    #[test]
    fn test_stats_file_is_pretty_json() {
        let temp = TempDir::new().unwrap();
        let store = StatsStore::new(temp.path());
        store.record(2).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(contents.contains("\"total\": 2"));
    }
}
