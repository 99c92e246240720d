//! Compile history ledger
//!
//! A bounded, newest-first list of compile records. The ledger is a plain
//! value: operations take it by value and hand back the updated ledger, so
//! callers that compile concurrently must serialise their updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::transform::EncodingMethod;

/// Single compile run in history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRecord {
    /// Caller-supplied identifier (milliseconds since the epoch by convention)
    pub id: u64,
    /// Source text as entered
    pub input: String,
    /// Generated artifact
    pub output: String,
    /// When the run happened (UTC)
    pub timestamp: DateTime<Utc>,
    /// Encoder used
    pub method: EncodingMethod,
}

impl CompileRecord {
    /// Create a record stamped with the current time
    pub fn new(
        id: u64,
        input: impl Into<String>,
        output: impl Into<String>,
        method: EncodingMethod,
    ) -> Self {
        Self::at(id, input, output, method, Utc::now())
    }

    /// Create a record with an explicit timestamp
    pub fn at(
        id: u64,
        input: impl Into<String>,
        output: impl Into<String>,
        method: EncodingMethod,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            input: input.into(),
            output: output.into(),
            timestamp,
            method,
        }
    }

    /// Artifact size in bytes
    pub fn output_size(&self) -> u64 {
        self.output.len() as u64
    }
}

/// Bounded compile history (newest first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLedger {
    /// Records, newest first
    pub records: Vec<CompileRecord>,
}

impl HistoryLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `record` and keep at most `max_size` entries
    ///
    /// The oldest surplus entries are discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use luacloak::history::{CompileRecord, HistoryLedger};
    /// use luacloak::transform::EncodingMethod;
    ///
    /// let ledger = HistoryLedger::new()
    ///     .append(CompileRecord::new(1, "a", "A", EncodingMethod::HexPairs), 2)
    ///     .append(CompileRecord::new(2, "b", "B", EncodingMethod::HexPairs), 2)
    ///     .append(CompileRecord::new(3, "c", "C", EncodingMethod::HexPairs), 2);
    /// let ids: Vec<u64> = ledger.records.iter().map(|r| r.id).collect();
    /// assert_eq!(ids, vec![3, 2]);
    /// ```
    pub fn append(mut self, record: CompileRecord, max_size: usize) -> Self {
        self.records.insert(0, record);
        self.records.truncate(max_size);
        self
    }

    /// Drop every record with identifier `id`
    pub fn remove(mut self, id: u64) -> Self {
        self.records.retain(|record| record.id != id);
        self
    }

    /// Drop every record
    pub fn clear(mut self) -> Self {
        self.records.clear();
        self
    }

    /// Look up a record by identifier
    pub fn find(&self, id: u64) -> Option<&CompileRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&CompileRecord> {
        self.records.first()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifier for a new record
    ///
    /// Uses `now_millis` unless that would not be greater than every id
    /// already present, in which case the largest id plus one is used.
    pub fn next_id(&self, now_millis: u64) -> u64 {
        match self.records.iter().map(|record| record.id).max() {
            Some(max) if max >= now_millis => max + 1,
            _ => now_millis,
        }
    }
}
