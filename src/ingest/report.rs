//! Ingestion summary

use crate::error::RecordError;
use serde::{Serialize, Serializer};

/// A dropped input row
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the input
    pub line: usize,
    #[serde(serialize_with = "serialize_display")]
    pub error: RecordError,
}

/// What happened to the input while building the indexes
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IngestReport {
    /// Non-empty data rows read (header excluded)
    pub rows: usize,
    /// Rows that passed validation
    pub accepted: usize,
    pub skipped: Vec<SkippedRow>,
    /// Accepted records whose hash-index key was already present
    pub duplicate_keys: usize,
    /// Records the hash index could not key (a field containing '-')
    pub unkeyable: usize,
    /// Records dated before the first series year, absent from the trie
    pub unplaced_years: usize,
}

impl IngestReport {
    pub fn skip(&mut self, line: usize, error: RecordError) {
        self.skipped.push(SkippedRow { line, error });
    }
}

fn serialize_display<S: Serializer>(error: &RecordError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
