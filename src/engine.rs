//! High-level Engine API
//!
//! This module provides the main entry point: build both indexes from one
//! record stream, then answer point queries and expose the need index.

use crate::config::EngineConfig;
use crate::hash_index::{CompositeKey, CompositeKeyHasher, HashIndex};
use crate::ingest::{read_records, validate_record, IngestReport, SeriesBuilder};
use crate::model::{Fingerprint, FingerprintBuilder, Record};
use crate::ops::{display_data, state_needs, Legend, StateNeed};
use crate::search::{Comparison, Query, QueryResolver};
use crate::trie::GeoTrie;
use crate::{Error, Result};
use log::{info, warn};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Both indexes, built once and then only read
///
/// Provides a convenient API for:
/// - Loading county data from a file or reader
/// - Comparing hash-index and trie answers for one query
/// - Reading the per-state need index and its legend
pub struct Engine {
    config: EngineConfig,
    hash: HashIndex,
    trie: GeoTrie,
    needs: Vec<f64>,
    report: IngestReport,
    fingerprint: Fingerprint,
}

/// Size and shape of the built indexes
#[derive(Clone, Debug, Serialize)]
pub struct IndexStats {
    pub fingerprint: Fingerprint,
    pub hash_entries: usize,
    pub hash_buckets: usize,
    pub hash_occupied_buckets: usize,
    pub hash_load_factor: f32,
    pub hash_resizes: usize,
    pub hash_longest_chain: usize,
    pub trie_nodes: usize,
    pub trie_data_nodes: usize,
    pub trie_states: usize,
}

impl Engine {
    /// Load a delimited data file
    pub fn open(path: impl AsRef<Path>, config: EngineConfig) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(format!("data file {}", path.display())));
        }
        let file = File::open(path)?;
        info!("Loading {}", path.display());
        Self::from_reader(file, config)
    }

    /// Load delimited data from any reader
    pub fn from_reader<R: Read>(reader: R, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let (records, report) = read_records(reader)?;
        Ok(Self::build(&records, report, config))
    }

    /// Build from records produced elsewhere
    ///
    /// Records are checked with the reader's rules; a rejected record goes
    /// into the report under its 1-based position and reaches neither index.
    pub fn from_records(records: &[Record], config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut report = IngestReport {
            rows: records.len(),
            ..IngestReport::default()
        };
        let mut accepted = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            match validate_record(record) {
                Ok(()) => accepted.push(record.clone()),
                Err(err) => {
                    warn!("Rejecting record {}: {}", idx + 1, err);
                    report.skip(idx + 1, err);
                }
            }
        }
        report.accepted = accepted.len();
        Ok(Self::build(&accepted, report, config))
    }

    fn build(records: &[Record], mut report: IngestReport, config: EngineConfig) -> Self {
        let mut hash = HashIndex::with_capacity(config.initial_buckets, config.max_load_factor);
        let mut series = SeriesBuilder::new();
        let mut fingerprint = FingerprintBuilder::new();

        for record in records {
            fingerprint.update(record);
            let key = record.composite_key();
            if CompositeKey::parse(&key).is_none() {
                report.unkeyable += 1;
            } else if !hash.insert(key, record.formatted_value()) {
                report.duplicate_keys += 1;
            }
            let placed = series.add(record);
            debug_assert!(placed, "validated record has a trie path");
        }

        let mut trie = GeoTrie::new();
        let (built, unplaced) = series.build();
        report.unplaced_years = unplaced;
        for s in built {
            trie.insert(&s.path, s.attribute, s.values, s.labels);
        }

        let needs = display_data(&trie);
        let fingerprint = fingerprint.finish();

        info!(
            "Built indexes from {} records ({}): {} hash entries in {} buckets, {} trie nodes, {} states",
            records.len(),
            fingerprint.short(),
            hash.len(),
            hash.bucket_count(),
            trie.node_count(),
            needs.len()
        );
        if !report.skipped.is_empty() || report.duplicate_keys > 0 || report.unkeyable > 0 {
            info!(
                "Skipped {} rows, {} duplicate keys, {} unkeyable records",
                report.skipped.len(),
                report.duplicate_keys,
                report.unkeyable
            );
        }

        Engine {
            config,
            hash,
            trie,
            needs,
            report,
            fingerprint,
        }
    }

    // === Queries ===

    /// Resolver over both indexes
    pub fn resolver(&self) -> QueryResolver<'_, CompositeKeyHasher> {
        QueryResolver::new(&self.hash, &self.trie)
    }

    /// Run one query against both indexes, timing each
    pub fn query(&self, query: &Query) -> Result<Comparison> {
        self.resolver().compare(query)
    }

    /// Need index per state, in trie state order
    pub fn display_data(&self) -> &[f64] {
        &self.needs
    }

    /// Need index per state with names and attribute averages
    pub fn state_needs(&self) -> Vec<StateNeed> {
        state_needs(&self.trie)
    }

    /// Legend over the need values
    pub fn legend(&self) -> Legend {
        Legend::from_values(&self.needs, self.config.legend_buckets)
    }

    // === Accessors ===

    pub fn hash_index(&self) -> &HashIndex {
        &self.hash
    }

    pub fn trie(&self) -> &GeoTrie {
        &self.trie
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            fingerprint: self.fingerprint,
            hash_entries: self.hash.len(),
            hash_buckets: self.hash.bucket_count(),
            hash_occupied_buckets: self.hash.occupied_buckets(),
            hash_load_factor: self.hash.load_factor(),
            hash_resizes: self.hash.resize_count(),
            hash_longest_chain: self.hash.longest_chain(),
            trie_nodes: self.trie.node_count(),
            trie_data_nodes: self.trie.data_node_count(),
            trie_states: self.trie.states().count(),
        }
    }
}
