//! # econ_index
//!
//! A dual-index lookup engine for per-county economic time series.
//!
//! econ_index ingests county observations once and answers point lookups
//! against two independently built indexes, so their answers and timings
//! can be compared side by side.
//!
//! ## Core Concepts
//!
//! - **Hash index**: chained hash table keyed by `state-county-attribute-year`
//! - **Geo trie**: state → county → attribute series, matched by exact name
//! - **Need index**: one weighted scalar per state, aggregated from the trie
//! - **Query resolver**: expands free-text county names into candidate
//!   spellings and probes either index
//!
//! ## Example
//!
//! ```ignore
//! use econ_index::{Engine, EngineConfig, Query};
//!
//! let engine = Engine::open("unemployment.csv", EngineConfig::default())?;
//! let cmp = engine.query(&Query::new("FL", "alachua", "Unemployment_Rate", "2001"))?;
//! println!("{:?} in {:.3} ms", cmp.hash.value, cmp.hash.elapsed_ms());
//! ```

pub mod config;
pub mod hash_index;
pub mod ingest;
pub mod model;
pub mod ops;
pub mod search;
pub mod trie;

mod engine;
mod error;

pub use config::EngineConfig;
pub use engine::{Engine, IndexStats};
pub use error::{Error, RecordError, Result};
pub use hash_index::{BucketHasher, CompositeKeyHasher, HashIndex};
pub use ingest::IngestReport;
pub use model::{Fingerprint, Record};
pub use ops::{Legend, StateNeed};
pub use search::{Comparison, Probe, Query, QueryResolver};
pub use trie::{GeoTrie, NodeId};
