//! Geographic trie for path-based lookups
//!
//! This implements an unordered hierarchy where:
//! - Each level is keyed by exact name (state, then county)
//! - Places end in data leaves holding one attribute's yearly series
//! - Nodes live in an arena and refer to each other by index

mod node;
mod tree;

pub use node::{DataNode, GeoNode, NodeId, NodeKind, TrieNode, BASE_YEAR};
pub use tree::{GeoTrie, COUNTY_SUFFIX, NOT_AVAILABLE};
