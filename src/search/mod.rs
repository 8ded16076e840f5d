//! Free-text point queries against the hash index and the trie

mod normalize;
mod resolver;

pub use normalize::{county_candidates, ends_with_ignore_case, is_na, title_case, trim};
pub use resolver::{
    resolve, timed_resolve, Comparison, PointLookup, Probe, Query, QueryResolver,
};
