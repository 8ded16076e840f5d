//! Point-query resolution against either index
//!
//! A query is resolved by trying each spelling of the county in order and
//! keeping the first present value. The unemployment rate gets a second pass
//! with its public capitalization when the stored key misses everywhere.

use super::normalize::{county_candidates, is_na, trim};
use crate::hash_index::{BucketHasher, HashIndex};
use crate::model::{composite_key, internal_attribute, UNEMPLOYMENT_RATE_KEY, UNEMPLOYMENT_RATE_LABEL};
use crate::trie::GeoTrie;
use crate::{Error, Result};
use serde::Serialize;
use std::time::{Duration, Instant};

/// An index that answers one exact lookup with a string result
///
/// Results follow each index's own convention for "missing" and are
/// classified with [`is_na`].
pub trait PointLookup {
    fn probe(&self, state_code: &str, county: &str, attribute: &str, year: &str) -> String;
}

impl<H: BucketHasher> PointLookup for HashIndex<H> {
    fn probe(&self, state_code: &str, county: &str, attribute: &str, year: &str) -> String {
        self.search(&composite_key(state_code, county, attribute, year))
    }
}

impl PointLookup for GeoTrie {
    fn probe(&self, state_code: &str, county: &str, attribute: &str, year: &str) -> String {
        self.search_value(state_code, county, attribute, year)
    }
}

/// A point query as entered on the query surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Query {
    pub state_code: String,
    /// Free text; expanded into candidate spellings
    pub county: String,
    /// Public attribute label
    pub attribute: String,
    pub year: String,
}

impl Query {
    /// Build a query, trimming every field
    pub fn new(state_code: &str, county: &str, attribute: &str, year: &str) -> Self {
        Query {
            state_code: trim(state_code).to_string(),
            county: trim(county).to_string(),
            attribute: trim(attribute).to_string(),
            year: trim(year).to_string(),
        }
    }

    /// Reject queries that cannot match anything
    pub fn validate(&self) -> Result<()> {
        if self.year.is_empty() {
            return Err(Error::InvalidQuery("year is empty".into()));
        }
        if self.state_code.chars().count() != 2 {
            return Err(Error::InvalidQuery(format!(
                "state code {:?} is not two letters",
                self.state_code
            )));
        }
        if self.county.is_empty() {
            return Err(Error::InvalidQuery("county is empty".into()));
        }
        Ok(())
    }
}

/// One index's answer and how long it took
#[derive(Clone, Debug, PartialEq)]
pub struct Probe {
    pub value: Option<String>,
    pub elapsed: Duration,
}

impl Probe {
    /// The value, or the empty string the query surface shows for "missing"
    pub fn sentinel(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Side-by-side answers from both indexes
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub hash: Probe,
    pub trie: Probe,
}

impl Comparison {
    /// The hash answer if present, otherwise the trie answer
    pub fn shown(&self) -> Option<&str> {
        self.hash.value.as_deref().or(self.trie.value.as_deref())
    }
}

/// Resolve a query against one index
///
/// Returns the first present value over all county candidates, or `None`.
pub fn resolve<L: PointLookup + ?Sized>(index: &L, query: &Query) -> Option<String> {
    let candidates = county_candidates(&query.county);
    let primary = internal_attribute(&query.attribute);

    let first_hit = |attribute: &str| {
        candidates.iter().find_map(|county| {
            let value = index.probe(&query.state_code, county, attribute, &query.year);
            (!is_na(&value)).then_some(value)
        })
    };

    first_hit(primary).or_else(|| {
        if primary == UNEMPLOYMENT_RATE_KEY {
            first_hit(UNEMPLOYMENT_RATE_LABEL)
        } else {
            None
        }
    })
}

/// Resolve a query and measure wall-clock time
pub fn timed_resolve<L: PointLookup + ?Sized>(index: &L, query: &Query) -> Probe {
    let start = Instant::now();
    let value = resolve(index, query);
    Probe {
        value,
        elapsed: start.elapsed(),
    }
}

/// Runs each query against both indexes independently
pub struct QueryResolver<'a, H: BucketHasher> {
    hash: &'a HashIndex<H>,
    trie: &'a GeoTrie,
}

impl<'a, H: BucketHasher> QueryResolver<'a, H> {
    pub fn new(hash: &'a HashIndex<H>, trie: &'a GeoTrie) -> Self {
        QueryResolver { hash, trie }
    }

    /// Validate, then probe the hash index and the trie in turn
    pub fn compare(&self, query: &Query) -> Result<Comparison> {
        query.validate()?;
        let hash = timed_resolve(self.hash, query);
        let trie = timed_resolve(self.trie, query);
        log::debug!(
            "Query {:?}: hash {:?} in {:?}, trie {:?} in {:?}",
            query,
            hash.value,
            hash.elapsed,
            trie.value,
            trie.elapsed
        );
        Ok(Comparison { hash, trie })
    }
}
