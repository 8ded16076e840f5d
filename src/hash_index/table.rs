//! Chained hash table over composite string keys

use super::hasher::{BucketHasher, CompositeKeyHasher};
use crate::model::composite_key;
use log::{debug, warn};

/// Bucket count of a freshly created table
pub const DEFAULT_BUCKETS: usize = 100;

/// Occupied-bucket ratio at which the table doubles
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 0.7;

/// One stored pair plus its cached key hash
#[derive(Clone, Debug)]
struct Entry {
    key: String,
    value: String,
    hash: u64,
}

/// A chained hash table mapping composite keys to stringified values
///
/// - Each bucket is a chain searched linearly
/// - Duplicate inserts are rejected, never overwritten
/// - When the ratio of non-empty buckets to buckets reaches the maximum load
///   factor, the bucket count doubles and every entry is re-bucketed
pub struct HashIndex<H = CompositeKeyHasher> {
    buckets: Vec<Vec<Entry>>,
    /// Number of non-empty buckets
    occupied: usize,
    len: usize,
    max_load_factor: f32,
    resizes: usize,
    hasher: H,
}

impl HashIndex<CompositeKeyHasher> {
    /// Create a table with 100 buckets and a 0.7 load factor
    pub fn new() -> Self {
        Self::with_load_factor(DEFAULT_MAX_LOAD_FACTOR)
    }

    pub fn with_load_factor(max_load_factor: f32) -> Self {
        Self::with_capacity(DEFAULT_BUCKETS, max_load_factor)
    }

    pub fn with_capacity(buckets: usize, max_load_factor: f32) -> Self {
        Self::with_hasher(buckets, max_load_factor, CompositeKeyHasher)
    }
}

impl Default for HashIndex<CompositeKeyHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: BucketHasher> HashIndex<H> {
    /// Create a table with a custom hashing strategy
    ///
    /// A zero bucket count is raised to one.
    pub fn with_hasher(buckets: usize, max_load_factor: f32, hasher: H) -> Self {
        HashIndex {
            buckets: vec![Vec::new(); buckets.max(1)],
            occupied: 0,
            len: 0,
            max_load_factor,
            resizes: 0,
            hasher,
        }
    }

    /// Insert a key-value pair
    ///
    /// Returns false if the key is already present (the stored value is kept)
    /// or if the key cannot be hashed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let Some(hash) = self.hasher.hash_key(&key) else {
            warn!("Rejecting malformed key {:?}", key);
            return false;
        };

        let idx = self.slot(hash);
        let chain = &mut self.buckets[idx];
        if chain.iter().any(|e| e.key == key) {
            return false;
        }
        if chain.is_empty() {
            self.occupied += 1;
        }
        chain.push(Entry {
            key,
            value: value.into(),
            hash,
        });
        self.len += 1;

        if self.load_factor() >= self.max_load_factor {
            self.resize();
        }
        true
    }

    /// Remove a key, keeping the order of the rest of its chain
    ///
    /// The occupied-bucket count drops only when the chain becomes empty,
    /// so it always equals the number of non-empty buckets.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(hash) = self.hasher.hash_key(key) else {
            return false;
        };
        let idx = self.slot(hash);
        let chain = &mut self.buckets[idx];
        match chain.iter().position(|e| e.key == key) {
            Some(pos) => {
                chain.remove(pos);
                if chain.is_empty() {
                    self.occupied -= 1;
                }
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Get the value stored under a key
    pub fn get(&self, key: &str) -> Option<&str> {
        let hash = self.hasher.hash_key(key)?;
        self.buckets[self.slot(hash)]
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Get the value stored under a key, or an empty string
    ///
    /// The empty string cannot be told apart from a stored empty value.
    pub fn search(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// Look up by the four key fields
    pub fn lookup(&self, state_code: &str, county: &str, attribute: &str, year: &str) -> Option<&str> {
        self.get(&composite_key(state_code, county, attribute, year))
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of non-empty buckets
    pub fn occupied_buckets(&self) -> usize {
        self.occupied
    }

    /// Ratio of non-empty buckets to buckets
    pub fn load_factor(&self) -> f32 {
        self.occupied as f32 / self.buckets.len() as f32
    }

    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    /// How many times the table has doubled
    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    /// Length of the longest chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterate over all pairs in bucket order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buckets
            .iter()
            .flatten()
            .map(|e| (e.key.as_str(), e.value.as_str()))
    }

    // === Internal helpers ===

    fn slot(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Double the bucket count and re-bucket every entry in one step
    fn resize(&mut self) {
        let new_count = self.buckets.len() * 2;
        let mut new_buckets: Vec<Vec<Entry>> = vec![Vec::new(); new_count];
        for entry in self.buckets.drain(..).flatten() {
            let idx = (entry.hash % new_count as u64) as usize;
            new_buckets[idx].push(entry);
        }
        self.occupied = new_buckets.iter().filter(|b| !b.is_empty()).count();
        self.buckets = new_buckets;
        self.resizes += 1;
        debug!(
            "Resized hash index to {} buckets ({} occupied, {} entries)",
            new_count, self.occupied, self.len
        );
    }
}
