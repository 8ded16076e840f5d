//! Composite-key hashing
//!
//! The key hash depends only on the key. Bucket selection reduces it modulo
//! the table size, which keeps resize a plain re-bucketing of cached hashes
//! while still selecting exactly the bucket `seed mod bucket_count`.

/// Additive constant mixed into each field product
pub const GOLDEN_RATIO: u64 = 0x9e37_79b9;

/// Base multiplier for each character of a field
pub const CHAR_BASE: u64 = 131;

/// Value a C-locale `isalpha` reports for a letter
///
/// glibc returns the `_ISalpha` class bit rather than 1, and the per-character
/// term adds that raw value.
pub const ALPHA_TRUTHY: u64 = 0x400;

/// A parsed `state-county-attribute-year` key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositeKey<'a> {
    pub state: &'a str,
    pub county: &'a str,
    pub attribute: &'a str,
    pub year: u64,
}

impl<'a> CompositeKey<'a> {
    /// Split on '-' into exactly four fields, the last numeric
    ///
    /// Returns `None` for anything else, including names that themselves
    /// contain '-'.
    pub fn parse(key: &'a str) -> Option<Self> {
        let mut fields = key.split('-');
        let state = fields.next()?;
        let county = fields.next()?;
        let attribute = fields.next()?;
        let year = fields.next()?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(CompositeKey {
            state,
            county,
            attribute,
            year,
        })
    }
}

/// Strategy for turning a key into a size-independent hash
pub trait BucketHasher {
    /// Hash a key, or `None` if the key is not hashable by this strategy
    fn hash_key(&self, key: &str) -> Option<u64>;

    /// Select a bucket among `bucket_count`
    fn bucket(&self, key: &str, bucket_count: usize) -> Option<usize> {
        let hash = self.hash_key(key)?;
        Some((hash % bucket_count as u64) as usize)
    }
}

/// The composite-key hash: year seed, per-field character products
#[derive(Clone, Copy, Debug, Default)]
pub struct CompositeKeyHasher;

impl BucketHasher for CompositeKeyHasher {
    fn hash_key(&self, key: &str) -> Option<u64> {
        CompositeKey::parse(key).map(|parts| composite_hash(&parts))
    }
}

/// `isalpha` as a raw integer: `ALPHA_TRUTHY` for ASCII letters, else 0
pub fn is_alpha(c: u8) -> u64 {
    if c.is_ascii_alphabetic() {
        ALPHA_TRUTHY
    } else {
        0
    }
}

/// Running product of `CHAR_BASE + is_alpha(c)` over a field's bytes
pub fn field_product(field: &str) -> u64 {
    field
        .bytes()
        .fold(1u64, |acc, c| acc.wrapping_mul(CHAR_BASE + is_alpha(c)))
}

/// Combine the year seed with the three field products
pub fn composite_hash(key: &CompositeKey<'_>) -> u64 {
    let mut seed = key.year;
    seed = seed.wrapping_mul(GOLDEN_RATIO.wrapping_add(field_product(key.state)));
    seed = seed.wrapping_mul(GOLDEN_RATIO.wrapping_add(field_product(key.county)));
    seed.wrapping_add(GOLDEN_RATIO.wrapping_add(field_product(key.attribute)))
}

/// Bucket for `key` in a table of `bucket_count` buckets
///
/// `None` when the key does not split into four fields with a numeric year.
pub fn bucket_index(key: &str, bucket_count: usize) -> Option<usize> {
    CompositeKeyHasher.bucket(key, bucket_count)
}
