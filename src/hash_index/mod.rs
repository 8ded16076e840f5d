//! Chained hash index over composite keys
//!
//! Keys have the form `state-county-attribute-year`. Values are the
//! observation formatted with six fractional digits.

mod hasher;
mod table;

pub use hasher::{
    bucket_index, composite_hash, field_product, is_alpha, BucketHasher, CompositeKey,
    CompositeKeyHasher, ALPHA_TRUTHY, CHAR_BASE, GOLDEN_RATIO,
};
pub use table::{HashIndex, DEFAULT_BUCKETS, DEFAULT_MAX_LOAD_FACTOR};
