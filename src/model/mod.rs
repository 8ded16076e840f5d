//! Core data model types for econ_index

mod attribute;
mod fingerprint;
mod record;
mod states;

pub use attribute::{
    internal_attribute, split_attribute_year, PUBLIC_ATTRIBUTES, UNEMPLOYMENT_RATE_KEY,
    UNEMPLOYMENT_RATE_LABEL,
};
pub use fingerprint::{Fingerprint, FingerprintBuilder};
pub use record::{composite_key, format_value, Record};
pub use states::{state_name, STATES};
