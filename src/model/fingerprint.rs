//! Dataset fingerprint using BLAKE3
//!
//! Both indexes are built from the same accepted record stream; the
//! fingerprint digests that stream so two builds can be compared cheaply.

use super::Record;
use serde::{Serialize, Serializer};
use std::fmt;

/// BLAKE3 digest over an accepted record stream, in order
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(blake3::Hash);

impl Fingerprint {
    pub fn of_records(records: &[Record]) -> Self {
        let mut builder = FingerprintBuilder::new();
        for record in records {
            builder.update(record);
        }
        builder.finish()
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }

    /// First 7 hex digits, for log lines
    pub fn short(&self) -> String {
        self.0.to_hex()[..7].to_string()
    }
}

/// Incremental fingerprint over records as they are accepted
#[derive(Default)]
pub struct FingerprintBuilder {
    hasher: blake3::Hasher,
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one record
    ///
    /// Text fields are length-prefixed so adjacent fields cannot run together.
    pub fn update(&mut self, record: &Record) {
        for field in [&record.state_code, &record.county, &record.attribute] {
            self.hasher.update(&(field.len() as u64).to_le_bytes());
            self.hasher.update(field.as_bytes());
        }
        self.hasher.update(&record.year.to_le_bytes());
        self.hasher.update(&record.value.to_bits().to_le_bytes());
    }

    pub fn finish(&self) -> Fingerprint {
        Fingerprint(self.hasher.finalize())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(county: &str, value: f32) -> Record {
        Record::new("FL", county, "Employed", 2001, value)
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let records = vec![record("Alachua", 1.0), record("Baker", 2.0)];
        assert_eq!(
            Fingerprint::of_records(&records),
            Fingerprint::of_records(&records)
        );
    }

    #[test]
    fn test_fingerprint_order_sensitive() {
        let a = vec![record("Alachua", 1.0), record("Baker", 2.0)];
        let b = vec![record("Baker", 2.0), record("Alachua", 1.0)];
        assert_ne!(Fingerprint::of_records(&a), Fingerprint::of_records(&b));
    }

    #[test]
    fn test_field_boundaries_matter() {
        let a = Record::new("FL", "AB", "C", 2001, 1.0);
        let b = Record::new("FL", "A", "BC", 2001, 1.0);
        assert_ne!(Fingerprint::of_records(&[a]), Fingerprint::of_records(&[b]));
    }

    #[test]
    fn test_hex_forms() {
        let fp = Fingerprint::of_records(&[record("Alachua", 3.5)]);
        assert_eq!(fp.to_hex().len(), 64);
        assert!(fp.to_hex().starts_with(&fp.short()));
        assert_eq!(
            serde_json::to_string(&fp).unwrap(),
            format!("\"{}\"", fp.to_hex())
        );
    }

    #[test]
    fn test_empty_stream_differs_from_nonempty() {
        assert_ne!(
            Fingerprint::of_records(&[]),
            Fingerprint::of_records(&[record("Alachua", 0.0)])
        );
    }
}
