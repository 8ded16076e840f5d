//! Record type - one validated observation for a county

use serde::Serialize;

/// A single validated observation: one attribute of one county in one year
///
/// Records are immutable once ingested. Both indexes are built from the
/// same stream of records.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    /// Two-letter state code, e.g. "FL"
    pub state_code: String,
    /// County name as it appears in the source data
    pub county: String,
    /// Attribute base name with the year suffix removed
    pub attribute: String,
    pub year: i32,
    pub value: f32,
}

impl Record {
    pub fn new(
        state_code: impl Into<String>,
        county: impl Into<String>,
        attribute: impl Into<String>,
        year: i32,
        value: f32,
    ) -> Self {
        Record {
            state_code: state_code.into(),
            county: county.into(),
            attribute: attribute.into(),
            year,
            value,
        }
    }

    /// The dash-joined hash-index key: `state-county-attribute-year`
    pub fn composite_key(&self) -> String {
        composite_key(
            &self.state_code,
            &self.county,
            &self.attribute,
            &self.year.to_string(),
        )
    }

    /// The value as stored in the hash index
    pub fn formatted_value(&self) -> String {
        format_value(self.value)
    }
}

/// Join the four key fields with '-'
///
/// No escaping is done: a county or attribute containing '-' produces a
/// key with more than four fields, which the hash index rejects.
pub fn composite_key(state_code: &str, county: &str, attribute: &str, year: &str) -> String {
    format!("{}-{}-{}-{}", state_code, county, attribute, year)
}

/// Format a value with six fractional digits ("3.500000")
pub fn format_value(value: f32) -> String {
    format!("{:.6}", value)
}
