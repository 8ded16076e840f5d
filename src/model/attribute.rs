//! Attribute names exposed to the query surface

/// The nine attributes a query may ask for, as shown to users
///
/// These are public labels. "Unemployment_Rate" differs in case from the
/// key stored by ingestion ("Unemployment_rate"); see [`internal_attribute`].
pub const PUBLIC_ATTRIBUTES: [&str; 9] = [
    "Civilian_labor_force",
    "Employed",
    "Med_HH_Income_Percent_of_State_Total",
    "Median_Household_Income",
    "Metro",
    "Rural_Urban_Continuum_Code",
    "Unemployed",
    "Unemployment_Rate",
    "Urban_Influence_Code",
];

/// Public label for the unemployment rate
pub const UNEMPLOYMENT_RATE_LABEL: &str = "Unemployment_Rate";

/// Stored key for the unemployment rate
pub const UNEMPLOYMENT_RATE_KEY: &str = "Unemployment_rate";

/// Map a public label to the key used for the primary probe
///
/// Only the unemployment rate is aliased; every other name passes through.
pub fn internal_attribute(label: &str) -> &str {
    if label == UNEMPLOYMENT_RATE_LABEL {
        UNEMPLOYMENT_RATE_KEY
    } else {
        label
    }
}

/// Split a raw `base_YYYY` attribute into its base name and year
///
/// The split happens at the last '_' and the suffix must be exactly four
/// ASCII digits.
pub fn split_attribute_year(raw: &str) -> Option<(&str, i32)> {
    let pos = raw.rfind('_')?;
    let (base, suffix) = (&raw[..pos], &raw[pos + 1..]);
    if suffix.len() != 4 || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = suffix.parse().ok()?;
    Some((base, year))
}
