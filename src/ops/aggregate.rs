//! Per-state need index
//!
//! For every state the mean of each county series is averaged per attribute,
//! and the nine attribute averages are combined with fixed weights into one
//! scalar.

use crate::trie::{GeoTrie, NodeId};
use serde::Serialize;
use std::collections::HashMap;

/// Attribute weights, in the order the weighted sum is taken
pub const NEED_WEIGHTS: [(&str, f64); 9] = [
    ("Civilian_labor_force", 1e-5),
    ("Employed", 1e-5),
    ("Med_HH_Income_Percent_of_State_Total", 1e-3),
    ("Median_Household_Income", 1e-5),
    ("Metro", 1.0),
    ("Rural_Urban_Continuum_Code", 0.1),
    ("Unemployed", 1e-4),
    ("Unemployment_rate", 0.1),
    ("Urban_Influence_Code", 0.1),
];

/// Running (sum of county means, contributing county count) per attribute
#[derive(Debug, Default)]
pub struct AttributeTotals<'t> {
    totals: HashMap<&'t str, (f64, usize)>,
}

impl<'t> AttributeTotals<'t> {
    pub fn add(&mut self, attribute: &'t str, county_mean: f64) {
        let entry = self.totals.entry(attribute).or_insert((0.0, 0));
        entry.0 += county_mean;
        entry.1 += 1;
    }

    /// State average for an attribute; 0.0 when no county reported it
    pub fn average(&self, attribute: &str) -> f64 {
        match self.totals.get(attribute) {
            Some(&(sum, count)) if count > 0 => sum / count as f64,
            _ => 0.0,
        }
    }
}

/// One state's need index with the averages that produced it
#[derive(Clone, Debug, Serialize)]
pub struct StateNeed {
    pub state: String,
    pub need: f64,
    /// Attribute averages in `NEED_WEIGHTS` order
    pub averages: Vec<(String, f64)>,
}

/// Collect attribute totals over every county directly under a state
pub fn state_totals(trie: &GeoTrie, state: NodeId) -> AttributeTotals<'_> {
    let mut totals = AttributeTotals::default();
    for (county, _) in trie.geo_children(state) {
        for data in trie.data_children(county) {
            if let Some(mean) = data.mean() {
                totals.add(&data.attribute, mean);
            }
        }
    }
    totals
}

/// Weighted sum of `value(attribute)` over a weight table
pub fn weighted_sum(weights: &[(&str, f64)], value: impl Fn(&str) -> f64) -> f64 {
    weights
        .iter()
        .map(|&(attribute, weight)| value(attribute) * weight)
        .sum()
}

/// One need index per state, in trie state order
pub fn display_data(trie: &GeoTrie) -> Vec<f64> {
    trie.states()
        .map(|(state, _)| {
            let totals = state_totals(trie, state);
            weighted_sum(&NEED_WEIGHTS, |a| totals.average(a))
        })
        .collect()
}

/// Like [`display_data`], keeping state names and attribute averages
pub fn state_needs(trie: &GeoTrie) -> Vec<StateNeed> {
    trie.states()
        .map(|(state, name)| {
            let totals = state_totals(trie, state);
            StateNeed {
                state: name.to_string(),
                need: weighted_sum(&NEED_WEIGHTS, |a| totals.average(a)),
                averages: NEED_WEIGHTS
                    .iter()
                    .map(|(a, _)| (a.to_string(), totals.average(a)))
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| (2000 + i).to_string()).collect()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
    }

    #[test]
    fn test_two_states_employed_fixture() {
        let mut trie = GeoTrie::new();
        trie.insert("Alabama/Autauga County", "Employed", vec![Some(10.0), Some(20.0)], labels(2));
        trie.insert("Alabama/Baldwin County", "Employed", vec![Some(10.0), Some(20.0)], labels(2));
        trie.insert("Florida/Alachua County", "Employed", vec![Some(30.0), Some(40.0)], labels(2));
        trie.insert("Florida/Baker County", "Employed", vec![Some(30.0), Some(40.0)], labels(2));

        let needs = state_needs(&trie);
        assert_eq!(needs.len(), 2);
        assert_eq!(needs[0].state, "Alabama");
        assert_close(needs[0].averages[1].1, 15.0);
        assert_close(needs[1].averages[1].1, 35.0);

        let data = display_data(&trie);
        assert_close(data[0], 15.0 * 1e-5);
        assert_close(data[1], 35.0 * 1e-5);
    }

    #[test]
    fn test_average_of_county_means() {
        let mut trie = GeoTrie::new();
        trie.insert("Alabama/Autauga County", "Metro", vec![Some(1.0), Some(1.0)], labels(2));
        trie.insert("Alabama/Baldwin County", "Metro", vec![Some(0.0)], labels(1));
        trie.insert("Alabama/Barbour County", "Unemployed", vec![Some(100.0)], labels(1));

        let state = trie.find_path(["Alabama"]).unwrap();
        let totals = state_totals(&trie, state);
        assert_close(totals.average("Metro"), 0.5);
        assert_close(totals.average("Unemployed"), 100.0);
        assert_close(totals.average("Employed"), 0.0);

        let data = display_data(&trie);
        assert_close(data[0], 0.5 * 1.0 + 100.0 * 1e-4);
    }

    #[test]
    fn test_full_weight_table() {
        let mut trie = GeoTrie::new();
        for (attribute, _) in NEED_WEIGHTS {
            trie.insert("Ohio/Adams County", attribute, vec![Some(2.0)], labels(1));
        }
        let expected: f64 = NEED_WEIGHTS.iter().map(|(_, w)| 2.0 * w).sum();
        assert_close(display_data(&trie)[0], expected);
    }

    #[test]
    fn test_unweighted_attributes_ignored() {
        let mut trie = GeoTrie::new();
        trie.insert("Ohio/Adams County", "Population", vec![Some(1e6)], labels(1));
        trie.insert("Ohio/Adams County", "Unemployment_Rate", vec![Some(9.0)], labels(1));
        assert_eq!(display_data(&trie), vec![0.0]);
    }

    #[test]
    fn test_state_without_counties() {
        let mut trie = GeoTrie::new();
        trie.insert("Ohio", "Metro", vec![Some(1.0)], labels(1));
        assert_eq!(display_data(&trie), vec![0.0]);
    }

    #[test]
    fn test_weighted_sum() {
        let weights = [("a", 2.0), ("b", 0.5)];
        let sum = weighted_sum(&weights, |name| if name == "a" { 3.0 } else { 4.0 });
        assert_close(sum, 8.0);
    }
}
