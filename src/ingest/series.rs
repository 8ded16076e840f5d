//! Grouping of records into per-place attribute series for the trie

use crate::model::{state_name, Record};
use crate::search::ends_with_ignore_case;
use crate::trie::BASE_YEAR;
use std::collections::BTreeMap;

/// One attribute series ready for `GeoTrie::insert`
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub path: String,
    pub attribute: String,
    pub values: Vec<Option<f32>>,
    pub labels: Vec<String>,
}

/// County name as stored in the trie: always ending in " County"
pub fn county_segment(county: &str) -> String {
    if ends_with_ignore_case(county, " county") {
        county.to_string()
    } else {
        format!("{} County", county)
    }
}

/// Trie path for a record: `"<State Name>/<County> County"`
pub fn trie_path(record: &Record) -> Option<String> {
    let state = state_name(&record.state_code)?;
    Some(format!("{}/{}", state, county_segment(&record.county)))
}

/// Collects records by path, attribute and year
///
/// Ordered maps keep paths and attributes sorted; a repeated year keeps the
/// last value seen.
#[derive(Debug, Default)]
pub struct SeriesBuilder {
    paths: BTreeMap<String, BTreeMap<String, BTreeMap<i32, f32>>>,
}

impl SeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record; false if its state code does not resolve
    pub fn add(&mut self, record: &Record) -> bool {
        let Some(path) = trie_path(record) else {
            return false;
        };
        self.paths
            .entry(path)
            .or_default()
            .entry(record.attribute.clone())
            .or_default()
            .insert(record.year, record.value);
        true
    }

    /// Build dense series starting at `BASE_YEAR`
    ///
    /// Years missing between the first and last are `None`. Years before
    /// `BASE_YEAR` cannot be placed; their count is returned alongside.
    pub fn build(self) -> (Vec<Series>, usize) {
        let mut series = Vec::new();
        let mut unplaced = 0;

        for (path, attributes) in self.paths {
            for (attribute, years) in attributes {
                unplaced += years.range(..BASE_YEAR).count();
                let Some((&last, _)) = years.last_key_value() else {
                    continue;
                };
                if last < BASE_YEAR {
                    continue;
                }
                let len = (last - BASE_YEAR + 1) as usize;
                let mut values = vec![None; len];
                for (&year, &value) in years.range(BASE_YEAR..) {
                    values[(year - BASE_YEAR) as usize] = Some(value);
                }
                let labels = (BASE_YEAR..=last).map(|y| y.to_string()).collect();
                series.push(Series {
                    path: path.clone(),
                    attribute,
                    values,
                    labels,
                });
            }
        }
        (series, unplaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_county_segment() {
        assert_eq!(county_segment("Autauga"), "Autauga County");
        assert_eq!(county_segment("Autauga County"), "Autauga County");
        assert_eq!(county_segment("Orleans Parish"), "Orleans Parish County");
    }

    #[test]
    fn test_trie_path() {
        let record = Record::new("AL", "Autauga", "Employed", 2001, 1.0);
        assert_eq!(trie_path(&record).as_deref(), Some("Alabama/Autauga County"));
        let unknown = Record::new("ZZ", "Autauga", "Employed", 2001, 1.0);
        assert_eq!(trie_path(&unknown), None);
    }

    #[test]
    fn test_build_dense_series() {
        let mut builder = SeriesBuilder::new();
        builder.add(&Record::new("AL", "Autauga", "Employed", 2002, 3.0));
        builder.add(&Record::new("AL", "Autauga", "Employed", 2000, 1.0));

        let (series, unplaced) = builder.build();
        assert_eq!(unplaced, 0);
        assert_eq!(series.len(), 1);
        let s = &series[0];
        assert_eq!(s.path, "Alabama/Autauga County");
        assert_eq!(s.labels, vec!["2000", "2001", "2002"]);
        assert_eq!(s.values, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_build_counts_early_years() {
        let mut builder = SeriesBuilder::new();
        builder.add(&Record::new("AL", "Autauga", "Employed", 1999, 9.0));
        builder.add(&Record::new("AL", "Autauga", "Employed", 2000, 1.0));
        builder.add(&Record::new("AL", "Baldwin", "Employed", 1990, 1.0));

        let (series, unplaced) = builder.build();
        assert_eq!(unplaced, 2);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].values, vec![Some(1.0)]);
    }

    #[test]
    fn test_repeated_year_keeps_last() {
        let mut builder = SeriesBuilder::new();
        builder.add(&Record::new("AL", "Autauga", "Employed", 2000, 1.0));
        builder.add(&Record::new("AL", "Autauga", "Employed", 2000, 2.0));
        let (series, _) = builder.build();
        assert_eq!(series[0].values, vec![Some(2.0)]);
    }

    #[test]
    fn test_paths_sorted() {
        let mut builder = SeriesBuilder::new();
        builder.add(&Record::new("WY", "Albany", "Metro", 2000, 0.0));
        builder.add(&Record::new("AL", "Autauga", "Metro", 2000, 1.0));
        let (series, _) = builder.build();
        let paths: Vec<&str> = series.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["Alabama/Autauga County", "Wyoming/Albany County"]);
    }
}
