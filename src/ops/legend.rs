//! Equal-width bucketing of need values for map shading

use serde::Serialize;

/// Range used when the values do not span a positive interval
const FALLBACK_RANGE: (f64, f64) = (0.0, 10.0);

/// Largest fraction of the range a value may map to
const MAX_FRACTION: f64 = 0.999999;

/// Bucket of `x` among `buckets` equal slices of `[lo, hi]`
///
/// Values outside the range clamp to the first or last bucket; an empty or
/// inverted range puts everything in bucket 0.
pub fn bucket_index(x: f64, lo: f64, hi: f64, buckets: usize) -> usize {
    if hi <= lo {
        return 0;
    }
    let t = ((x - lo) / (hi - lo)).clamp(0.0, MAX_FRACTION);
    (t * buckets as f64) as usize
}

/// Bucket boundaries over a set of values
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub lo: f64,
    pub hi: f64,
    /// `(start, end)` of each bucket
    pub ranges: Vec<(f64, f64)>,
}

impl Legend {
    pub fn from_values(values: &[f64], buckets: usize) -> Self {
        let (lo, hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let (lo, hi) = if lo < hi { (lo, hi) } else { FALLBACK_RANGE };
        let width = (hi - lo) / buckets.max(1) as f64;
        let ranges = (0..buckets)
            .map(|i| (lo + width * i as f64, lo + width * (i + 1) as f64))
            .collect();
        Legend { lo, hi, ranges }
    }

    pub fn bucket_count(&self) -> usize {
        self.ranges.len()
    }

    /// Bucket a value falls into
    pub fn bucket_of(&self, x: f64) -> usize {
        bucket_index(x, self.lo, self.hi, self.ranges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_index() {
        assert_eq!(bucket_index(0.0, 0.0, 10.0, 5), 0);
        assert_eq!(bucket_index(2.0, 0.0, 10.0, 5), 1);
        assert_eq!(bucket_index(9.99, 0.0, 10.0, 5), 4);
        assert_eq!(bucket_index(10.0, 0.0, 10.0, 5), 4);
    }

    #[test]
    fn test_bucket_index_clamps() {
        assert_eq!(bucket_index(-5.0, 0.0, 10.0, 5), 0);
        assert_eq!(bucket_index(50.0, 0.0, 10.0, 5), 4);
        assert_eq!(bucket_index(3.0, 1.0, 1.0, 5), 0);
        assert_eq!(bucket_index(3.0, 2.0, 1.0, 5), 0);
    }

    #[test]
    fn test_legend_ranges() {
        let legend = Legend::from_values(&[1.0, 3.0, 6.0], 5);
        assert_eq!(legend.lo, 1.0);
        assert_eq!(legend.hi, 6.0);
        assert_eq!(legend.bucket_count(), 5);
        assert_eq!(legend.ranges[0], (1.0, 2.0));
        assert_eq!(legend.ranges[4], (5.0, 6.0));
        assert_eq!(legend.bucket_of(1.0), 0);
        assert_eq!(legend.bucket_of(6.0), 4);
    }

    #[test]
    fn test_legend_fallback_range() {
        let single = Legend::from_values(&[4.0], 5);
        assert_eq!((single.lo, single.hi), (0.0, 10.0));

        let empty = Legend::from_values(&[], 5);
        assert_eq!((empty.lo, empty.hi), (0.0, 10.0));
        assert_eq!(empty.ranges[1], (2.0, 4.0));
    }
}
