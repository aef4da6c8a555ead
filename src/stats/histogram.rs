use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::constructs::components::DataInstance;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Share of the column's non-null values that fall into this bucket.
    pub frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: u64,
    pub null_count: u64,
    pub distinct_count: u64,
    /// Sorted ascending by `lower_bound`.
    pub buckets: Vec<Bucket>,
}

impl Histogram {
    pub fn empty() -> Self {
        Histogram {
            mean: 0.0,
            min: 0.0,
            max: 0.0,
            count: 0,
            null_count: 0,
            distinct_count: 0,
            buckets: Vec::new(),
        }
    }
}

/// Total order over stats keys. Keys are never NaN and never -0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Key(f64);

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Accumulates one column's values during a scan.
#[derive(Debug)]
pub struct HistogramBuilder {
    convertible: bool,
    sum: f64,
    min: f64,
    max: f64,
    count: u64,
    null_count: u64,
    frequencies: BTreeMap<Key, u64>,
}

impl HistogramBuilder {
    /// A non-convertible column only ever counts its nulls.
    pub fn new(convertible: bool) -> Self {
        HistogramBuilder {
            convertible,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
            null_count: 0,
            frequencies: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, value: &DataInstance) {
        let raw = match value {
            DataInstance::Null => {
                self.null_count += 1;
                return;
            }
            DataInstance::Direct(raw) => raw,
        };
        if !self.convertible {
            return;
        }
        let key = match raw.to_stats_key() {
            Some(key) => key,
            None => return,
        };
        self.sum += key;
        self.min = self.min.min(key);
        self.max = self.max.max(key);
        self.count += 1;
        *self.frequencies.entry(Key(key)).or_insert(0) += 1;
    }

    pub fn finish(self) -> Histogram {
        if self.count == 0 {
            return Histogram {
                null_count: self.null_count,
                ..Histogram::empty()
            };
        }
        let count = self.count as f64;
        let buckets = self
            .frequencies
            .iter()
            .map(|(Key(key), occurrences)| Bucket {
                lower_bound: *key,
                upper_bound: *key,
                frequency: *occurrences as f64 / count,
            })
            .collect();
        Histogram {
            mean: self.sum / count,
            min: self.min,
            max: self.max,
            count: self.count,
            null_count: self.null_count,
            distinct_count: self.frequencies.len() as u64,
            buckets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_column_has_zeroed_bounds() {
        assert_eq!(HistogramBuilder::new(true).finish(), Histogram::empty());
    }

    #[test]
    fn builds_single_value_buckets() {
        let mut builder = HistogramBuilder::new(true);
        for value in [
            DataInstance::from(1u64),
            DataInstance::from(1u64),
            DataInstance::from(3u64),
            DataInstance::Null,
        ] {
            builder.add(&value);
        }
        assert_eq!(
            builder.finish(),
            Histogram {
                mean: 5.0 / 3.0,
                min: 1.0,
                max: 3.0,
                count: 3,
                null_count: 1,
                distinct_count: 2,
                buckets: vec![
                    Bucket {
                        lower_bound: 1.0,
                        upper_bound: 1.0,
                        frequency: 2.0 / 3.0,
                    },
                    Bucket {
                        lower_bound: 3.0,
                        upper_bound: 3.0,
                        frequency: 1.0 / 3.0,
                    },
                ],
            }
        );
    }

    #[test]
    fn buckets_are_sorted_across_signs() {
        let mut builder = HistogramBuilder::new(true);
        for value in [2i64, -5, 0, -5] {
            builder.add(&DataInstance::from(value));
        }
        builder.add(&DataInstance::from(-0.0f64));
        let histogram = builder.finish();
        let bounds: Vec<f64> = histogram
            .buckets
            .iter()
            .map(|bucket| bucket.lower_bound)
            .collect();
        assert_eq!(bounds, vec![-5.0, 0.0, 2.0]);
        assert_eq!(histogram.distinct_count, 3);
        assert_eq!(histogram.min, -5.0);
    }

    #[test]
    fn non_convertible_column_only_counts_nulls() {
        let mut builder = HistogramBuilder::new(false);
        builder.add(&DataInstance::from("abc"));
        builder.add(&DataInstance::Null);
        assert_eq!(
            builder.finish(),
            Histogram {
                null_count: 1,
                ..Histogram::empty()
            }
        );
    }
}
