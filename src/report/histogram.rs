//! Price histogram with ten fixed buckets.

use serde::Serialize;

use crate::sale::SaleRecord;

/// A contiguous range of prices in the histogram.
///
/// A bucket holds the prices greater than `above` (or from zero, for the
/// first bucket) up to and including `up_to` (or without limit, for the last
/// bucket). For whole-number prices this is the inclusive range in the label,
/// e.g. "101-200", and fractional prices between two labels, such as 100.5,
/// fall in the higher bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    /// The label shown on the chart, e.g. "101-200".
    pub label: &'static str,
    /// Exclusive lower limit, `None` for the first bucket which starts at zero.
    pub above: Option<f64>,
    /// Inclusive upper limit, `None` for the last bucket.
    pub up_to: Option<f64>,
}

impl PriceBucket {
    const fn new(label: &'static str, above: Option<f64>, up_to: Option<f64>) -> Self {
        Self {
            label,
            above,
            up_to,
        }
    }

    /// Whether `price` falls in this bucket.
    pub fn contains(&self, price: f64) -> bool {
        let above_lower = match self.above {
            Some(lower) => price > lower,
            None => price >= 0.0,
        };

        above_lower && self.up_to.is_none_or(|upper| price <= upper)
    }
}

/// The histogram buckets, in chart order.
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket::new("0-100", None, Some(100.0)),
    PriceBucket::new("101-200", Some(100.0), Some(200.0)),
    PriceBucket::new("201-300", Some(200.0), Some(300.0)),
    PriceBucket::new("301-400", Some(300.0), Some(400.0)),
    PriceBucket::new("401-500", Some(400.0), Some(500.0)),
    PriceBucket::new("501-600", Some(500.0), Some(600.0)),
    PriceBucket::new("601-700", Some(600.0), Some(700.0)),
    PriceBucket::new("701-800", Some(700.0), Some(800.0)),
    PriceBucket::new("801-900", Some(800.0), Some(900.0)),
    PriceBucket::new("901-above", Some(900.0), None),
];

/// The number of records in one price bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBucketCount {
    /// The bucket label, e.g. "101-200".
    pub range: &'static str,
    /// The number of records priced within the bucket.
    pub count: usize,
}

/// Counts records per price bucket, sold or not.
///
/// # Returns
/// One entry per bucket in [PRICE_BUCKETS] order, including empty buckets.
pub fn price_histogram(records: &[SaleRecord]) -> [PriceBucketCount; 10] {
    let mut counts = [0usize; PRICE_BUCKETS.len()];

    for record in records {
        match bucket_index(record.price) {
            Some(index) => counts[index] += 1,
            None => tracing::warn!(
                "sale record {} has price {} outside every bucket",
                record.id,
                record.price
            ),
        }
    }

    std::array::from_fn(|index| PriceBucketCount {
        range: PRICE_BUCKETS[index].label,
        count: counts[index],
    })
}

fn bucket_index(price: f64) -> Option<usize> {
    PRICE_BUCKETS
        .iter()
        .position(|bucket| bucket.contains(price))
}
