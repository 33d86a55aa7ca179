//! Counts of sale records per category.

use std::collections::BTreeMap;

use crate::sale::SaleRecord;

/// The number of records in each category present in a month.
///
/// Categories without records are absent rather than zero.
pub type CategoryBreakdown = BTreeMap<String, usize>;

/// Counts records by category.
pub fn category_breakdown(records: &[SaleRecord]) -> CategoryBreakdown {
    let mut counts = CategoryBreakdown::new();

    for record in records {
        *counts.entry(record.category.clone()).or_insert(0) += 1;
    }

    counts
}
