//! Reports computed over the sale records of a single month.
//!
//! Every report function takes records that have already been filtered by
//! [SaleMonth](crate::SaleMonth), so the same slice can feed all of them.
//! This module contains:
//! - Summary statistics of sold and unsold items
//! - A price histogram with ten fixed buckets
//! - A count of records per category
//! - The combined report used to render the whole dashboard at once

mod categories;
mod combined;
mod histogram;
mod statistics;

pub use categories::{CategoryBreakdown, category_breakdown};
pub use combined::{CombinedReport, combine};
pub use histogram::{PRICE_BUCKETS, PriceBucket, PriceBucketCount, price_histogram};
pub use statistics::{StatisticsReport, summarize};
