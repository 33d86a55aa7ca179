//! The combined report used to render the whole dashboard in one request.

use serde::Serialize;

use crate::{
    pagination::{Page, Pagination},
    sale::SaleRecord,
};

use super::{
    CategoryBreakdown, PriceBucketCount, StatisticsReport, category_breakdown, price_histogram,
    summarize,
};

/// Every dashboard view for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedReport {
    /// The first page of the month's records, unsearched.
    pub transactions: Page<SaleRecord>,
    /// See [summarize].
    pub statistics: StatisticsReport,
    /// See [price_histogram].
    #[serde(rename = "barChart")]
    pub histogram: [PriceBucketCount; 10],
    /// See [category_breakdown].
    #[serde(rename = "pieChart")]
    pub category_breakdown: CategoryBreakdown,
}

/// Builds every report from the same set of records.
///
/// # Arguments
/// * `records` - The records of a single month, in store order
/// * `pagination` - The page of records to include as transactions
pub fn combine(records: Vec<SaleRecord>, pagination: Pagination) -> CombinedReport {
    let statistics = summarize(&records);
    let histogram = price_histogram(&records);
    let category_breakdown = category_breakdown(&records);

    CombinedReport {
        transactions: pagination.apply(records),
        statistics,
        histogram,
        category_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        pagination::Pagination,
        report::{category_breakdown, price_histogram, summarize},
        sale::SaleRecord,
    };

    use super::combine;

    #[test]
    fn matches_individual_reports() {
        let records: Vec<_> = (1..=25)
            .map(|i| {
                SaleRecord::build(
                    &format!("Item {i}"),
                    i as f64 * 45.5,
                    datetime!(2021-03-10 00:00 UTC),
                )
                .category(if i % 2 == 0 { "even" } else { "odd" })
                .sold(i % 4 != 0)
                .with_id(i)
            })
            .collect();
        let pagination = Pagination::new(1, 10).unwrap();

        let got = combine(records.clone(), pagination);

        assert_eq!(got.statistics, summarize(&records));
        assert_eq!(got.histogram, price_histogram(&records));
        assert_eq!(got.category_breakdown, category_breakdown(&records));
        assert_eq!(got.transactions, pagination.apply(records));
        assert_eq!(got.transactions.items.len(), 10);
    }

    #[test]
    fn serializes_with_dashboard_keys() {
        let got = combine(Vec::new(), Pagination::new(1, 10).unwrap());

        let json = serde_json::to_value(&got).unwrap();

        for key in ["transactions", "statistics", "barChart", "pieChart"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["barChart"].as_array().unwrap().len(), 10);
    }
}
