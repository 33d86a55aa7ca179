//! Summary statistics for the sold and unsold items of a month.

use serde::Serialize;

use crate::sale::SaleRecord;

/// Totals for one month of sale records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    /// The sum of the prices of the items that sold.
    pub total_sale_amount: f64,
    /// The number of items that sold.
    pub total_sold_items: usize,
    /// The number of items that did not sell.
    pub total_not_sold_items: usize,
}

/// Summarizes sold and unsold items.
///
/// # Arguments
/// * `records` - The records of a single month
///
/// # Returns
/// The totals, all zero if `records` is empty.
pub fn summarize(records: &[SaleRecord]) -> StatisticsReport {
    records
        .iter()
        .fold(StatisticsReport::default(), |mut report, record| {
            if record.sold {
                report.total_sale_amount += record.price;
                report.total_sold_items += 1;
            } else {
                report.total_not_sold_items += 1;
            }

            report
        })
}
