//! Defines the sale record store trait.

use crate::{
    Error,
    month::SaleMonth,
    sale::{NewSaleRecord, SaleRecord},
};

/// Holds the canonical set of sale records.
///
/// Queries only ever read from the store. The whole catalog is swapped out at
/// once with [SaleStore::replace_all], and implementers must make sure readers
/// never see a partially replaced catalog.
pub trait SaleStore: Send + Sync {
    /// Retrieve every record in the store, ordered by ID.
    fn scan(&self) -> Result<Vec<SaleRecord>, Error>;

    /// Retrieve the records sold in `month` of any year, ordered by ID.
    ///
    /// The default implementation filters the output of [SaleStore::scan].
    fn scan_month(&self, month: SaleMonth) -> Result<Vec<SaleRecord>, Error> {
        let mut records = self.scan()?;
        records.retain(|record| month.matches(record));
        Ok(records)
    }

    /// Atomically replace the contents of the store with `records`.
    ///
    /// IDs are assigned in the order of `records`.
    ///
    /// # Returns
    /// The number of records inserted.
    fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<usize, Error>;
}
