//! Implements an in-memory sale record store.

use std::sync::RwLock;

use crate::{
    Error,
    sale::{NewSaleRecord, SaleId, SaleRecord},
    stores::SaleStore,
};

/// Stores sale records in memory.
///
/// Useful for tests and for serving a catalog that does not need to outlive
/// the process.
#[derive(Debug, Default)]
pub struct InMemorySaleStore {
    inner: RwLock<Catalog>,
}

#[derive(Debug, Default)]
struct Catalog {
    records: Vec<SaleRecord>,
    last_id: SaleId,
}

impl InMemorySaleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`, with IDs starting from 1.
    pub fn with_records(records: Vec<NewSaleRecord>) -> Self {
        let store = Self::new();
        let mut catalog = store
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        catalog.replace(records);
        drop(catalog);
        store
    }
}

impl Catalog {
    fn replace(&mut self, records: Vec<NewSaleRecord>) -> usize {
        let first_id = self.last_id + 1;

        self.records = records
            .into_iter()
            .zip(first_id..)
            .map(|(record, id)| record.with_id(id))
            .collect();
        self.last_id += self.records.len() as SaleId;

        self.records.len()
    }
}

impl SaleStore for InMemorySaleStore {
    fn scan(&self) -> Result<Vec<SaleRecord>, Error> {
        self.inner
            .read()
            .map(|catalog| catalog.records.clone())
            .map_err(|error| {
                tracing::error!("could not acquire the catalog lock: {error}");
                Error::StoreUnavailable("the catalog lock is poisoned".to_owned())
            })
    }

    /// IDs keep increasing across replacements and are never reused.
    fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<usize, Error> {
        let mut catalog = self.inner.write().map_err(|error| {
            tracing::error!("could not acquire the catalog lock: {error}");
            Error::StoreUnavailable("the catalog lock is poisoned".to_owned())
        })?;

        Ok(catalog.replace(records))
    }
}
