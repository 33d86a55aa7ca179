//! Implements a SQLite backed sale record store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    month::SaleMonth,
    sale::{NewSaleRecord, SaleRecord},
    stores::SaleStore,
};

/// Stores sale records in a SQLite database.
///
/// The calendar month of each sale is stored alongside the full timestamp so
/// that month queries can use an index.
#[derive(Debug, Clone)]
pub struct SQLiteSaleStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteSaleStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::StoreUnavailable("could not acquire the database lock".to_owned()))
    }
}

impl SaleStore for SQLiteSaleStore {
    /// Retrieve every sale record in the database.
    ///
    /// # Errors
    /// This function will return a [Error::StoreUnavailable] if there is a SQL error.
    fn scan(&self) -> Result<Vec<SaleRecord>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, title, description, price, date_of_sale, category, sold \
                FROM sale ORDER BY id ASC",
            )?
            .query_map([], Self::map_row)?
            .map(|maybe_record| maybe_record.map_err(Error::from))
            .collect()
    }

    /// Retrieve the sale records for `month` using the month index.
    ///
    /// # Errors
    /// This function will return a [Error::StoreUnavailable] if there is a SQL error.
    fn scan_month(&self, month: SaleMonth) -> Result<Vec<SaleRecord>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, title, description, price, date_of_sale, category, sold \
                FROM sale WHERE sale_month = ?1 ORDER BY id ASC",
            )?
            .query_map([month.number()], Self::map_row)?
            .map(|maybe_record| maybe_record.map_err(Error::from))
            .collect()
    }

    /// Delete every sale record and insert `records` in a single transaction.
    ///
    /// # Errors
    /// Returns an [Error::StoreUnavailable] if there is an unexpected SQL
    /// error, in which case the previous records are kept.
    fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<usize, Error> {
        let connection = self.lock()?;

        let tx = connection.unchecked_transaction()?;
        tx.execute("DELETE FROM sale", ())?;

        let mut stmt = tx.prepare(
            "INSERT INTO sale (title, description, price, date_of_sale, sale_month, category, sold)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        let mut inserted = 0;
        for record in records {
            inserted += stmt.execute((
                record.title,
                record.description,
                record.price,
                record.date_of_sale,
                record.date_of_sale.month() as u8,
                record.category,
                record.sold,
            ))?;
        }

        drop(stmt);

        tx.commit()?;
        Ok(inserted)
    }
}

impl CreateTable for SQLiteSaleStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS sale (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    price REAL NOT NULL CHECK (price >= 0),
                    date_of_sale TEXT NOT NULL,
                    sale_month INTEGER NOT NULL CHECK (sale_month BETWEEN 1 AND 12),
                    category TEXT NOT NULL,
                    sold INTEGER NOT NULL
                    )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS sale_month_index ON sale(sale_month)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteSaleStore {
    type ReturnType = SaleRecord;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(SaleRecord {
            id: row.get(offset)?,
            title: row.get(offset + 1)?,
            description: row.get(offset + 2)?,
            price: row.get(offset + 3)?,
            date_of_sale: row.get(offset + 4)?,
            category: row.get(offset + 5)?,
            sold: row.get(offset + 6)?,
        })
    }
}
