//! Contains a convenience function for creating a [SalesService] that uses
//! the SQLite backend.

mod sale;

pub use sale::SQLiteSaleStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig, query::SalesService};

/// Creates a [SalesService] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_sales_service(
    db_connection: Connection,
    pagination_config: PaginationConfig,
) -> Result<SalesService, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let store = SQLiteSaleStore::new(connection);

    Ok(SalesService::new(Arc::new(store), pagination_config))
}
