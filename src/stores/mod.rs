//! Contains the trait and implementations for objects that store [sale records](crate::SaleRecord).

mod memory;
mod sale;

pub mod sqlite;

pub use memory::InMemorySaleStore;
pub use sale::SaleStore;
pub use sqlite::{SQLiteSaleStore, create_sales_service};
