//! Defines the sale record, the core entity of the catalog.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

/// Alias for the integer type used for sale record IDs.
pub type SaleId = i64;

/// A product that was listed for sale, and whether it sold.
///
/// Records are only ever created by a [SaleStore](crate::SaleStore) when the
/// catalog is replaced. To describe a new record, use [SaleRecord::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// The ID the store assigned to the record.
    pub id: SaleId,
    /// The product name.
    pub title: String,
    /// A longer description of the product.
    pub description: String,
    /// The listed price of the product, never negative.
    pub price: f64,
    /// When the product was sold, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A short label for the kind of product, e.g. "electronics".
    pub category: String,
    /// Whether the product actually sold.
    pub sold: bool,
}

impl SaleRecord {
    /// Describe a new sale record.
    ///
    /// Shortcut for [NewSaleRecord] for discoverability. The date is
    /// converted to UTC.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> NewSaleRecord {
        NewSaleRecord {
            title: title.to_owned(),
            description: String::new(),
            price,
            date_of_sale: date_of_sale.to_offset(UtcOffset::UTC),
            category: String::new(),
            sold: false,
        }
    }
}

/// A sale record that has not been assigned an ID yet.
///
/// Produced by [sanitize](crate::sanitize) or [SaleRecord::build] and consumed
/// by [SaleStore::replace_all](crate::SaleStore::replace_all).
#[derive(Debug, Clone, PartialEq)]
pub struct NewSaleRecord {
    /// The product name.
    pub title: String,
    /// A longer description of the product.
    pub description: String,
    /// The listed price of the product.
    pub price: f64,
    /// When the product was sold, in UTC.
    pub date_of_sale: OffsetDateTime,
    /// The product category.
    pub category: String,
    /// Whether the product actually sold.
    pub sold: bool,
}

impl NewSaleRecord {
    /// Set the description of the record.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category of the record.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set whether the product sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// Attach the store-assigned `id`, producing a full [SaleRecord].
    pub(crate) fn with_id(self, id: SaleId) -> SaleRecord {
        SaleRecord {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            date_of_sale: self.date_of_sale,
            category: self.category,
            sold: self.sold,
        }
    }
}
