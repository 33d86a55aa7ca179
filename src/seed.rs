//! Loads the product catalog and replaces the contents of the record store.
//!
//! The catalog is a JSON array of product sales, either downloaded from a URL
//! or read from a local file. Each entry is validated before it is stored, and
//! entries that fail validation are skipped and logged.

use std::path::Path;

use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{
    Error,
    query::SalesService,
    sale::{NewSaleRecord, SaleRecord},
};

/// The public catalog the dashboard was designed around.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// One entry of the catalog, as it appears on the wire.
///
/// Fields are optional so that one malformed entry does not prevent the rest
/// of the catalog from loading; [sanitize] decides whether an entry is usable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSaleRecord {
    /// The catalog's own ID, not kept: the store assigns its own IDs.
    #[serde(default)]
    pub id: Option<i64>,
    /// The product name.
    #[serde(default)]
    pub title: Option<String>,
    /// A longer description of the product.
    #[serde(default)]
    pub description: Option<String>,
    /// The listed price.
    #[serde(default)]
    pub price: Option<f64>,
    /// The product category.
    #[serde(default)]
    pub category: Option<String>,
    /// A product image URL, not kept.
    #[serde(default)]
    pub image: Option<String>,
    /// Whether the product sold.
    #[serde(default)]
    pub sold: Option<bool>,
    /// An RFC 3339 timestamp, or a plain `YYYY-MM-DD` date.
    #[serde(default)]
    pub date_of_sale: Option<String>,
}

/// The outcome of replacing the store with a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    /// The number of records now in the store.
    pub inserted: usize,
    /// The number of catalog entries that failed validation.
    pub skipped: usize,
}

/// Validate a catalog entry.
///
/// Text is trimmed, a missing description or category becomes empty, a
/// missing `sold` flag means unsold, and the sale date is converted to UTC.
///
/// # Errors
/// Returns [Error::InvalidRecord] if the title is missing or blank, the price
/// is missing, negative or not finite, or the sale date is missing or cannot
/// be parsed.
pub fn sanitize(raw: RawSaleRecord) -> Result<NewSaleRecord, Error> {
    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| Error::InvalidRecord("the title is missing".to_owned()))?;

    let price = match raw.price {
        Some(price) if price.is_finite() && price >= 0.0 => price,
        Some(price) => {
            return Err(Error::InvalidRecord(format!(
                "the price {price} is not a non-negative number"
            )));
        }
        None => return Err(Error::InvalidRecord("the price is missing".to_owned())),
    };

    let date_of_sale = raw
        .date_of_sale
        .as_deref()
        .ok_or_else(|| Error::InvalidRecord("the sale date is missing".to_owned()))
        .and_then(parse_sale_date)?;

    Ok(SaleRecord::build(title, price, date_of_sale)
        .description(raw.description.as_deref().unwrap_or_default().trim())
        .category(raw.category.as_deref().unwrap_or_default().trim())
        .sold(raw.sold.unwrap_or(false)))
}

fn parse_sale_date(text: &str) -> Result<OffsetDateTime, Error> {
    let text = text.trim();

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(date_time.to_offset(UtcOffset::UTC));
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| Error::InvalidRecord(format!("could not parse the sale date \"{text}\"")))
}

/// Validate every catalog entry, skipping the ones that fail.
///
/// # Returns
/// The valid records, in catalog order, and the number of skipped entries.
pub fn sanitize_all(raw_records: Vec<RawSaleRecord>) -> (Vec<NewSaleRecord>, usize) {
    let mut records = Vec::with_capacity(raw_records.len());
    let mut skipped = 0;

    for (index, raw) in raw_records.into_iter().enumerate() {
        let source_id = raw.id;

        match sanitize(raw) {
            Ok(record) => records.push(record),
            Err(error) => {
                tracing::warn!("skipping catalog entry {index} (id {source_id:?}): {error}");
                skipped += 1;
            }
        }
    }

    (records, skipped)
}

/// Download the catalog from `url`.
///
/// # Errors
/// Returns [Error::SeedSourceUnavailable] if the request fails, the server
/// responds with an error status, or the body is not a JSON array of entries.
pub async fn fetch_catalog(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<RawSaleRecord>, Error> {
    let catalog = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<RawSaleRecord>>()
        .await?;

    Ok(catalog)
}

/// Read the catalog from a JSON file.
///
/// # Errors
/// Returns [Error::SeedSourceUnavailable] if the file cannot be read or is not
/// a JSON array of entries.
pub fn load_catalog(path: &Path) -> Result<Vec<RawSaleRecord>, Error> {
    let text = std::fs::read_to_string(path).map_err(|error| {
        Error::SeedSourceUnavailable(format!("could not read {}: {error}", path.display()))
    })?;

    parse_catalog(&text)
}

fn parse_catalog(text: &str) -> Result<Vec<RawSaleRecord>, Error> {
    serde_json::from_str(text)
        .map_err(|error| Error::SeedSourceUnavailable(format!("invalid catalog JSON: {error}")))
}

/// Validate `raw_records` and replace the store contents with the valid ones.
///
/// # Errors
/// Returns [Error::InvalidRecord] without touching the store if the catalog
/// has entries but none of them are valid, or [Error::StoreUnavailable] if the
/// store could not be written.
pub fn replace_catalog(
    sales: &SalesService,
    raw_records: Vec<RawSaleRecord>,
) -> Result<SeedSummary, Error> {
    let entry_count = raw_records.len();
    let (records, skipped) = sanitize_all(raw_records);

    if entry_count > 0 && records.is_empty() {
        return Err(Error::InvalidRecord(format!(
            "none of the {entry_count} catalog entries are valid"
        )));
    }

    let start_time = std::time::Instant::now();
    let inserted = sales.replace_all(records)?;
    tracing::info!(
        "Replaced catalog in {:.2}ms: {inserted} records inserted, {skipped} skipped",
        start_time.elapsed().as_secs_f64() * 1000.0
    );

    Ok(SeedSummary { inserted, skipped })
}

/// Download the catalog from `url` and replace the store contents with it.
///
/// # Errors
/// See [fetch_catalog] and [replace_catalog].
pub async fn seed_from_url(
    sales: &SalesService,
    client: &reqwest::Client,
    url: &str,
) -> Result<SeedSummary, Error> {
    tracing::info!("Fetching catalog from {url}");
    let raw_records = fetch_catalog(client, url).await?;

    replace_catalog(sales, raw_records)
}
