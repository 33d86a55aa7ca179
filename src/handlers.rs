//! Route handlers for the dashboard's JSON API.
//!
//! Each handler passes the raw query string values to [SalesService] and
//! serializes the result. Failures are rendered by [Error]'s `IntoResponse`
//! implementation, so an invalid month, invalid pagination and an unavailable
//! store each produce a distinct status code and error kind.

use axum::{
    Json,
    extract::{FromRequestParts, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    Error,
    app_state::SeedState,
    pagination::Page,
    query::{QueryParams, SalesService},
    report::{CategoryBreakdown, CombinedReport, PriceBucketCount, StatisticsReport},
    sale::SaleRecord,
    seed::{SeedSummary, seed_from_url},
};

/// Extracts the query string like [Query], but reports a malformed query
/// string, such as a repeated parameter, as [Error::InvalidQuery].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(Error))]
pub struct ApiQuery<T>(pub T);

/// The query string for routes that only take a month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The month to report on, 1 to 12.
    pub month: Option<String>,
}

/// List a page of the sale records for a month, optionally filtered by a search term.
pub async fn get_transactions(
    State(sales): State<SalesService>,
    ApiQuery(params): ApiQuery<QueryParams>,
) -> Result<Json<Page<SaleRecord>>, Error> {
    sales.query(&params).map(Json)
}

/// Get the sold and unsold totals for a month.
pub async fn get_statistics(
    State(sales): State<SalesService>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<StatisticsReport>, Error> {
    sales.statistics(query.month.as_deref()).map(Json)
}

/// Get the price histogram for a month.
pub async fn get_bar_chart(
    State(sales): State<SalesService>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<[PriceBucketCount; 10]>, Error> {
    sales.histogram(query.month.as_deref()).map(Json)
}

/// Get the number of records per category for a month.
pub async fn get_pie_chart(
    State(sales): State<SalesService>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<CategoryBreakdown>, Error> {
    sales.category_breakdown(query.month.as_deref()).map(Json)
}

/// Get every report for a month in one response.
pub async fn get_combined(
    State(sales): State<SalesService>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<CombinedReport>, Error> {
    sales.combined(query.month.as_deref()).map(Json)
}

/// Replace the catalog with the one downloaded from the configured seed URL.
pub async fn post_seed(State(state): State<SeedState>) -> Result<Json<SeedSummary>, Error> {
    seed_from_url(&state.sales, &state.http_client, &state.seed_url)
        .await
        .map(Json)
}

/// Report that the server is running.
pub async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
