//! Sales dashboard is a JSON API over a catalog of retail product sales.
//!
//! The library filters sale records by calendar month, searches them by
//! title, description and price, pages through the results and computes the
//! reports shown on the dashboard: summary statistics, a price histogram and
//! a category breakdown.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod handlers;
mod logging;
mod month;
mod pagination;
mod query;
mod report;
mod routing;
mod sale;
mod search;
mod seed;
mod stores;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::SaleMonth;
pub use pagination::{Page, Pagination, PaginationConfig};
pub use query::{QueryParams, SalesService};
pub use report::{
    CategoryBreakdown, CombinedReport, PRICE_BUCKETS, PriceBucket, PriceBucketCount,
    StatisticsReport,
};
pub use routing::build_router;
pub use sale::{NewSaleRecord, SaleId, SaleRecord};
pub use search::SearchTerm;
pub use seed::{
    DEFAULT_SEED_URL, RawSaleRecord, SeedSummary, fetch_catalog, load_catalog, replace_catalog,
    sanitize, sanitize_all, seed_from_url,
};
pub use stores::{InMemorySaleStore, SQLiteSaleStore, SaleStore, create_sales_service};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month selector was missing or was not an integer between 1 and 12.
    ///
    /// Holds the raw value the client sent, or an empty string if it was
    /// missing.
    #[error("invalid month \"{0}\": expected an integer from 1 to 12")]
    InvalidMonth(String),

    /// The page number or page size was not a positive integer.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// The record store could not be read from or written to.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("the record store is unavailable: {0}")]
    StoreUnavailable(String),

    /// The query string could not be decoded, e.g. a parameter was repeated.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// A raw record from the seed catalog failed validation.
    ///
    /// Over HTTP this means the upstream catalog was unusable, so it is
    /// reported as a bad gateway.
    #[error("invalid sale record: {0}")]
    InvalidRecord(String),

    /// The seed catalog could not be fetched or decoded.
    #[error("could not load the seed catalog: {0}")]
    SeedSourceUnavailable(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl Error {
    /// A stable, machine readable name for the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidMonth(_) => "invalid_month",
            Error::InvalidPagination(_) => "invalid_pagination",
            Error::InvalidQuery(_) => "invalid_query",
            Error::StoreUnavailable(_) => "store_unavailable",
            Error::InvalidRecord(_) => "invalid_record",
            Error::SeedSourceUnavailable(_) => "seed_source_unavailable",
            Error::NotFound => "not_found",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidPagination(_) | Error::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidRecord(_) | Error::SeedSourceUnavailable(_) => StatusCode::BAD_GATEWAY,
            Error::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::StoreUnavailable(value.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        tracing::error!("could not fetch the seed catalog: {}", value);
        Error::SeedSourceUnavailable(value.to_string())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            // Store internals are not intended to be shown to the client.
            Error::StoreUnavailable(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
                "the record store is unavailable, check the server logs for more details"
                    .to_owned()
            }
            error => error.to_string(),
        };

        (
            status,
            Json(json!({ "error": message, "kind": self.kind() })),
        )
            .into_response()
    }
}
