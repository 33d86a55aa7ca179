//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{DEFAULT_SEED_URL, query::SalesService};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Queries and reports over the sale record store.
    pub sales: SalesService,

    /// The HTTP client used to download the seed catalog.
    pub http_client: reqwest::Client,

    /// Where to download the seed catalog from.
    pub seed_url: String,
}

impl AppState {
    /// Create a new [AppState] that seeds from [DEFAULT_SEED_URL].
    pub fn new(sales: SalesService) -> Self {
        Self {
            sales,
            http_client: reqwest::Client::new(),
            seed_url: DEFAULT_SEED_URL.to_owned(),
        }
    }

    /// Use `seed_url` as the seed catalog location.
    pub fn with_seed_url(mut self, seed_url: &str) -> Self {
        self.seed_url = seed_url.to_owned();
        self
    }
}

impl FromRef<AppState> for SalesService {
    fn from_ref(state: &AppState) -> Self {
        state.sales.clone()
    }
}

/// The state needed for reseeding the catalog.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The service whose store is replaced.
    pub sales: SalesService,
    /// The HTTP client used to download the catalog.
    pub http_client: reqwest::Client,
    /// Where to download the catalog from.
    pub seed_url: String,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sales: state.sales.clone(),
            http_client: state.http_client.clone(),
            seed_url: state.seed_url.clone(),
        }
    }
}
