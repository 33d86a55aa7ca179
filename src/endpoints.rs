//! The API endpoints URIs.

/// The route for listing a page of a month's sale records.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for the sold and unsold totals of a month.
pub const STATISTICS: &str = "/api/statistics";
/// The route for the price histogram of a month.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for the category breakdown of a month.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for every report of a month in one response.
pub const COMBINED: &str = "/api/combined";
/// The route for replacing the catalog with the seed catalog.
pub const SEED: &str = "/api/seed";
/// The route for checking that the server is up.
pub const HEALTH: &str = "/api/health";
