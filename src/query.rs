//! The entry point for querying sale records and building reports.
//!
//! [SalesService] takes the raw values sent by a client, validates them and
//! returns either structured results or a typed [Error].

use std::{fmt, sync::Arc};

use serde::Deserialize;

use crate::{
    Error,
    month::SaleMonth,
    pagination::{Page, Pagination, PaginationConfig},
    report::{
        CategoryBreakdown, CombinedReport, PriceBucketCount, StatisticsReport, category_breakdown,
        combine, price_histogram, summarize,
    },
    sale::{NewSaleRecord, SaleRecord},
    search::SearchTerm,
    stores::SaleStore,
};

/// The raw query parameters for listing sale records.
///
/// All values are kept as text so that malformed input can be reported as
/// [Error::InvalidMonth] or [Error::InvalidPagination] rather than a generic
/// parsing failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// The month to list, 1 to 12. Required.
    pub month: Option<String>,
    /// Text to look for in the title, description or price.
    pub search: Option<String>,
    /// The 1-based page number.
    pub page: Option<String>,
    /// The number of records per page.
    #[serde(alias = "per_page")]
    pub per_page: Option<String>,
}

impl QueryParams {
    /// Query parameters for the first page of `month` without a search term.
    pub fn for_month(month: &str) -> Self {
        Self {
            month: Some(month.to_owned()),
            ..Default::default()
        }
    }
}

/// Queries and reports over a [SaleStore].
///
/// Cheap to clone, every clone shares the same store.
#[derive(Clone)]
pub struct SalesService {
    store: Arc<dyn SaleStore>,
    pagination_config: PaginationConfig,
}

impl fmt::Debug for SalesService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesService")
            .field("pagination_config", &self.pagination_config)
            .finish_non_exhaustive()
    }
}

impl SalesService {
    /// Create a service that reads from `store`.
    pub fn new(store: Arc<dyn SaleStore>, pagination_config: PaginationConfig) -> Self {
        Self {
            store,
            pagination_config,
        }
    }

    /// The pagination defaults applied to requests.
    pub fn pagination_config(&self) -> &PaginationConfig {
        &self.pagination_config
    }

    /// List one page of the records sold in a month that match a search term.
    ///
    /// Records keep their store order.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidMonth] if the month is missing or not 1 to 12,
    /// - [Error::InvalidPagination] if the page or page size is not a positive integer,
    /// - or [Error::StoreUnavailable] if the records could not be read.
    pub fn query(&self, params: &QueryParams) -> Result<Page<SaleRecord>, Error> {
        let month = SaleMonth::parse(params.month.as_deref())?;
        let pagination = Pagination::parse(
            params.page.as_deref(),
            params.per_page.as_deref(),
            &self.pagination_config,
        )?;
        let search = SearchTerm::new(params.search.as_deref());

        tracing::debug!(
            month = month.number(),
            page = pagination.page(),
            per_page = pagination.per_page(),
            "listing sale records"
        );

        let mut records = self.store.scan_month(month)?;
        if !search.is_empty() {
            records.retain(|record| search.matches(record));
        }

        Ok(pagination.apply(records))
    }

    /// Summarize the sold and unsold items of a month.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] for an invalid month, or
    /// [Error::StoreUnavailable] if the records could not be read.
    pub fn statistics(&self, month: Option<&str>) -> Result<StatisticsReport, Error> {
        self.statistics_for_month(SaleMonth::parse(month)?)
    }

    /// Summarize the sold and unsold items of a validated month.
    pub fn statistics_for_month(&self, month: SaleMonth) -> Result<StatisticsReport, Error> {
        Ok(summarize(&self.store.scan_month(month)?))
    }

    /// Count the records of a month in each price bucket.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] for an invalid month, or
    /// [Error::StoreUnavailable] if the records could not be read.
    pub fn histogram(&self, month: Option<&str>) -> Result<[PriceBucketCount; 10], Error> {
        self.histogram_for_month(SaleMonth::parse(month)?)
    }

    /// Count the records of a validated month in each price bucket.
    pub fn histogram_for_month(&self, month: SaleMonth) -> Result<[PriceBucketCount; 10], Error> {
        Ok(price_histogram(&self.store.scan_month(month)?))
    }

    /// Count the records of a month in each category.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] for an invalid month, or
    /// [Error::StoreUnavailable] if the records could not be read.
    pub fn category_breakdown(&self, month: Option<&str>) -> Result<CategoryBreakdown, Error> {
        self.category_breakdown_for_month(SaleMonth::parse(month)?)
    }

    /// Count the records of a validated month in each category.
    pub fn category_breakdown_for_month(
        &self,
        month: SaleMonth,
    ) -> Result<CategoryBreakdown, Error> {
        Ok(category_breakdown(&self.store.scan_month(month)?))
    }

    /// Build every report for a month from a single read of the store.
    ///
    /// The transactions are the first page of the month using the default
    /// page size and no search term.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] for an invalid month, or
    /// [Error::StoreUnavailable] if the records could not be read.
    pub fn combined(&self, month: Option<&str>) -> Result<CombinedReport, Error> {
        self.combined_for_month(SaleMonth::parse(month)?)
    }

    /// Build every report for a validated month.
    pub fn combined_for_month(&self, month: SaleMonth) -> Result<CombinedReport, Error> {
        let records = self.store.scan_month(month)?;

        Ok(combine(records, self.pagination_config.default_pagination()))
    }

    /// Replace every record in the store.
    ///
    /// # Returns
    /// The number of records inserted.
    pub fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<usize, Error> {
        self.store.replace_all(records)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use time::macros::datetime;

    use crate::{
        Error,
        month::SaleMonth,
        pagination::PaginationConfig,
        sale::{NewSaleRecord, SaleRecord},
        stores::{InMemorySaleStore, SaleStore},
        test_utils::{catalog, scenario_records},
    };

    use super::{QueryParams, SalesService};

    fn service_with(records: Vec<NewSaleRecord>) -> SalesService {
        SalesService::new(
            Arc::new(InMemorySaleStore::with_records(records)),
            PaginationConfig::default(),
        )
    }

    fn params(month: &str, search: &str, page: &str, per_page: &str) -> QueryParams {
        QueryParams {
            month: Some(month.to_owned()),
            search: Some(search.to_owned()),
            page: Some(page.to_owned()),
            per_page: Some(per_page.to_owned()),
        }
    }

    #[test]
    fn scenario_statistics() {
        let service = service_with(scenario_records());

        let got = service.statistics(Some("3")).unwrap();

        assert_eq!(got.total_sale_amount, 50.0);
        assert_eq!(got.total_sold_items, 1);
        assert_eq!(got.total_not_sold_items, 1);
    }

    #[test]
    fn scenario_histogram() {
        let service = service_with(scenario_records());

        let got = service.histogram(Some("3")).unwrap();

        assert_eq!(got[0].range, "0-100");
        assert_eq!(got[0].count, 1);
        assert_eq!(got[1].range, "101-200");
        assert_eq!(got[1].count, 1);
        assert!(got[2..].iter().all(|bucket| bucket.count == 0));
    }

    #[test]
    fn scenario_category_breakdown() {
        let service = service_with(scenario_records());

        let got = service.category_breakdown(Some("4")).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got["jewelery"], 1);
    }

    #[test]
    fn histogram_sums_to_month_count_for_every_month() {
        let service = service_with(catalog());

        for month in 1..=12 {
            let month = month.to_string();
            let histogram = service.histogram(Some(&month)).unwrap();
            let all_records = service
                .query(&params(&month, "", "1", "1000"))
                .unwrap()
                .total_items;

            let total: usize = histogram.iter().map(|bucket| bucket.count).sum();
            assert_eq!(total as u64, all_records, "month {month}");
        }
    }

    #[test]
    fn sold_and_unsold_cover_month_for_every_month() {
        let service = service_with(catalog());

        for month in 1..=12 {
            let month = month.to_string();
            let statistics = service.statistics(Some(&month)).unwrap();
            let all_records = service
                .query(&params(&month, "", "1", "1000"))
                .unwrap()
                .total_items;

            assert_eq!(
                (statistics.total_sold_items + statistics.total_not_sold_items) as u64,
                all_records,
                "month {month}"
            );
        }
    }

    #[test]
    fn every_month_spans_both_catalog_years() {
        let service = service_with(catalog());

        for month in 1..=12 {
            let years: HashSet<i32> = service
                .query(&params(&month.to_string(), "", "1", "1000"))
                .unwrap()
                .items
                .iter()
                .map(|record| record.date_of_sale.year())
                .collect();

            assert_eq!(years, HashSet::from([2021, 2022]), "month {month}");
        }
    }

    #[test]
    fn pages_reconstruct_month_without_duplicates() {
        let service = service_with(catalog());
        let everything = service.query(&params("3", "", "1", "1000")).unwrap().items;

        let mut got = Vec::new();
        for page in 1.. {
            let page = service
                .query(&params("3", "", &page.to_string(), "4"))
                .unwrap();
            if page.items.is_empty() {
                break;
            }
            got.extend(page.items);
        }

        let unique_ids: HashSet<_> = got.iter().map(|record| record.id).collect();
        assert_eq!(unique_ids.len(), got.len());
        assert_eq!(got, everything);
        assert!(!got.is_empty());
    }

    #[test]
    fn query_combines_month_and_search() {
        let service = service_with(vec![
            SaleRecord::build("Red Shirt", 20.0, datetime!(2021-03-01 00:00 UTC)),
            SaleRecord::build("Blue Shirt", 20.0, datetime!(2021-04-01 00:00 UTC)),
            SaleRecord::build("Red Hat", 20.0, datetime!(2022-03-01 00:00 UTC)),
        ]);

        let got = service
            .query(&QueryParams {
                month: Some("3".to_owned()),
                search: Some("shirt".to_owned()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(got.items.len(), 1);
        assert_eq!(got.items[0].title, "Red Shirt");
    }

    #[test]
    fn query_search_keeps_surrounding_spaces() {
        let service = service_with(vec![
            SaleRecord::build("Reddish Lamp", 20.0, datetime!(2021-03-01 00:00 UTC)),
            SaleRecord::build("Mug", 20.0, datetime!(2021-03-02 00:00 UTC)),
        ]);

        let titles = |search: &str| -> Vec<String> {
            service
                .query(&params("3", search, "1", "10"))
                .unwrap()
                .items
                .into_iter()
                .map(|record| record.title)
                .collect()
        };

        assert!(titles("Red ").is_empty());
        assert_eq!(titles(" "), vec!["Reddish Lamp"]);
        assert_eq!(titles(""), vec!["Reddish Lamp", "Mug"]);
    }

    #[test]
    fn query_uses_default_pagination() {
        let service = service_with(catalog());

        let got = service.query(&QueryParams::for_month("3")).unwrap();

        assert_eq!(got.page, 1);
        assert_eq!(got.per_page, 10);
        assert!(got.items.len() <= 10);
    }

    #[test]
    fn invalid_months_are_reported() {
        let service = service_with(catalog());

        for month in [Some("0"), Some("13"), Some("abc"), None] {
            let params = QueryParams {
                month: month.map(str::to_owned),
                ..Default::default()
            };

            assert!(matches!(
                service.query(&params),
                Err(Error::InvalidMonth(_))
            ));
            assert!(matches!(
                service.statistics(month),
                Err(Error::InvalidMonth(_))
            ));
            assert!(matches!(
                service.histogram(month),
                Err(Error::InvalidMonth(_))
            ));
            assert!(matches!(
                service.category_breakdown(month),
                Err(Error::InvalidMonth(_))
            ));
            assert!(matches!(
                service.combined(month),
                Err(Error::InvalidMonth(_))
            ));
        }
    }

    #[test]
    fn invalid_pagination_is_reported() {
        let service = service_with(catalog());

        for (page, per_page) in [("0", "10"), ("1", "0"), ("-1", "10"), ("one", "10")] {
            let got = service.query(&params("3", "", page, per_page));
            assert!(
                matches!(got, Err(Error::InvalidPagination(_))),
                "want InvalidPagination for page={page}, perPage={per_page}, got {got:?}"
            );
        }
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let service = service_with(scenario_records());

        let got = service.query(&params("3", "", "99", "10")).unwrap();

        assert!(got.items.is_empty());
        assert_eq!(got.total_items, 2);
    }

    #[test]
    fn empty_store_gives_zero_reports() {
        let service = service_with(Vec::new());

        let statistics = service.statistics(Some("6")).unwrap();
        let histogram = service.histogram(Some("6")).unwrap();

        assert_eq!(statistics.total_sale_amount, 0.0);
        assert_eq!(histogram.len(), 10);
        assert!(service.category_breakdown(Some("6")).unwrap().is_empty());
    }

    #[test]
    fn combined_matches_individual_reports() {
        let service = service_with(catalog());

        for month in 1..=12 {
            let month = month.to_string();
            let combined = service.combined(Some(&month)).unwrap();

            assert_eq!(
                combined.statistics,
                service.statistics(Some(&month)).unwrap()
            );
            assert_eq!(combined.histogram, service.histogram(Some(&month)).unwrap());
            assert_eq!(
                combined.category_breakdown,
                service.category_breakdown(Some(&month)).unwrap()
            );
            assert_eq!(
                combined.transactions,
                service.query(&QueryParams::for_month(&month)).unwrap()
            );
        }
    }

    /// Counts how many times the store is read.
    struct CountingStore {
        inner: InMemorySaleStore,
        reads: AtomicUsize,
    }

    impl SaleStore for CountingStore {
        fn scan(&self) -> Result<Vec<SaleRecord>, Error> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.scan()
        }

        fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<usize, Error> {
            self.inner.replace_all(records)
        }
    }

    #[test]
    fn combined_reads_the_store_once() {
        let store = Arc::new(CountingStore {
            inner: InMemorySaleStore::with_records(catalog()),
            reads: AtomicUsize::new(0),
        });
        let service = SalesService::new(store.clone(), PaginationConfig::default());

        service
            .combined_for_month(SaleMonth::from_number(3).unwrap())
            .unwrap();

        assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    }

    /// A store whose backend is always down.
    struct UnavailableStore;

    impl SaleStore for UnavailableStore {
        fn scan(&self) -> Result<Vec<SaleRecord>, Error> {
            Err(Error::StoreUnavailable("connection refused".to_owned()))
        }

        fn replace_all(&self, _: Vec<NewSaleRecord>) -> Result<usize, Error> {
            Err(Error::StoreUnavailable("connection refused".to_owned()))
        }
    }

    #[test]
    fn store_failures_are_not_swallowed() {
        let service = SalesService::new(Arc::new(UnavailableStore), PaginationConfig::default());

        assert!(matches!(
            service.statistics(Some("3")),
            Err(Error::StoreUnavailable(_))
        ));
        assert!(matches!(
            service.query(&QueryParams::for_month("3")),
            Err(Error::StoreUnavailable(_))
        ));
        assert!(matches!(
            service.combined(Some("3")),
            Err(Error::StoreUnavailable(_))
        ));
    }

    #[test]
    fn invalid_month_is_reported_before_store_is_read() {
        let service = SalesService::new(Arc::new(UnavailableStore), PaginationConfig::default());

        assert!(matches!(
            service.statistics(Some("13")),
            Err(Error::InvalidMonth(_))
        ));
    }
}
