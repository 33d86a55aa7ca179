//! This modules defines the common functionality for paging data.

use serde::Serialize;

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of records to return per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

impl PaginationConfig {
    /// The pagination used when a request does not specify one.
    pub fn default_pagination(&self) -> Pagination {
        Pagination {
            page: self.default_page.max(1),
            per_page: self.default_page_size.max(1),
        }
    }
}

/// A validated, 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    per_page: u64,
}

impl Pagination {
    /// Create a page selection from numbers.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if `page` or `per_page` is less than 1.
    pub fn new(page: i64, per_page: i64) -> Result<Self, Error> {
        if page < 1 {
            return Err(Error::InvalidPagination(format!(
                "page must be at least 1, got {page}"
            )));
        }

        if per_page < 1 {
            return Err(Error::InvalidPagination(format!(
                "perPage must be at least 1, got {per_page}"
            )));
        }

        Ok(Self {
            page: page as u64,
            per_page: per_page as u64,
        })
    }

    /// Parse a page selection from the raw query values a client sent.
    ///
    /// Missing values fall back to the defaults in `config`.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if either value is not an integer or
    /// is less than 1.
    pub fn parse(
        page: Option<&str>,
        per_page: Option<&str>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let defaults = config.default_pagination();

        let page = match page.map(str::trim) {
            Some(raw) => parse_integer("page", raw)?,
            None => defaults.page as i64,
        };

        let per_page = match per_page.map(str::trim) {
            Some(raw) => parse_integer("perPage", raw)?,
            None => defaults.per_page as i64,
        };

        Self::new(page, per_page)
    }

    /// The 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of items on a page.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Take the selected page out of `items`, keeping their order.
    ///
    /// A page past the end of `items` is empty.
    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        let total_items = items.len() as u64;
        let offset = (self.page - 1).saturating_mul(self.per_page);

        let page_items = items
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(self.per_page).unwrap_or(usize::MAX))
            .collect();

        Page {
            items: page_items,
            page: self.page,
            per_page: self.per_page,
            total_items,
            total_pages: total_items.div_ceil(self.per_page),
        }
    }
}

fn parse_integer(name: &str, raw: &str) -> Result<i64, Error> {
    raw.parse::<i64>()
        .map_err(|_| Error::InvalidPagination(format!("{name} must be an integer, got \"{raw}\"")))
}

/// One page of an ordered result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The 1-based page number.
    pub page: u64,
    /// The maximum number of items on a page.
    pub per_page: u64,
    /// The number of items across all pages.
    pub total_items: u64,
    /// The number of non-empty pages.
    pub total_pages: u64,
}
