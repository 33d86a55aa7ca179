//! Selects sale records by calendar month, ignoring the year.

use time::Month;

use crate::{Error, sale::SaleRecord};

/// A validated calendar month used to filter sale records.
///
/// A record matches if it was sold in this month of *any* year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleMonth(Month);

impl SaleMonth {
    /// Parse a month selector sent by a client.
    ///
    /// Accepts an integer from 1 to 12, optionally zero-padded (e.g. "03").
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `raw` is missing, empty, not an
    /// integer, or outside 1 to 12.
    pub fn parse(raw: Option<&str>) -> Result<Self, Error> {
        let raw = raw.map(str::trim).unwrap_or_default();

        let number = raw
            .parse::<u8>()
            .map_err(|_| Error::InvalidMonth(raw.to_owned()))?;

        Self::from_number(number).ok_or_else(|| Error::InvalidMonth(raw.to_owned()))
    }

    /// Create a month from its number, 1 for January through 12 for December.
    pub fn from_number(number: u8) -> Option<Self> {
        Month::try_from(number).ok().map(Self)
    }

    /// The month number, 1 for January through 12 for December.
    pub fn number(self) -> u8 {
        self.0 as u8
    }

    /// The underlying [Month].
    pub fn month(self) -> Month {
        self.0
    }

    /// Whether `record` was sold in this month, in any year.
    pub fn matches(self, record: &SaleRecord) -> bool {
        record.date_of_sale.month() == self.0
    }
}

impl From<Month> for SaleMonth {
    fn from(month: Month) -> Self {
        Self(month)
    }
}
