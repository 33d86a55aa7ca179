//! Case-insensitive text search over sale records.

use crate::sale::SaleRecord;

/// A literal search term matched against a record's title, description and
/// price.
///
/// The term is plain text: characters such as `(`, `*` or `\` have no special
/// meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    /// The lower-cased needle, `None` matches every record.
    needle: Option<String>,
}

impl SearchTerm {
    /// Create a search term from the raw text a client sent.
    ///
    /// Missing or empty text matches every record. Whitespace is part of the
    /// term, so `"red "` does not match "Reddish".
    pub fn new(raw: Option<&str>) -> Self {
        let needle = raw
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);

        Self { needle }
    }

    /// Whether this term matches every record.
    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    /// Check if `record` contains the term, ignoring case.
    ///
    /// # Returns
    /// `true` if the term occurs in the title, the description, or the
    /// decimal rendering of the price (e.g. "329.85"), `false` otherwise.
    pub fn matches(&self, record: &SaleRecord) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        contains_ignore_case(&record.title, needle)
            || contains_ignore_case(&record.description, needle)
            || format_price(record.price).contains(needle.as_str())
    }
}

#[inline]
fn contains_ignore_case(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

/// Render a price the way it is shown to users: the shortest decimal string
/// that round-trips, without a trailing ".0" for whole numbers.
fn format_price(price: f64) -> String {
    price.to_string()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::sale::SaleRecord;

    use super::{SearchTerm, format_price};

    fn record(title: &str, description: &str, price: f64) -> SaleRecord {
        SaleRecord::build(title, price, datetime!(2021-03-01 00:00 UTC))
            .description(description)
            .with_id(1)
    }

    #[test]
    fn empty_term_matches_everything() {
        let record = record("Backpack", "A bag", 109.95);

        assert!(SearchTerm::new(None).matches(&record));
        assert!(SearchTerm::new(Some("")).matches(&record));
        assert!(SearchTerm::new(None).is_empty());
        assert!(SearchTerm::new(Some("")).is_empty());
    }

    #[test]
    fn whitespace_is_part_of_the_term() {
        let reddish = record("Reddish Lamp", "", 10.0);
        let mug = record("Mug", "", 50.0);

        assert!(!SearchTerm::new(Some(" ")).is_empty());
        assert!(!SearchTerm::new(Some(" ")).matches(&mug));
        assert!(!SearchTerm::new(Some("Red ")).matches(&reddish));
        assert!(!SearchTerm::new(Some(" lamp ")).matches(&reddish));
        assert!(SearchTerm::new(Some("Red")).matches(&reddish));
        assert!(SearchTerm::new(Some("dish lamp")).matches(&reddish));
        assert!(SearchTerm::new(Some(" lamp")).matches(&reddish));
    }

    #[test]
    fn matches_title_ignoring_case() {
        let record = record("Fjallraven Backpack", "", 109.95);

        assert!(SearchTerm::new(Some("BACKPACK")).matches(&record));
        assert!(SearchTerm::new(Some("fjall")).matches(&record));
        assert!(!SearchTerm::new(Some("jacket")).matches(&record));
    }

    #[test]
    fn matches_description() {
        let record = record("Backpack", "Your perfect pack for everyday use", 109.95);

        assert!(SearchTerm::new(Some("Everyday")).matches(&record));
    }

    #[test]
    fn matches_price_text() {
        let record = record("Backpack", "", 329.85);

        assert!(SearchTerm::new(Some("329.85")).matches(&record));
        assert!(SearchTerm::new(Some("29.8")).matches(&record));
        assert!(!SearchTerm::new(Some("330")).matches(&record));
    }

    #[test]
    fn whole_prices_have_no_decimal_point() {
        assert_eq!(format_price(50.0), "50");
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(329.85), "329.85");
        assert!(SearchTerm::new(Some("50")).matches(&record("Mug", "", 50.0)));
        assert!(!SearchTerm::new(Some("50.0")).matches(&record("Mug", "", 50.0)));
    }

    #[test]
    fn pattern_characters_are_literal() {
        let plain = record("Backpack", "", 10.0);
        let bracketed = record("Cable [USB-C] (2m)*", "", 10.0);

        for term in ["(", "[", "*", "\\", "a+", ".*", "[USB-C]", "(2m)*"] {
            let search = SearchTerm::new(Some(term));
            assert!(!search.matches(&plain), "{term:?} should not match");
        }

        assert!(SearchTerm::new(Some("[usb-c]")).matches(&bracketed));
        assert!(SearchTerm::new(Some("(2m)*")).matches(&bracketed));
    }
}
