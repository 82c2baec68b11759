//! Odds quoted by a set of bookmakers for a single market of a single event.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Mapping from bookmaker name to the decimal odds it offers for each outcome key.
///
/// Books and outcomes are kept in lexicographic order. Any process that walks the quote (notably
/// best-price selection) therefore sees books in a reproducible order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OddsQuote {
    books: BTreeMap<String, BTreeMap<String, f64>>,
}
impl OddsQuote {
    pub fn with_price(mut self, book: impl Into<String>, outcome: impl Into<String>, odds: f64) -> Self {
        self.insert(book, outcome, odds);
        self
    }

    /// Records a price, replacing any previous price from the same book for the same outcome.
    pub fn insert(&mut self, book: impl Into<String>, outcome: impl Into<String>, odds: f64) {
        self.books
            .entry(book.into())
            .or_default()
            .insert(outcome.into(), odds);
    }

    pub fn books(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, f64>)> {
        self.books.iter().map(|(book, prices)| (book.as_str(), prices))
    }

    pub fn book(&self, book: &str) -> Option<&BTreeMap<String, f64>> {
        self.books.get(book)
    }

    /// The union of outcome keys quoted by any book.
    pub fn outcomes(&self) -> BTreeSet<&str> {
        self.books
            .values()
            .flat_map(|prices| prices.keys().map(String::as_str))
            .collect()
    }

    /// Every `(book, odds)` pair quoting the given outcome, in book order.
    pub fn offers<'a>(&'a self, outcome: &'a str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.books
            .iter()
            .filter_map(move |(book, prices)| prices.get(outcome).map(|&odds| (book.as_str(), odds)))
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl<B: Into<String>, O: Into<String>> FromIterator<(B, O, f64)> for OddsQuote {
    fn from_iter<T: IntoIterator<Item = (B, O, f64)>>(iter: T) -> Self {
        let mut quote = OddsQuote::default();
        for (book, outcome, odds) in iter {
            quote.insert(book, outcome, odds);
        }
        quote
    }
}
