//! Selection of the best available price for each outcome of a market.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use crate::error::{DetectionError, IncompleteMarket, TooFewOutcomes};
use crate::odds;
use crate::quote::OddsQuote;

/// The highest decimal odds offered for an outcome and the book offering them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestPrice {
    pub book: String,
    pub odds: f64,
}
impl BestPrice {
    pub fn implied_probability(&self) -> f64 {
        odds::implied_probability(self.odds)
    }
}

/// Best price for every outcome of a market, keyed by outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BestPrices {
    prices: BTreeMap<String, BestPrice>,
}
impl BestPrices {
    pub fn get(&self, outcome: &str) -> Option<&BestPrice> {
        self.prices.get(outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BestPrice)> {
        self.prices
            .iter()
            .map(|(outcome, price)| (outcome.as_str(), price))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// The booksum: Σ 1/odds across all outcomes.
    pub fn implied_sum(&self) -> f64 {
        self.prices.values().map(BestPrice::implied_probability).sum()
    }
}

impl FromIterator<(String, BestPrice)> for BestPrices {
    fn from_iter<T: IntoIterator<Item = (String, BestPrice)>>(iter: T) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

/// Selects the maximum valid price for every outcome quoted by any book.
///
/// Books are visited in lexicographic order and a later book must strictly beat the running best,
/// so exact ties go to the lexicographically smallest book name. Prices failing
/// [`odds::is_valid`] are ignored; an outcome left with no valid price fails the whole selection,
/// as a market with a missing outcome cannot be tested for arbitrage.
pub fn select(quote: &OddsQuote) -> Result<BestPrices, DetectionError> {
    let outcomes = quote.outcomes();
    if outcomes.len() < TooFewOutcomes::MIN_OUTCOMES {
        return Err(TooFewOutcomes {
            count: outcomes.len(),
        }
        .into());
    }

    let mut prices = BTreeMap::new();
    for outcome in outcomes {
        let mut best: Option<BestPrice> = None;
        for (book, odds) in quote.offers(outcome) {
            if !odds::is_valid(odds) {
                trace!("ignoring {book} price {odds} for {outcome}");
                continue;
            }
            match &best {
                Some(current) if current.odds >= odds => {}
                _ => {
                    best = Some(BestPrice {
                        book: book.to_owned(),
                        odds,
                    })
                }
            }
        }

        let best = best.ok_or_else(|| IncompleteMarket {
            outcome: outcome.to_owned(),
        })?;
        trace!("best price for {outcome}: {} @ {}", best.book, best.odds);
        prices.insert(outcome.to_owned(), best);
    }
    Ok(BestPrices { prices })
}
