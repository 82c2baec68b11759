//! Conversion of API events into per-market odds quotes.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use bookarb::odds;
use bookarb::quote::OddsQuote;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::OddsFormat;
use crate::model::Event;

const SPREADS: &str = "spreads";

/// A handicap or total line, held in hundredths so that it can key a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Line(i64);
impl Line {
    pub fn from_point(point: f64) -> Self {
        Self((point * 100.0).round() as i64)
    }

    pub fn value(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// One evaluable market: a market type and, for handicaps and totals, the line being priced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarketKey {
    pub market: String,
    pub line: Option<Line>,
}

impl Display for MarketKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.line {
            None => write!(f, "{}", self.market),
            Some(line) => write!(f, "{} {}", self.market, line),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub id: String,
    pub sport_key: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            sport_key: event.sport_key.clone(),
            home_team: event.home_team.clone(),
            away_team: event.away_team.clone(),
            commence_time: event.commence_time,
        }
    }
}

impl Display for EventSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.away_team, self.home_team)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub event: EventSummary,
    pub market: MarketKey,
    pub quote: OddsQuote,
}

/// Splits an event into one snapshot per market and line, with books named by their titles.
///
/// Spread lines are oriented to the home side (an away-team point is negated), so that a home
/// −3.5 and an away +3.5 land in the same market. Other points, such as totals, are taken as-is.
pub fn snapshots(event: &Event, odds_format: OddsFormat) -> Vec<MarketSnapshot> {
    let mut quotes: BTreeMap<MarketKey, OddsQuote> = BTreeMap::new();
    for bookmaker in &event.bookmakers {
        for market in &bookmaker.markets {
            for outcome in &market.outcomes {
                // an unconvertible price stays in the quote as NaN, so the outcome is not silently
                // dropped from the market
                let price = to_decimal(outcome.price, odds_format).unwrap_or_else(|err| {
                    debug!("invalid {} {} {} price: {err}", bookmaker.title, market.key, outcome.name);
                    f64::NAN
                });
                let line = outcome.point.map(|point| {
                    if market.key == SPREADS && outcome.name == event.away_team {
                        Line::from_point(-point)
                    } else {
                        Line::from_point(point)
                    }
                });
                let key = MarketKey {
                    market: market.key.clone(),
                    line,
                };
                quotes
                    .entry(key)
                    .or_default()
                    .insert(bookmaker.title.as_str(), outcome.name.as_str(), price);
            }
        }
    }

    let summary = EventSummary::from(event);
    quotes
        .into_iter()
        .map(|(market, quote)| MarketSnapshot {
            event: summary.clone(),
            market,
            quote,
        })
        .collect()
}

fn to_decimal(price: f64, odds_format: OddsFormat) -> Result<f64, bookarb::error::InvalidPrice> {
    match odds_format {
        OddsFormat::Decimal => Ok(price),
        OddsFormat::American => odds::from_american(price),
    }
}

#[cfg(test)]
mod tests {
    use bookarb::arb;
    use bookarb::error::{DetectionError, IncompleteMarket};

    use crate::model::{Bookmaker, Market, Outcome};

    use super::*;

    fn outcome(name: &str, price: f64, point: Option<f64>) -> Outcome {
        Outcome {
            name: name.into(),
            price,
            point,
        }
    }

    fn bookmaker(title: &str, markets: Vec<(&str, Vec<Outcome>)>) -> Bookmaker {
        Bookmaker {
            key: title.to_lowercase(),
            title: title.into(),
            last_update: None,
            markets: markets
                .into_iter()
                .map(|(key, outcomes)| Market {
                    key: key.into(),
                    last_update: None,
                    outcomes,
                })
                .collect(),
        }
    }

    fn event(bookmakers: Vec<Bookmaker>) -> Event {
        Event {
            id: "evt".into(),
            sport_key: "americanfootball_nfl".into(),
            sport_title: "NFL".into(),
            commence_time: "2023-10-11T23:10:00Z".parse().unwrap(),
            home_team: "Texans".into(),
            away_team: "Chiefs".into(),
            bookmakers,
        }
    }

    #[test]
    fn head_to_head() {
        let event = event(vec![
            bookmaker("DraftKings", vec![("h2h", vec![outcome("Texans", 2.6, None), outcome("Chiefs", 1.5, None)])]),
            bookmaker("FanDuel", vec![("h2h", vec![outcome("Texans", 2.7, None), outcome("Chiefs", 1.45, None)])]),
        ]);
        let snapshots = snapshots(&event, OddsFormat::Decimal);
        assert_eq!(1, snapshots.len());
        let snapshot = &snapshots[0];
        assert_eq!("h2h", snapshot.market.to_string());
        assert_eq!("Chiefs @ Texans", snapshot.event.to_string());
        assert_eq!(
            vec![("DraftKings", 2.6), ("FanDuel", 2.7)],
            snapshot.quote.offers("Texans").collect::<Vec<_>>()
        );
    }

    #[test]
    fn spreads_grouped_by_home_line() {
        let event = event(vec![
            bookmaker("A", vec![("spreads", vec![outcome("Texans", 1.91, Some(3.5)), outcome("Chiefs", 1.91, Some(-3.5))])]),
            bookmaker("B", vec![("spreads", vec![outcome("Texans", 2.05, Some(3.5)), outcome("Chiefs", 1.80, Some(-3.5))])]),
            bookmaker("C", vec![("spreads", vec![outcome("Texans", 1.87, Some(2.5)), outcome("Chiefs", 1.95, Some(-2.5))])]),
        ]);
        let snapshots = snapshots(&event, OddsFormat::Decimal);
        assert_eq!(2, snapshots.len());
        assert_eq!("spreads 2.5", snapshots[0].market.to_string());
        assert_eq!(1, snapshots[0].quote.len());
        assert_eq!("spreads 3.5", snapshots[1].market.to_string());
        assert_eq!(2, snapshots[1].quote.len());
        assert_eq!(
            vec![("A", 1.91), ("B", 1.80)],
            snapshots[1].quote.offers("Chiefs").collect::<Vec<_>>()
        );
    }

    #[test]
    fn totals_grouped_by_point() {
        let event = event(vec![bookmaker(
            "A",
            vec![
                ("totals", vec![outcome("Over", 1.9, Some(47.5)), outcome("Under", 1.9, Some(47.5))]),
                ("h2h", vec![outcome("Texans", 2.6, None), outcome("Chiefs", 1.5, None)]),
            ],
        )]);
        let snapshots = snapshots(&event, OddsFormat::Decimal);
        let keys: Vec<_> = snapshots.iter().map(|snapshot| snapshot.market.to_string()).collect();
        assert_eq!(vec!["h2h", "totals 47.5"], keys);
        assert_eq!(Some(Line::from_point(47.5)), snapshots[1].market.line);
    }

    #[test]
    fn american_prices_converted() {
        let event = event(vec![bookmaker(
            "A",
            vec![("h2h", vec![outcome("Texans", 150.0, None), outcome("Chiefs", -200.0, None), outcome("Draw", 20.0, None)])],
        )]);
        let snapshots = snapshots(&event, OddsFormat::American);
        let quote = &snapshots[0].quote;
        assert_eq!(vec![("A", 2.5)], quote.offers("Texans").collect::<Vec<_>>());
        assert_eq!(vec![("A", 1.5)], quote.offers("Chiefs").collect::<Vec<_>>());
        assert!(quote.offers("Draw").all(|(_, price)| price.is_nan()));
        assert_eq!(
            Err(DetectionError::IncompleteMarket(IncompleteMarket { outcome: "Draw".into() })),
            arb::detect(quote)
        );
    }

    #[test]
    fn line() {
        assert_eq!(Line(-350), Line::from_point(-3.5));
        assert_eq!(-3.5, Line::from_point(-3.5).value());
        assert_eq!("47.5", Line::from_point(47.5).to_string());
        assert_eq!("3", Line::from_point(3.0).to_string());
    }
}
