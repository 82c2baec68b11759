//! Evaluation of many market snapshots for arbitrage.

use bookarb::arb::{self, Arbitrage, Detection};
use bookarb::error::{AllocationError, InvalidBudget};
use bookarb::stake::StakeAllocation;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::client::OddsApiClient;
use crate::config::OddsFormat;
use crate::error::FetchError;
use crate::model::Event;
use crate::snapshot::{self, EventSummary, MarketKey, MarketSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub event: EventSummary,
    pub market: MarketKey,
    pub arbitrage: Arbitrage,
    pub allocation: Option<StakeAllocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    /// Arbitrages found, most profitable first.
    pub opportunities: Vec<Opportunity>,
    pub evaluated: usize,
    pub no_arbitrage: usize,
    pub incomplete: usize,
    pub failed_fetches: usize,
}

impl ScanReport {
    /// A copy with every stake allocation rounded to `decimals` places, for presentation only.
    pub fn rounded(&self, decimals: u32) -> Self {
        let mut rounded = self.clone();
        for opportunity in &mut rounded.opportunities {
            opportunity.allocation = opportunity
                .allocation
                .as_ref()
                .map(|allocation| allocation.rounded(decimals));
        }
        rounded
    }
}

/// Tests each snapshot for arbitrage, sizing stakes for every opportunity found when a budget is
/// given. Snapshots that cannot be evaluated are counted rather than treated as failures.
pub fn evaluate(
    snapshots: impl IntoIterator<Item = MarketSnapshot>,
    budget: Option<f64>,
) -> Result<ScanReport, AllocationError> {
    if let Some(budget) = budget {
        InvalidBudget::check(budget)?;
    }

    let mut report = ScanReport::default();
    for snapshot in snapshots {
        report.evaluated += 1;
        match arb::detect(&snapshot.quote) {
            Ok(Detection::Arbitrage(arbitrage)) => {
                info!(
                    "arbitrage on {} [{}]: Σ={:.4}, profit={:.2}%",
                    snapshot.event, snapshot.market, arbitrage.implied_sum, arbitrage.profit_pct
                );
                let allocation = budget.map(|budget| arbitrage.allocate(budget)).transpose()?;
                report.opportunities.push(Opportunity {
                    event: snapshot.event,
                    market: snapshot.market,
                    arbitrage,
                    allocation,
                });
            }
            Ok(Detection::NoArbitrage { .. }) => report.no_arbitrage += 1,
            Err(err) => {
                debug!("skipping {} [{}]: {err}", snapshot.event, snapshot.market);
                report.incomplete += 1;
            }
        }
    }
    report
        .opportunities
        .sort_by(|a, b| b.arbitrage.profit_pct.total_cmp(&a.arbitrage.profit_pct));
    Ok(report)
}

/// Snapshots of every market of every event in `events`.
pub fn snapshots_of(events: &[Event], odds_format: OddsFormat) -> Vec<MarketSnapshot> {
    events
        .iter()
        .flat_map(|event| snapshot::snapshots(event, odds_format))
        .collect()
}

/// Fetches the given markets of a sport concurrently and evaluates the combined snapshots. A market
/// that cannot be fetched is logged and counted; it does not abort the scan.
pub async fn scan(
    client: &OddsApiClient,
    sport: &str,
    markets: &[String],
    budget: Option<f64>,
) -> Result<ScanReport, AllocationError> {
    if let Some(budget) = budget {
        InvalidBudget::check(budget)?;
    }

    let mut tasks = JoinSet::new();
    for market in markets {
        let client = client.clone();
        let sport = sport.to_owned();
        let market = market.clone();
        tasks.spawn(async move {
            let result = client.odds(&sport, &market).await;
            (market, result)
        });
    }

    let odds_format = client.config().odds_format;
    let mut snapshots = vec![];
    let mut failed_fetches = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.map_err(FetchError::from) {
            Ok((_, Ok(events))) => snapshots.extend(snapshots_of(&events, odds_format)),
            Ok((market, Err(err))) => {
                warn!("could not fetch {sport}/{market}: {err}");
                failed_fetches += 1;
            }
            Err(err) => {
                warn!("could not fetch {sport}: {err}");
                failed_fetches += 1;
            }
        }
    }

    let mut report = evaluate(snapshots, budget)?;
    report.failed_fetches = failed_fetches;
    Ok(report)
}
