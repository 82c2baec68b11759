//! Arbitrage detection: best prices whose implied probabilities sum to less than one.

use serde::Serialize;
use tracing::debug;

use crate::error::{AllocationError, DetectionError};
use crate::price::{self, BestPrices};
use crate::quote::OddsQuote;
use crate::stake::{self, StakeAllocation};

/// A confirmed arbitrage. Only constructed when the implied sum is finite and below one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arbitrage {
    pub best_prices: BestPrices,
    pub implied_sum: f64,
    /// Guaranteed return over the total outlay, as `(1 − S) × 100`.
    pub profit_pct: f64,
}
impl Arbitrage {
    pub fn allocate(&self, budget: f64) -> Result<StakeAllocation, AllocationError> {
        stake::allocate(&self.best_prices, budget)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Detection {
    Arbitrage(Arbitrage),
    NoArbitrage {
        best_prices: BestPrices,
        implied_sum: f64,
    },
}
impl Detection {
    pub fn arbitrage(&self) -> Option<&Arbitrage> {
        match self {
            Detection::Arbitrage(arbitrage) => Some(arbitrage),
            Detection::NoArbitrage { .. } => None,
        }
    }

    pub fn into_arbitrage(self) -> Option<Arbitrage> {
        match self {
            Detection::Arbitrage(arbitrage) => Some(arbitrage),
            Detection::NoArbitrage { .. } => None,
        }
    }

    pub fn best_prices(&self) -> &BestPrices {
        match self {
            Detection::Arbitrage(arbitrage) => &arbitrage.best_prices,
            Detection::NoArbitrage { best_prices, .. } => best_prices,
        }
    }

    pub fn implied_sum(&self) -> f64 {
        match self {
            Detection::Arbitrage(arbitrage) => arbitrage.implied_sum,
            Detection::NoArbitrage { implied_sum, .. } => *implied_sum,
        }
    }
}

/// Tests a best-price set for arbitrage.
pub fn assess(best_prices: BestPrices) -> Detection {
    let implied_sum = best_prices.implied_sum();
    if implied_sum.is_finite() && implied_sum < 1.0 {
        let profit_pct = (1.0 - implied_sum) * 100.0;
        debug!("arbitrage over {} outcomes: Σ={implied_sum:.6}, profit={profit_pct:.3}%", best_prices.len());
        Detection::Arbitrage(Arbitrage {
            best_prices,
            implied_sum,
            profit_pct,
        })
    } else {
        debug!("no arbitrage over {} outcomes: Σ={implied_sum:.6}", best_prices.len());
        Detection::NoArbitrage {
            best_prices,
            implied_sum,
        }
    }
}

/// Selects the best prices from `quote` and tests them for arbitrage.
pub fn detect(quote: &OddsQuote) -> Result<Detection, DetectionError> {
    let best_prices = price::select(quote)?;
    Ok(assess(best_prices))
}
