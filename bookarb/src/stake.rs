//! Proportional stake sizing across the outcomes of an arbitrage.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{AllocationError, InvalidBudget, NoArbitrage};
use crate::money::round_to;
use crate::price::BestPrices;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stake {
    pub book: String,
    pub odds: f64,
    pub amount: f64,
}
impl Stake {
    /// Gross return if this outcome wins.
    pub fn payout(&self) -> f64 {
        self.amount * self.odds
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakeAllocation {
    pub stakes: BTreeMap<String, Stake>,
    pub budget: f64,
    pub payout: f64,
    pub profit: f64,
    pub profit_pct: f64,
    pub implied_sum: f64,
}
impl StakeAllocation {
    pub fn total_staked(&self) -> f64 {
        self.stakes.values().map(|stake| stake.amount).sum()
    }

    /// A copy with monetary amounts rounded to `decimals` places, for presentation only. The odds,
    /// the profit percentage and the implied sum are kept at full precision.
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            stakes: self
                .stakes
                .iter()
                .map(|(outcome, stake)| {
                    (
                        outcome.clone(),
                        Stake {
                            amount: round_to(stake.amount, decimals),
                            ..stake.clone()
                        },
                    )
                })
                .collect(),
            budget: round_to(self.budget, decimals),
            payout: round_to(self.payout, decimals),
            profit: round_to(self.profit, decimals),
            profit_pct: self.profit_pct,
            implied_sum: self.implied_sum,
        }
    }
}

/// Splits `budget` across the outcomes in proportion to their implied probabilities, so that the
/// payout is `budget / S` whichever outcome occurs. Refuses when `S ≥ 1`, as no split can then
/// guarantee a profit.
pub fn allocate(best_prices: &BestPrices, budget: f64) -> Result<StakeAllocation, AllocationError> {
    InvalidBudget::check(budget)?;
    let implied_sum = best_prices.implied_sum();
    if !implied_sum.is_finite() || implied_sum >= 1.0 {
        return Err(NoArbitrage { implied_sum }.into());
    }

    let stakes = best_prices
        .iter()
        .map(|(outcome, price)| {
            let amount = budget * price.implied_probability() / implied_sum;
            (
                outcome.to_owned(),
                Stake {
                    book: price.book.clone(),
                    odds: price.odds,
                    amount,
                },
            )
        })
        .collect();
    let payout = budget / implied_sum;
    let profit = payout - budget;
    let profit_pct = profit / budget * 100.0;
    debug!("allocated {budget} across {} outcomes: payout={payout:.4}, profit={profit:.4}", best_prices.len());

    Ok(StakeAllocation {
        stakes,
        budget,
        payout,
        profit,
        profit_pct,
        implied_sum,
    })
}

#[cfg(test)]
mod tests;
