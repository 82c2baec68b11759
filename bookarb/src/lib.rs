//! Arbitrage (surebet) detection over odds quoted by multiple bookmakers for the same market.
//! Selects the best available price for each outcome, tests whether the implied probabilities
//! sum to less than one, and sizes stakes so that the payout is identical whichever outcome wins.

pub mod arb;
pub mod error;
pub mod file;
pub mod money;
pub mod odds;
pub mod price;
pub mod print;
pub mod quote;
pub mod stake;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
