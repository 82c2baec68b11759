//! Errors raised by detection, allocation and odds conversion.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectionError {
    #[error("{0}")]
    IncompleteMarket(#[from] IncompleteMarket),

    #[error("{0}")]
    TooFewOutcomes(#[from] TooFewOutcomes),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no valid quote for outcome '{outcome}'")]
pub struct IncompleteMarket {
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected at least 2 outcomes, got {count}")]
pub struct TooFewOutcomes {
    pub count: usize,
}
impl TooFewOutcomes {
    pub const MIN_OUTCOMES: usize = 2;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("{0}")]
    InvalidBudget(#[from] InvalidBudget),

    #[error("{0}")]
    NoArbitrage(#[from] NoArbitrage),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("budget must be positive and finite, got {budget}")]
pub struct InvalidBudget {
    pub budget: f64,
}
impl InvalidBudget {
    pub fn check(budget: f64) -> Result<(), InvalidBudget> {
        if budget.is_finite() && budget > 0.0 {
            Ok(())
        } else {
            Err(InvalidBudget { budget })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("implied probabilities sum to {implied_sum:.6}; no stake split guarantees a profit")]
pub struct NoArbitrage {
    pub implied_sum: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert {value} from {format} odds")]
pub struct InvalidPrice {
    pub value: f64,
    pub format: &'static str,
}
