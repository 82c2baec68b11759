use assert_float_eq::*;
use bookarb_testing::{assert_all_f64_absolute, assert_slice_f64_relative, THREE_WAY_NO_ARB, TWO_WAY_ARB};
use tinyrand::{Rand, StdRand};

use super::*;
use crate::arb;
use crate::money::CURRENCY_DECIMALS;
use crate::price::{self, BestPrice};
use crate::quote::OddsQuote;

fn best_prices(prices: &[(&str, &str, f64)]) -> BestPrices {
    prices
        .iter()
        .map(|&(outcome, book, odds)| {
            (
                outcome.to_owned(),
                BestPrice {
                    book: book.to_owned(),
                    odds,
                },
            )
        })
        .collect()
}

#[test]
fn two_way() {
    let best = price::select(&OddsQuote::from_iter(TWO_WAY_ARB)).unwrap();
    let allocation = allocate(&best, 100.0).unwrap();
    let stakes: Vec<_> = allocation.stakes.values().map(|stake| stake.amount).collect();
    assert_slice_f64_relative(&[51.2195, 48.7805], &stakes, 0.0001);
    assert_float_absolute_eq!(102.439, allocation.payout, 0.001);
    assert_float_absolute_eq!(2.439, allocation.profit, 0.001);
    assert_float_absolute_eq!(2.439, allocation.profit_pct, 0.001);
    assert_float_absolute_eq!(0.97619, allocation.implied_sum, 0.00001);
    assert_eq!("Y", allocation.stakes["playerA"].book);
    assert_eq!("Z", allocation.stakes["playerB"].book);

    let rounded = allocation.rounded(CURRENCY_DECIMALS);
    assert_eq!(51.22, rounded.stakes["playerA"].amount);
    assert_eq!(48.78, rounded.stakes["playerB"].amount);
    assert_eq!(102.44, rounded.payout);
    assert_eq!(2.44, rounded.profit);
    assert_eq!(100.0, rounded.budget);
    assert_eq!(allocation.profit_pct, rounded.profit_pct);
}

#[test]
fn payout_is_identical_for_every_outcome() {
    let best = best_prices(&[
        ("home", "a", 2.9),
        ("draw", "b", 3.9),
        ("away", "c", 3.6),
    ]);
    let allocation = allocate(&best, 250.0).unwrap();
    let payouts: Vec<_> = allocation.stakes.values().map(Stake::payout).collect();
    assert_all_f64_absolute(allocation.payout, &payouts, 1e-9);
    assert_float_absolute_eq!(250.0, allocation.total_staked(), 1e-9);
    assert_float_absolute_eq!(250.0 / best.implied_sum(), allocation.payout, 1e-9);
}

#[test]
fn invariants_hold_for_random_arbitrages() {
    let mut rand = StdRand::default();
    let mut checked = 0;
    while checked < 200 {
        let outcomes = 2 + (rand.next_u64() % 3) as usize;
        let mut quote = OddsQuote::default();
        for book in ["a", "b", "c", "d"] {
            for outcome in 0..outcomes {
                let odds = outcomes as f64 * (0.8 + 0.5 * rand.next_u64() as f64 / u64::MAX as f64);
                quote.insert(book, format!("outcome-{outcome}"), odds);
            }
        }
        let Some(arbitrage) = arb::detect(&quote).unwrap().into_arbitrage() else {
            continue;
        };
        let budget = 10.0 + (rand.next_u64() % 10_000) as f64;
        let allocation = arbitrage.allocate(budget).unwrap();

        let payouts: Vec<_> = allocation.stakes.values().map(Stake::payout).collect();
        assert_all_f64_absolute(allocation.payout, &payouts, 1e-6);
        assert_float_absolute_eq!(budget, allocation.total_staked(), 1e-6);
        assert!(allocation.profit > 0.0);

        let rounded = allocation.rounded(CURRENCY_DECIMALS);
        let tolerance = outcomes as f64 * 0.005 + 1e-9;
        assert_float_absolute_eq!(budget, rounded.total_staked(), tolerance);
        checked += 1;
    }
}

#[test]
fn refuses_without_arbitrage() {
    let best = price::select(&OddsQuote::from_iter(THREE_WAY_NO_ARB)).unwrap();
    let err = allocate(&best, 100.0).unwrap_err();
    match err {
        AllocationError::NoArbitrage(NoArbitrage { implied_sum }) => {
            assert_float_absolute_eq!(1.00342, implied_sum, 0.00001)
        }
        other => panic!("unexpected {other:?}"),
    }

    let even = best_prices(&[("heads", "a", 2.0), ("tails", "b", 2.0)]);
    assert_eq!(
        Err(AllocationError::NoArbitrage(NoArbitrage { implied_sum: 1.0 })),
        allocate(&even, 100.0)
    );
}

#[test]
fn refuses_non_finite_sum() {
    let best = best_prices(&[("heads", "a", 0.0), ("tails", "b", 2.0)]);
    assert!(matches!(
        allocate(&best, 100.0),
        Err(AllocationError::NoArbitrage(_))
    ));
}

#[test]
fn refuses_invalid_budget() {
    let best = price::select(&OddsQuote::from_iter(TWO_WAY_ARB)).unwrap();
    for budget in [0.0, -10.0, f64::INFINITY] {
        assert_eq!(
            Err(AllocationError::InvalidBudget(InvalidBudget { budget })),
            allocate(&best, budget)
        );
    }
    assert!(matches!(
        allocate(&best, f64::NAN),
        Err(AllocationError::InvalidBudget(_))
    ));
}
