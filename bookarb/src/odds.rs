//! Decimal odds, implied probabilities and conversion from American prices.

use crate::error::InvalidPrice;

/// Whether a decimal price is usable. Prices at or below 1.0 return no more than the stake and
/// represent a degenerate or suspended quote.
pub fn is_valid(decimal: f64) -> bool {
    decimal.is_finite() && decimal > 1.0
}

/// The probability implied by a decimal price. A zero, negative or NaN price maps to infinity, so
/// that any booksum it contributes to can never pass for an arbitrage.
pub fn implied_probability(decimal: f64) -> f64 {
    if decimal > 0.0 {
        1.0 / decimal
    } else {
        f64::INFINITY
    }
}

/// Converts an American (moneyline) price to decimal odds.
pub fn from_american(moneyline: f64) -> Result<f64, InvalidPrice> {
    if !moneyline.is_finite() || moneyline.abs() < 100.0 {
        return Err(InvalidPrice {
            value: moneyline,
            format: "american",
        });
    }
    if moneyline > 0.0 {
        Ok(moneyline / 100.0 + 1.0)
    } else {
        Ok(100.0 / moneyline.abs() + 1.0)
    }
}
