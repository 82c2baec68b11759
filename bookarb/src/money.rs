//! Rounding of monetary amounts for presentation.

/// Decimal places used when presenting currency amounts.
pub const CURRENCY_DECIMALS: u32 = 2;

/// Rounds half away from zero to the given number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
