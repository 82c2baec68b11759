//! Testing helpers.

use assert_float_eq::*;

/// A single `(book, outcome, decimal odds)` price.
pub type Price = (&'static str, &'static str, f64);

/// Three books quoting a home/draw/away market with no arbitrage (Σ ≈ 1.0034).
pub const THREE_WAY_NO_ARB: [Price; 9] = [
    ("A", "home", 2.10),
    ("B", "home", 2.20),
    ("C", "home", 2.05),
    ("A", "draw", 3.40),
    ("B", "draw", 3.10),
    ("C", "draw", 3.50),
    ("A", "away", 3.60),
    ("B", "away", 3.40),
    ("C", "away", 3.80),
];

/// Three books quoting a two-way market with an arbitrage across Y and Z (Σ ≈ 0.9762).
pub const TWO_WAY_ARB: [Price; 6] = [
    ("X", "playerA", 1.95),
    ("X", "playerB", 2.05),
    ("Y", "playerA", 2.00),
    ("Y", "playerB", 2.00),
    ("Z", "playerA", 1.92),
    ("Z", "playerB", 2.10),
];

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that every element of `actual` is within `tolerance` of `expected`.
pub fn assert_all_f64_absolute(expected: f64, actual: &[f64], tolerance: f64) {
    for (index, &actual) in actual.iter().enumerate() {
        assert!(
            (expected - actual).abs() <= tolerance,
            "element {index}: expected {expected} ± {tolerance}, got {actual}"
        );
    }
}
