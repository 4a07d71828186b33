//! Float to `integer + molecule / denominator` reduction.
//!
//! The fractional part is quantised to thousandths and then reduced by the
//! greatest common divisor. Integer parts truncate toward zero and `%` keeps
//! the sign of the dividend, so a negative value ends up with the sign on the
//! denominator: `reduce(-1.5) == (-1, 1, -2)`.

/// Quantisation step for the fractional part.
const PRECISION: i32 = 1000;

/// Euclid's algorithm. `gcd(a, 0) == a` and `gcd(0, b) == b`.
pub fn gcd(mut a: i32, mut b: i32) -> i32 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Split `value` into `(whole, molecule, denominator)`.
///
/// A zero fractional part yields `(whole, 0, 1)`.
pub fn reduce(value: f64) -> (i32, i32, i32) {
    let whole = value as i32;
    let fractional = value - whole as f64;
    let raw = (fractional * PRECISION as f64) as i32;
    let divisor = gcd(raw, PRECISION);
    (whole, raw / divisor, PRECISION / divisor)
}
