use crate::PbError;

/// Unit roundoff of binary64: an upper bound on the relative error of
/// representing a real `x` by its rounded double `y`, `|(x - y) / x| <= 2^-52`.
pub const UNIT_ROUNDOFF: f64 = f64::EPSILON;

/// Smallest positive subnormal binary64 (`4.9406564584124654e-324`).
///
/// Used as the rounding increment when a result rounds to exactly zero, where
/// the relative formula is undefined. A nonzero true result that rounds to
/// zero can be no further from zero than this.
pub const SMALLEST_SUBNORMAL: f64 = f64::from_bits(1);

/// Worst-case absolute rounding error introduced by the operation that
/// produced `v`.
///
/// With `|x - v| <= u|x|` and `x` unknown, the larger sign case gives
/// `|x| <= |v| / (1 - u)`, so the new error is at most `u|v| / (1 - u)`.
#[inline]
pub fn rounding_increment(v: f64) -> f64 {
    if v == 0.0 {
        SMALLEST_SUBNORMAL
    } else {
        UNIT_ROUNDOFF * v.abs() / (1.0 - UNIT_ROUNDOFF)
    }
}

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, PbError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PbError::NonFinite { what, value: v })
    }
}
