//! Error-tracked binary64 scalar.
//!
//! A [`BoundedF64`] pairs a computed value with an upper bound on its
//! absolute distance from the unrounded mathematical result. Every operation
//! returns a new pair; the bound grows by the rounding error of the step that
//! produced the new value (see [`rounding_increment`]) plus the propagated
//! error of the operands.
//!
//! Sums propagate operand bounds additively:
//!
//! `(a + ea) + (b + eb) = a + b + (ea + eb)`
//!
//! Products scale each operand's bound by the other operand's magnitude, so
//! chained multiplications compound:
//!
//! `(a + ea) * (b + eb) = a*b + ea*b + eb*a + ea*eb`
//!
//! The bound therefore depends on the exact sequence of rounded operations.
//! `x.mul_f64(a).mul_f64(b)` and `x.mul_f64(a * b)` describe different
//! machine computations and carry different (both valid) bounds.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{PbError, PbResult};
use crate::numeric::{ensure_finite, rounding_increment};

/// A binary64 value together with a worst-case absolute error bound.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBounded"))]
pub struct BoundedF64 {
    value: f64,
    error_bound: f64,
}

/// Unchecked wire form; deserialization goes through [`TryFrom`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBounded {
    value: f64,
    error_bound: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBounded> for BoundedF64 {
    type Error = PbError;

    fn try_from(raw: RawBounded) -> PbResult<Self> {
        Self::from_parts(raw.value, raw.error_bound)
    }
}

impl BoundedF64 {
    pub const ZERO: Self = Self::new(0.0);
    pub const ONE: Self = Self::new(1.0);

    /// Treat `n` as exact: the error bound starts at zero.
    #[inline]
    pub const fn new(n: f64) -> Self {
        Self {
            value: n,
            error_bound: 0.0,
        }
    }

    /// Like [`BoundedF64::new`], rejecting NaN and infinities.
    pub fn try_new(n: f64) -> PbResult<Self> {
        ensure_finite(n, "bounded input").map(Self::new)
    }

    /// Rebuild a value from stored parts. The value must be finite and the
    /// bound finite and non-negative.
    pub fn from_parts(value: f64, error_bound: f64) -> PbResult<Self> {
        let value = ensure_finite(value, "bounded value")?;
        if !(error_bound.is_finite() && error_bound >= 0.0) {
            return Err(PbError::InvalidBound {
                value,
                bound: error_bound,
            });
        }
        Ok(Self { value, error_bound })
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.value
    }

    #[inline]
    pub fn error_bound(self) -> f64 {
        self.error_bound
    }

    /// `(value, error_bound)`
    #[inline]
    pub fn parts(self) -> (f64, f64) {
        (self.value, self.error_bound)
    }

    /// Both the value and its bound are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.value.is_finite() && self.error_bound.is_finite()
    }

    #[inline]
    pub fn add_f64(self, f: f64) -> Self {
        let value = self.value + f;
        Self {
            value,
            error_bound: self.error_bound + rounding_increment(value),
        }
    }

    #[inline]
    pub fn sub_f64(self, f: f64) -> Self {
        let value = self.value - f;
        Self {
            value,
            error_bound: self.error_bound + rounding_increment(value),
        }
    }

    #[inline]
    pub fn add_bounded(self, rhs: Self) -> Self {
        let value = self.value + rhs.value;
        Self {
            value,
            error_bound: self.error_bound + rhs.error_bound + rounding_increment(value),
        }
    }

    #[inline]
    pub fn sub_bounded(self, rhs: Self) -> Self {
        let value = self.value - rhs.value;
        Self {
            value,
            error_bound: self.error_bound + rhs.error_bound + rounding_increment(value),
        }
    }

    /// Multiply by an exact `f`. The prior bound is scaled by `|f|`.
    ///
    /// The result never carries a smaller bound than `self`, even for
    /// `|f| < 1`.
    #[inline]
    pub fn mul_f64(self, f: f64) -> Self {
        let value = self.value * f;
        let scaled = self.error_bound * f.abs() + rounding_increment(value);
        Self {
            value,
            error_bound: at_least(scaled, self.error_bound),
        }
    }

    /// Multiply two tracked values. Each bound is scaled by the magnitude of
    /// the other operand (taken before the product), plus the second-order
    /// product of the two bounds.
    ///
    /// The result never carries a smaller bound than either operand.
    #[inline]
    pub fn mul_bounded(self, rhs: Self) -> Self {
        let value = self.value * rhs.value;
        let cross = self.error_bound * rhs.value.abs()
            + rhs.error_bound * self.value.abs()
            + self.error_bound * rhs.error_bound;
        let bound = cross + rounding_increment(value);
        Self {
            value,
            error_bound: at_least(at_least(bound, self.error_bound), rhs.error_bound),
        }
    }
}

// Unlike `f64::max`, a NaN `bound` stays NaN.
#[inline]
fn at_least(bound: f64, floor: f64) -> f64 {
    if bound < floor { floor } else { bound }
}

impl From<f64> for BoundedF64 {
    #[inline]
    fn from(n: f64) -> Self {
        Self::new(n)
    }
}

impl fmt::Display for BoundedF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ± {:e}", self.value, self.error_bound)
    }
}

// Negation is exact in binary64.
impl Neg for BoundedF64 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            value: -self.value,
            error_bound: self.error_bound,
        }
    }
}

impl Add for BoundedF64 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add_bounded(rhs)
    }
}

impl Add<f64> for BoundedF64 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: f64) -> Self {
        self.add_f64(rhs)
    }
}

impl Add<BoundedF64> for f64 {
    type Output = BoundedF64;
    #[inline]
    fn add(self, rhs: BoundedF64) -> BoundedF64 {
        rhs.add_f64(self)
    }
}

impl Sub for BoundedF64 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.sub_bounded(rhs)
    }
}

impl Sub<f64> for BoundedF64 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: f64) -> Self {
        self.sub_f64(rhs)
    }
}

impl Sub<BoundedF64> for f64 {
    type Output = BoundedF64;
    #[inline]
    fn sub(self, rhs: BoundedF64) -> BoundedF64 {
        BoundedF64::new(self).sub_bounded(rhs)
    }
}

impl Mul for BoundedF64 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_bounded(rhs)
    }
}

impl Mul<f64> for BoundedF64 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.mul_f64(rhs)
    }
}

impl Mul<BoundedF64> for f64 {
    type Output = BoundedF64;
    #[inline]
    fn mul(self, rhs: BoundedF64) -> BoundedF64 {
        rhs.mul_f64(self)
    }
}
