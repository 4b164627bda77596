//! Sign certification for error-tracked values.
//!
//! A sign is certain when `|value| > error_bound`: the true result then lies
//! strictly on the same side of zero as the computed one. Otherwise the
//! caller has to recompute exactly.

use std::fmt;

use tracing::debug;

use crate::bounded::BoundedF64;
use crate::error::{PbError, PbResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Plain sign of `v`, with both zeros mapped to `Zero`.
    pub fn of(v: f64) -> Sign {
        if v > 0.0 {
            Sign::Positive
        } else if v < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sign::Negative => "negative",
            Sign::Zero => "zero",
            Sign::Positive => "positive",
        };
        f.write_str(s)
    }
}

impl BoundedF64 {
    /// `|value| > error_bound`.
    #[inline]
    pub fn is_reliable(self) -> bool {
        self.value().abs() > self.error_bound()
    }

    /// The sign of the true result, if the bound proves it.
    ///
    /// Never returns `Some(Sign::Zero)`: a zero value cannot exceed a
    /// non-negative bound.
    #[inline]
    pub fn certain_sign(self) -> Option<Sign> {
        if self.is_reliable() {
            Some(Sign::of(self.value()))
        } else {
            None
        }
    }

    /// Like [`BoundedF64::certain_sign`], reporting the inconclusive case as
    /// an error.
    pub fn sign(self) -> PbResult<Sign> {
        self.certain_sign().ok_or(PbError::UncertainSign {
            value: self.value(),
            bound: self.error_bound(),
        })
    }

    /// Certified sign, or the result of `exact` when the bound is not tight
    /// enough.
    pub fn sign_or_else<F>(self, exact: F) -> Sign
    where
        F: FnOnce() -> Sign,
    {
        match self.certain_sign() {
            Some(sign) => sign,
            None => {
                debug!(
                    value = self.value(),
                    bound = self.error_bound(),
                    "sign not certified, using exact fallback"
                );
                exact()
            }
        }
    }
}
