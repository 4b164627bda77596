//! pb-core: error-bounded binary64 arithmetic for robust predicates.
//!
//! Contains:
//! - numeric (unit roundoff + rounding increment)
//! - bounded (`BoundedF64` and its add/sub/mul operations)
//! - sign (certifying a sign from the tracked bound)
//! - error (shared error types)

pub mod bounded;
pub mod error;
pub mod numeric;
pub mod sign;

// Re-exports: nice ergonomics for downstream crates
pub use bounded::BoundedF64;
pub use error::{PbError, PbResult};
pub use numeric::*;
pub use sign::Sign;
