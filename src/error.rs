//! Error taxonomy for the Cuckoo Search engine.
//!
//! Three families are distinguished:
//!
//! - **Configuration** errors are raised by `validate()`, by
//!   [`CuckooSearch::initialize`](crate::cuckoo::CuckooSearch::initialize)
//!   and by the `FromStr` parsers. The engine never proceeds with a
//!   degenerate population or an empty box.
//! - **Numeric domain** errors are raised when a walk generator is invoked
//!   with a parameter outside its domain, instead of producing NaN/Infinity.
//! - **Protocol** errors report calls made out of order.
//!
//! Objective evaluation failures are not represented here:
//! a NaN fitness propagates through comparisons and simply never wins.

use thiserror::Error;

/// Errors reported by the Cuckoo Search engine.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CuckooError {
    /// `host_count` was zero.
    #[error("host_count must be at least 1")]
    EmptyHosts,

    /// `cuckoo_count` was zero.
    #[error("cuckoo_count must be at least 1")]
    EmptyCuckoos,

    /// The objective function declares zero dimensions.
    #[error("dimensions must be at least 1")]
    ZeroDimensions,

    /// The box bounds are empty, inverted, not finite or too wide to sample.
    #[error("lower bound {lower} must be finite and less than upper bound {upper}")]
    InvalidBounds { lower: f64, upper: f64 },

    /// A tuning range is empty or not strictly positive.
    #[error("{name} range must satisfy 0 < min <= max, got [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    /// A walk variant name could not be parsed.
    #[error("unsupported walk variant '{0}' (expected 'levy' or 'mantegna')")]
    UnsupportedWalk(String),

    /// A benchmark name could not be parsed.
    #[error("unknown benchmark function '{0}'")]
    UnknownBenchmark(String),

    /// The Lévy exponent is zero or not finite.
    #[error("levy lambda must be non-zero and finite, got {0}")]
    InvalidLambda(f64),

    /// The Mantegna stability index lies outside `(0, 2]`.
    #[error("mantegna alpha must lie in (0, 2], got {0}")]
    InvalidAlpha(f64),

    /// `iteration` was called before `initialize`.
    #[error("optimizer must be initialized before iterating")]
    NotInitialized,

    /// The objective function does not match the population's dimensionality.
    #[error("objective has {actual} dimensions but the population was built for {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}
