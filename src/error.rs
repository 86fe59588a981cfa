//! Error types for the calculus engine.
//!
//! Mirrors `spec.md` §7: most of these are local termination tokens caught by
//! a single outer frame, not surfaced to the caller. `Timeout` is the one
//! variant that must never be intercepted — every `?` propagates it verbatim.

use std::fmt;

/// Error produced by a calculus strategy.
///
/// `NoIntegralFound` and `DivisionByZero` are equivalent from the caller's
/// perspective (both mean "this strategy cannot proceed") and are caught only
/// by the outermost `integrate` frame, which converts them into the symbolic
/// `integrate(...)` placeholder. `IndexMustBeSymbol` and `Other` surface to
/// the caller. `Timeout` is re-raised unchanged by every layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// A strategy recognized it cannot produce a closed form.
    NoIntegralFound(String),
    /// An arithmetic trial reported a zero divisor.
    DivisionByZero,
    /// `sum`/`product` was given a non-symbol index.
    IndexMustBeSymbol,
    /// Cooperative external cancellation; never converted to another kind.
    Timeout,
    /// Any other unexpected failure.
    Other(String),
}

impl CalcError {
    /// Build a `NoIntegralFound` carrying a short diagnostic reason.
    ///
    /// This is the Rust equivalent of the source's `stop(msg)` helper: a
    /// strategy calls this to signal "cannot proceed" and bail via `?`.
    pub fn stop(msg: impl Into<String>) -> Self {
        CalcError::NoIntegralFound(msg.into())
    }

    /// True for the two kinds the outer integrator treats identically.
    pub fn is_giveup(&self) -> bool {
        matches!(self, CalcError::NoIntegralFound(_) | CalcError::DivisionByZero)
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::NoIntegralFound(reason) => write!(f, "no integral found: {reason}"),
            CalcError::DivisionByZero => write!(f, "division by zero"),
            CalcError::IndexMustBeSymbol => write!(f, "sum/product index must be a symbol"),
            CalcError::Timeout => write!(f, "computation timed out"),
            CalcError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CalcError {}

/// Result alias used throughout the engine.
pub type CalcResult<T> = Result<T, CalcError>;
