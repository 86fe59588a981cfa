//! Symcalc — a symbolic calculus engine: differentiation, indefinite and
//! definite integration, symbolic limits, and finite sums/products over a
//! discriminated algebraic term representation.

pub mod algebra;
pub mod calculus;
pub mod config;
pub mod core;
pub mod error;
pub mod numeric;
pub mod pattern;

pub use config::EngineConfig;
pub use error::{CalcError, CalcResult};

/// Curated re-exports for downstream crates.
pub mod prelude {
    pub use crate::calculus::limits::LimitValue;
    pub use crate::calculus::{defint, integrate, limit, product, sum, Diff};
    pub use crate::config::EngineConfig;
    pub use crate::core::containers::{Equation, MapEach, Matrix, Vector};
    pub use crate::core::number::Rational;
    pub use crate::core::term::{Exponent, Group, Sign, Term};
    pub use crate::error::{CalcError, CalcResult};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn differentiates_a_power() {
        let x = Term::symbol("x");
        let expr = x.pow_rational(&Rational::from_int(2));
        let derivative = expr.differentiate(None, None);
        assert_eq!(derivative.text(), "2*x");
    }
}
