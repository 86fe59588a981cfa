//! The rule-driven tree rewriter: differentiation, integration, limits, and
//! finite sums/products (`spec.md` §2, components C–I).

pub mod definite;
pub mod derivatives;
pub mod fresnel;
pub mod integrals;
pub mod limits;
pub mod sum_product;

use crate::config::EngineConfig;
use crate::core::containers::{Equation, MapEach, Matrix, Vector};
use crate::core::term::Term;
use crate::error::CalcResult;

/// `diff(term, wrt?, n?)` (`spec.md` §4.C). Element-wise on vectors,
/// matrices, and equations; `wrt` defaults to the first free variable,
/// `n` defaults to 1.
pub trait Diff {
    fn differentiate(&self, wrt: Option<&str>, n: Option<u32>) -> Self;
}

impl Diff for Term {
    fn differentiate(&self, wrt: Option<&str>, n: Option<u32>) -> Term {
        let var = match wrt {
            Some(v) => v.to_string(),
            None => match self.first_free_variable() {
                Some(v) => v,
                None => return Term::zero(),
            },
        };
        derivatives::nth_derivative(self, &var, n.unwrap_or(1))
    }
}

impl Diff for Vector<Term> {
    fn differentiate(&self, wrt: Option<&str>, n: Option<u32>) -> Self {
        self.map_each(|t| t.differentiate(wrt, n))
    }
}

impl Diff for Matrix<Term> {
    fn differentiate(&self, wrt: Option<&str>, n: Option<u32>) -> Self {
        self.map_each(|t| t.differentiate(wrt, n))
    }
}

impl Diff for Equation {
    fn differentiate(&self, wrt: Option<&str>, n: Option<u32>) -> Self {
        self.map_each(|t| t.differentiate(wrt, n))
    }
}

/// `integrate(term, dt?)` (`spec.md` §4.D). The outer frame converts a
/// recognized `NoIntegralFound`/`DivisionByZero` into the symbolic
/// `integrate(...)` placeholder; `Timeout` and any other error propagate.
pub fn integrate(term: &Term, dt: Option<&str>, cfg: EngineConfig) -> CalcResult<Term> {
    integrals::integrate_top(term, dt, cfg)
}

/// `defint(f, from, to, dx?)` (`spec.md` §4.E).
pub fn defint(f: &Term, from: &Term, to: &Term, dx: Option<&str>, cfg: EngineConfig) -> CalcResult<Term> {
    definite::defint(f, from, to, dx, cfg)
}

/// `limit(term, x, c)` (`spec.md` §4.F).
pub fn limit(term: &Term, x: &str, c: &Term, cfg: EngineConfig) -> limits::LimitValue {
    limits::limit(term, x, c, cfg, 0)
}

/// `sum(f, index, start, end)` (`spec.md` §4.G).
pub fn sum(f: &Term, index: &str, start: &Term, end: &Term) -> CalcResult<Term> {
    sum_product::sum(f, index, start, end)
}

/// `product(f, index, start, end)` (`spec.md` §4.G). Preserves the source's
/// `end`-bound-extraction defect verbatim (`spec.md` §9) — see
/// `crate::calculus::sum_product`.
pub fn product(f: &Term, index: &str, start: &Term, end: &Term) -> CalcResult<Term> {
    sum_product::product(f, index, start, end)
}

pub use fresnel::{c as fresnel_c, s as fresnel_s};
