//! The integrator (`spec.md` §4.D): a rule dispatcher over term groups with
//! sub-strategies for polynomial, exponential, trigonometric, by-parts,
//! u-substitution, partial-fraction, and named two-factor-product
//! (`products`) patterns. For a two-factor `Prod`, `integrate_product`
//! tries, in order: the same-argument `sin·cos` power rule
//! (`trig::cos_sin_power`), the named Group CB factor-pair closed forms
//! and algebraic reductions (`products`), generic `u`-substitution, then
//! LIATE by-parts as the catch-all.

pub mod by_parts;
pub mod poly;
pub mod products;
pub mod substitution;
pub mod trig;

use crate::config::EngineConfig;
use crate::core::number::Rational;
use crate::core::term::{Exponent, Term};
use crate::error::{CalcError, CalcResult};
use crate::pattern;

/// Outer `integrate` frame (`spec.md` §4.D): catches `NoIntegralFound`/
/// `DivisionByZero` and substitutes the symbolic placeholder; `Timeout`
/// and anything else propagate.
pub fn integrate_top(term: &Term, dt: Option<&str>, cfg: EngineConfig) -> CalcResult<Term> {
    let dx = match dt {
        Some(v) => v.to_string(),
        None => term
            .first_free_variable()
            .unwrap_or_else(|| "x".to_string()),
    };
    match integrate_depth(term, &dx, 0, cfg) {
        Ok(result) => Ok(result),
        Err(e) if e.is_giveup() => Ok(placeholder(term, &dx)),
        Err(e) => Err(e),
    }
}

fn placeholder(term: &Term, dx: &str) -> Term {
    Term::function(
        crate::config::function_names::INTEGRATE,
        vec![term.clone(), Term::symbol(dx)],
    )
}

/// Recursive `integrate(term, dt, depth)` (`spec.md` §4.D steps 1–7).
pub(crate) fn integrate_depth(term: &Term, dx: &str, depth: u32, cfg: EngineConfig) -> CalcResult<Term> {
    if !term.contains(dx, true) {
        return Ok(term.clone().mul(Term::symbol(dx)));
    }
    let depth = depth + 1;
    if depth > cfg.integration_depth {
        return Err(CalcError::stop("integration depth exceeded"));
    }
    let t = term.unwrap_sqrt();
    dispatch(&t, dx, depth, cfg)
}

fn dispatch(t: &Term, dx: &str, depth: u32, cfg: EngineConfig) -> CalcResult<Term> {
    match t {
        Term::Sym { name, power, mult } if name == dx => poly::integrate_power(power, mult.clone(), dx),
        Term::Sym { .. } | Term::Num(_) | Term::Infinity(_) => Ok(t.clone().mul(Term::symbol(dx))),
        Term::Exp { .. } => poly::integrate_exp(t, dx, depth, cfg),
        Term::Sum { terms, power, mult } if power.is_one() => {
            let mut acc = Term::zero();
            for term in terms.values() {
                acc = acc.add(integrate_depth(term, dx, depth, cfg)?);
            }
            Ok(acc.mul(Term::Num(mult.clone())))
        }
        Term::Sum { power, .. } if power.is_integer() && !power.is_negative() => {
            let expanded = t.clone().expand();
            integrate_depth(&expanded, dx, depth, cfg)
        }
        Term::Sum { power, .. } if *power == Rational::new(-1, 1) => {
            poly::integrate_cp_reciprocal(t, dx, depth, cfg)
        }
        Term::Sum { power, .. } if *power == Rational::new(-1, 2) => {
            poly::integrate_cp_neg_half(t, dx)
        }
        Term::Sum { power, .. } if *power == Rational::new(1, 2) => Err(CalcError::stop(
            "sqrt-of-quadratic integration is an acknowledged gap",
        )),
        Term::Sum { .. } => poly::integrate_cp_other(t, dx, depth, cfg),
        Term::Fn { .. } => trig::integrate_fn(t, dx, depth, cfg),
        Term::Poly { .. } => poly::integrate_poly(t, dx),
        Term::Prod { .. } => integrate_product(t, dx, depth, cfg),
    }
}

fn integrate_product(t: &Term, dx: &str, depth: u32, cfg: EngineConfig) -> CalcResult<Term> {
    let free = t.strip_var(dx);
    let dep = t.clone().div(free.clone());
    if !free.equals(&Term::one()) {
        return Ok(free.mul(integrate_depth(&dep, dx, depth, cfg)?));
    }
    let mut factors = t.collect_symbols();
    factors.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));

    if factors.len() == 2 {
        let (a, b) = (&factors[0], &factors[1]);
        if let Some(r) = trig::cos_sin_power(a, b, dx, depth, cfg) {
            return r;
        }
        // Named factor-pair closed forms and algebraic reductions
        // (`spec.md` §4.D Group CB) that neither `try_u_sub` nor
        // `integrate_by_parts` can reach on their own — tried before both
        // generic fallbacks.
        if let Some(r) = products::fn_fn_algebraic(a, b, dx) {
            return r;
        }
        if let Some(r) = products::fn_fn_product_to_sum(a, b, dx, depth, cfg) {
            return r;
        }
        if let Some(r) = products::fn_over_reciprocal(a, b, dx) {
            return r;
        }
        if let Some(r) = products::exp_over_reciprocal(a, b, dx) {
            return r;
        }
        if let Some(r) = products::exp_exp_closed_form(a, b, dx) {
            return r;
        }
        if let Some(r) = products::cp_cp(t, a, b, dx, depth, cfg) {
            return r;
        }
        if let Some(r) = substitution::try_u_sub(a, b, dx, depth, cfg) {
            return r;
        }
        return by_parts::integrate_by_parts(a, b, dx, depth, cfg, &mut Vec::new());
    }
    if factors.len() >= 3 {
        if let Some(Term::Sum { .. }) = factors.first() {
            let expanded = t.clone().expand();
            return integrate_depth(&expanded, dx, depth, cfg);
        }
    }
    if pattern::all_functions(&factors) {
        let transformed: Term = factors
            .iter()
            .map(pattern::fn_transform)
            .fold(Term::one(), |acc, f| acc.mul(f));
        return integrate_depth(&transformed.expand(), dx, depth, cfg);
    }
    let transformed = pattern::trig_transform(&factors)
        .into_iter()
        .fold(Term::one(), |acc, f| acc.mul(f));
    if transformed.text() != t.text() {
        return integrate_depth(&transformed.expand(), dx, depth, cfg);
    }
    Err(CalcError::stop("no product strategy matched"))
}

/// Sort key approximating "descending group, descending power, descending
/// lexicographic" (`spec.md` §4.D Group CB step 2).
fn sort_key(t: &Term) -> (u8, i64, String) {
    let group_rank = match t {
        Term::Sum { .. } => 6,
        Term::Poly { .. } => 5,
        Term::Exp { .. } => 4,
        Term::Fn { .. } => 3,
        Term::Prod { .. } => 2,
        Term::Sym { .. } => 1,
        _ => 0,
    };
    let power = t
        .power()
        .and_then(|p| match p {
            Exponent::Rational(r) => r.to_i64(),
            Exponent::Symbolic(_) => None,
        })
        .unwrap_or(1);
    (group_rank, power, t.text())
}
