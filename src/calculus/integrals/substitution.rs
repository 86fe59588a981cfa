//! `u`-substitution for a two-factor product (`spec.md` §4.D Group CB, the
//! `U` branch): one factor supplies an "inner" sub-expression; the other
//! factor must reduce, once divided by that inner's derivative, to a
//! quantity free of the integration variable.

use crate::config::EngineConfig;
use crate::core::term::Term;
use crate::error::CalcResult;

use super::integrate_depth;

/// The natural nested sub-expression a factor is "a function of":
/// `f(g(x))`'s `g`, or `base^g(x)` / `g(x)^k`'s `g`.
fn extract_inner(t: &Term, dx: &str) -> Option<Term> {
    match t {
        Term::Fn { args, .. } => args.first().cloned().filter(|a| a.contains(dx, true)),
        Term::Exp { base, exponent, .. } => {
            if exponent.contains(dx, true) {
                Some((**exponent).clone())
            } else if base.contains(dx, true) {
                Some((**base).clone())
            } else {
                None
            }
        }
        Term::Sum { power, .. } if !power.is_one() => Some(Term::Sum {
            terms: match t {
                Term::Sum { terms, .. } => terms.clone(),
                _ => unreachable!(),
            },
            power: crate::core::number::Rational::one(),
            mult: crate::core::number::Rational::one(),
        }),
        _ => None,
    }
}

fn try_direction(outer: &Term, candidate: &Term, dx: &str, depth: u32, cfg: EngineConfig) -> Option<CalcResult<Term>> {
    let inner = extract_inner(candidate, dx)?;
    let inner_deriv = crate::calculus::derivatives::nth_derivative(&inner, dx, 1);
    if inner_deriv.equals(&Term::zero()) {
        return None;
    }
    let quotient = outer.clone().div(inner_deriv);
    if quotient.contains(dx, true) {
        return None;
    }
    let u = Term::symbol("u");
    let in_terms_of_u = candidate.sub(&inner, &u);
    if in_terms_of_u.contains(dx, true) {
        return None;
    }
    let integrated = match integrate_depth(&in_terms_of_u, "u", depth, cfg) {
        Ok(r) => r,
        Err(e) => return Some(Err(e)),
    };
    Some(Ok(integrated.sub(&u, &inner).mul(quotient)))
}

/// Tries `candidate = b` with `outer = a`, then the reverse. `None` means
/// neither factor exposes a substitutable inner expression — the caller
/// falls back to integration by parts.
pub fn try_u_sub(a: &Term, b: &Term, dx: &str, depth: u32, cfg: EngineConfig) -> Option<CalcResult<Term>> {
    try_direction(a, b, dx, depth, cfg).or_else(|| try_direction(b, a, dx, depth, cfg))
}
