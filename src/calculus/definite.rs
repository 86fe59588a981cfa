//! `defint(f, from, to, dx?)` (`spec.md` §4.E): antiderivative-and-evaluate
//! first, numeric quadrature fallback, symbolic placeholder last.

use crate::algebra;
use crate::config::{self, EngineConfig};
use crate::core::term::Term;
use crate::error::CalcResult;
use crate::numeric;

use super::integrals;

fn placeholder(f: &Term, from: &Term, to: &Term, dx: &str) -> Term {
    Term::function(
        config::function_names::DEFINT,
        vec![f.clone(), from.clone(), to.clone(), Term::symbol(dx)],
    )
}

pub fn defint(f: &Term, from: &Term, to: &Term, dx: Option<&str>, cfg: EngineConfig) -> CalcResult<Term> {
    let var = match dx {
        Some(v) => v.to_string(),
        None => f.first_free_variable().unwrap_or_else(|| "x".to_string()),
    };

    if !f.has_trig() {
        if let Ok(antideriv) = integrals::integrate_depth(f, &var, 0, cfg) {
            if !antideriv.has_integral() {
                let at_to = antideriv.sub(&Term::symbol(&var), to);
                let at_from = antideriv.sub(&Term::symbol(&var), from);
                return Ok(algebra::simplify(&at_to.sub_term(at_from)));
            }
        }
    }

    if from.is_constant(true) && to.is_constant(true) {
        let a = numeric::eval_constant(from);
        let b = numeric::eval_constant(to);
        let closure = numeric::compile(f, &var);
        let value = numeric::num_integrate(closure, a, b);
        return Ok(Term::Num(crate::core::number::Rational::from_f64_approx(value)));
    }

    Ok(placeholder(f, from, to, &var))
}
