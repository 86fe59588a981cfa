//! Fresnel `S`/`C` (`spec.md` §4.H): reduce to `defint` on a constant
//! argument, else the symbolic call stands.

use crate::config::{self, EngineConfig};
use crate::core::term::Term;
use crate::error::CalcResult;

use super::definite;

fn half_pi_x_squared() -> Term {
    Term::symbol("pi")
        .mul(Term::symbol("x").pow_rational(&crate::core::number::Rational::from_int(2)))
        .mul(Term::rational(1, 2))
}

pub fn s(arg: &Term, cfg: EngineConfig) -> CalcResult<Term> {
    if arg.is_constant(true) {
        let inner = Term::function("sin", vec![half_pi_x_squared()]);
        return definite::defint(&inner, &Term::zero(), arg, Some("x"), cfg);
    }
    Ok(Term::function(config::function_names::FRESNEL_S, vec![arg.clone()]))
}

pub fn c(arg: &Term, cfg: EngineConfig) -> CalcResult<Term> {
    if arg.is_constant(true) {
        let inner = Term::function("cos", vec![half_pi_x_squared()]);
        return definite::defint(&inner, &Term::zero(), arg, Some("x"), cfg);
    }
    Ok(Term::function(config::function_names::FRESNEL_C, vec![arg.clone()]))
}
