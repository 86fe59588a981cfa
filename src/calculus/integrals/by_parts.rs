//! Integration by parts (`spec.md` §4.D Group CB, the `P` branch): LIATE
//! ranking picks `u`, and a cyclic-integral (`∫e^x·sin(x) dx`-shaped)
//! application is resolved algebraically rather than recursed forever.

use crate::config::EngineConfig;
use crate::core::number::Rational;
use crate::core::term::Term;
use crate::error::{CalcError, CalcResult};

use super::integrate_depth;

/// Log, Inverse-trig, Algebraic, Trig, Exponential — lower rank picks `u`.
fn liate_rank(t: &Term) -> u8 {
    match t {
        Term::Fn { name, .. } => match name.as_str() {
            "log" | "log10" | "Li" => 0,
            "asin" | "acos" | "atan" | "acot" | "asec" | "acsc" | "asinh" | "acosh" | "atanh"
            | "acoth" | "asech" | "acsch" => 1,
            "sin" | "cos" | "tan" | "sec" | "csc" | "cot" | "sinh" | "cosh" | "tanh" | "sech"
            | "csch" | "coth" => 3,
            _ => 2,
        },
        Term::Exp { .. } => 4,
        _ => 2,
    }
}

fn choose_u_dv(f1: &Term, f2: &Term) -> (Term, Term) {
    if liate_rank(f1) <= liate_rank(f2) {
        (f1.clone(), f2.clone())
    } else {
        (f2.clone(), f1.clone())
    }
}

/// `∫u dv = u·v − ∫v·du`, applied to a two-factor product. When the
/// remainder integral reproduces the original integrand up to a constant
/// (the `e^x·sin(x)` family), solves the resulting linear equation for the
/// integral instead of recursing indefinitely. `previous_stack` guards
/// against a non-converging `(u, dv)` split recurring without ever hitting
/// the fixed-point case.
pub fn integrate_by_parts(
    f1: &Term,
    f2: &Term,
    dx: &str,
    depth: u32,
    cfg: EngineConfig,
    previous_stack: &mut Vec<String>,
) -> CalcResult<Term> {
    let root = f1.clone().mul(f2.clone());
    step(
        f1,
        f2,
        &root,
        Term::zero(),
        Rational::one(),
        dx,
        depth,
        cfg,
        previous_stack,
    )
}

/// Recursive worker for [`integrate_by_parts`]. `root` is the integrand the
/// whole chain is ultimately solving for; `alt_sum`/`sign` accumulate
/// `Σ(-1)^j·boundary_j` across levels so that a fixed point reached `m`
/// levels below `root` (the `e^x·sin(x)` case needs `m = 1`, not `m = 0`)
/// still solves the right linear equation: `root = Σ(-1)^j·boundary_j /
/// (1 + (-1)^m·k)` where `remainder_m = k·root`. Each frame returns its own
/// `I_m = boundary_m − k·root`, which telescopes back up through the normal
/// `boundary.sub_term(remainder_integral)` chain to yield `I_0` at the top.
///
/// `previous_stack` only catches a chain that cycles back to an exact
/// `(u, dv)` signature; a chain that diverges (each level producing a new
/// factor pair, never repeating and never reaching the fixed-point case)
/// would otherwise recurse unbounded. `depth` is incremented here on every
/// self-recursive application, same as `integrate_depth` (`mod.rs`), so
/// that case bails with `NoIntegralFound` instead of overflowing the stack.
#[allow(clippy::too_many_arguments)]
fn step(
    f1: &Term,
    f2: &Term,
    root: &Term,
    alt_sum: Term,
    sign: Rational,
    dx: &str,
    depth: u32,
    cfg: EngineConfig,
    previous_stack: &mut Vec<String>,
) -> CalcResult<Term> {
    let depth = depth + 1;
    if depth > cfg.integration_depth {
        return Err(CalcError::stop("integration by parts did not converge within the depth cap"));
    }
    let (u, dv) = choose_u_dv(f1, f2);
    let v = integrate_depth(&dv, dx, depth, cfg)?;
    let du = crate::calculus::derivatives::nth_derivative(&u, dx, 1);
    let boundary = u.clone().mul(v.clone());
    let remainder = v.mul(du);

    if remainder.equals(&Term::zero()) {
        return Ok(boundary);
    }

    let running_sum = alt_sum.add(boundary.clone().scaled(sign.clone()));

    if remainder.to_unit_multiplier().text() == root.to_unit_multiplier().text() {
        let k = remainder.multiplier() / root.multiplier();
        let denom = Rational::one() + sign.clone() * k.clone();
        if denom.is_zero() {
            return Err(CalcError::stop("by-parts fixed point has no solution"));
        }
        let solved_root = running_sum.div(Term::Num(denom));
        return Ok(boundary.sub_term(Term::Num(k).mul(solved_root)));
    }

    let signature = format!("{}~{}", u.text(), dv.text());
    if previous_stack.contains(&signature) {
        return Err(CalcError::stop("integration by parts did not converge"));
    }
    previous_stack.push(signature);

    let next_sign = sign.negate();
    let remainder_integral = match &remainder {
        Term::Prod { factors, power, mult } if power.is_one() && factors.len() == 2 => {
            let items: Vec<Term> = factors.values().cloned().collect();
            let inner = step(
                &items[0],
                &items[1],
                root,
                running_sum,
                next_sign,
                dx,
                depth,
                cfg,
                previous_stack,
            )?;
            inner.mul(Term::Num(mult.clone()))
        }
        _ => integrate_depth(&remainder, dx, depth, cfg)?,
    };
    Ok(boundary.sub_term(remainder_integral))
}
