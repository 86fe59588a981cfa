//! Group `FN` integration rules (`spec.md` §4.D): direct antiderivative
//! table, power-reduction for `sin`/`cos`/`sinh`/`cosh`, and the
//! `cosAsinAtransform` same-argument `sin·cos` power rule.

use crate::config::EngineConfig;
use crate::core::number::Rational;
use crate::core::term::Term;
use crate::error::{CalcError, CalcResult};
use crate::pattern;

fn arg0(t: &Term) -> Term {
    t.args().first().cloned().unwrap_or_else(Term::zero)
}

/// Direct antiderivative for a bare `f(x)` (arg identical to `dx`,
/// power 1) — `spec.md` §4.D Group FN direct table.
fn direct_table(name: &str, arg: &Term) -> Option<Term> {
    Some(match name {
        "sin" => Term::function("cos", vec![arg.clone()]).negate(),
        "cos" => Term::function("sin", vec![arg.clone()]),
        "sec" => {
            Term::function("log", vec![
                Term::function("sec", vec![arg.clone()]).add(Term::function("tan", vec![arg.clone()])),
            ])
        }
        "csc" => Term::function("log", vec![
            Term::function("csc", vec![arg.clone()]).sub_term(Term::function("cot", vec![arg.clone()])),
        ])
        .negate(),
        "tan" => Term::function("log", vec![Term::function("sec", vec![arg.clone()])]),
        "cot" => Term::function("log", vec![Term::function("sin", vec![arg.clone()])]),
        "sinh" => Term::function("cosh", vec![arg.clone()]),
        "cosh" => Term::function("sinh", vec![arg.clone()]),
        "tanh" => Term::function("log", vec![Term::function("cosh", vec![arg.clone()])]),
        "sech" => Term::function("atan", vec![Term::function("sinh", vec![arg.clone()])]),
        "csch" => Term::function("log", vec![
            Term::function("tanh", vec![arg.clone().mul(Term::rational(1, 2))]),
        ]),
        "coth" => Term::function("log", vec![Term::function("sinh", vec![arg.clone()])]),
        "sign" => arg.clone().mul(Term::function("sign", vec![arg.clone()])),
        "abs" => arg.clone().mul(Term::function("abs", vec![arg.clone()])).div(Term::integer(2)),
        _ => return None,
    })
}

/// `integrate(FN, dt, depth)` (`spec.md` §4.D Group FN).
pub fn integrate_fn(t: &Term, dx: &str, depth: u32, cfg: EngineConfig) -> CalcResult<Term> {
    let (name, args, power, mult) = match t {
        Term::Fn { name, args, power, mult } => (name.clone(), args.clone(), power.clone(), mult.clone()),
        _ => return Err(CalcError::stop("not an FN term")),
    };
    let arg = args.first().cloned().unwrap_or_else(Term::zero);
    let p = power.as_rational().cloned().unwrap_or_else(Rational::one);
    let decomposed = pattern::decompose_arg(&arg, dx);
    let is_affine = decomposed.x.text() == dx;
    if !is_affine {
        return Err(CalcError::stop("FN argument is not affine in the integration variable"));
    }
    let a = if decomposed.a.equals(&Term::zero()) {
        Term::one()
    } else {
        decomposed.a
    };

    if p.is_one() {
        if let Some(f) = direct_table(&name, &arg) {
            return Ok(f.div(a).mul(Term::Num(mult)));
        }
        // `log`, `asin`, `acos`, `atan`, and the unevaluated special
        // functions have no elementary direct antiderivative; fall back
        // to by-parts with `dv = dx`.
        return super::by_parts::integrate_by_parts(&Term::one(), t, dx, depth, cfg, &mut Vec::new());
    }

    if p.is_integer() && p.is_negative() && (name == "tan" || name == "cot") {
        let rewritten = pattern::fn_transform(t);
        if rewritten.text() != t.text() {
            return super::integrate_depth(&rewritten, dx, depth, cfg);
        }
    }

    if p.is_integer() && p.to_i64().map(|n| n >= 2).unwrap_or(false)
        && matches!(name.as_str(), "sin" | "cos" | "sinh" | "cosh" | "tan" | "sec")
    {
        let rewritten = pattern::fn_transform(t);
        if rewritten.text() != t.text() {
            return super::integrate_depth(&rewritten.expand(), dx, depth, cfg);
        }
    }

    Err(CalcError::stop("no FN integration rule matched"))
}

/// Same-argument `sin(x)^m · cos(x)^n` power rule — the `cosAsinAtransform`
/// (`spec.md` §4.D Group CB). **Preserved defect (`spec.md` §9):** the
/// branch is selected from `m` (the `sin` factor's power) alone; `n` is
/// read but its parity is never checked, so when both powers are even the
/// rule still substitutes `u = sin(x)` as though `n` were odd, producing a
/// non-polynomial, mathematically wrong antiderivative instead of falling
/// back to a half-angle reduction. See `known_defect_cos_sin_even_powers`.
pub fn cos_sin_power(
    f1: &Term,
    f2: &Term,
    dx: &str,
    depth: u32,
    cfg: EngineConfig,
) -> Option<CalcResult<Term>> {
    let (sin_t, cos_t) = match (f1.fname(), f2.fname()) {
        (Some("sin"), Some("cos")) => (f1, f2),
        (Some("cos"), Some("sin")) => (f2, f1),
        _ => return None,
    };
    let arg = arg0(sin_t);
    if arg.text() != arg0(cos_t).text() || arg.text() != dx {
        return None;
    }
    let m = sin_t.power().and_then(|p| p.as_rational().and_then(|r| r.to_i64()))?;
    let n = cos_t.power().and_then(|p| p.as_rational().and_then(|r| r.to_i64()))?;
    if m < 1 || n < 1 {
        return None;
    }
    let mult = sin_t.multiplier().clone() * cos_t.multiplier().clone();

    let u = Term::symbol("u");
    let expr = if m % 2 == 1 {
        let k = (m - 1) / 2;
        Term::one()
            .sub_term(u.clone().pow_rational(&Rational::from_int(2)))
            .pow_rational(&Rational::from_int(k))
            .mul(u.clone().pow_rational(&Rational::from_int(n)))
            .negate()
    } else {
        // Defect: `n`'s parity is never checked here.
        let j = (n - 1) / 2;
        Term::one()
            .sub_term(u.clone().pow_rational(&Rational::from_int(2)))
            .pow_rational(&Rational::from_int(j))
            .mul(u.pow_rational(&Rational::from_int(m)))
    };
    let integrated = match super::integrate_depth(&expr.expand(), "u", depth, cfg) {
        Ok(r) => r,
        Err(e) => return Some(Err(e)),
    };
    let back = if m % 2 == 1 {
        Term::function("cos", vec![arg])
    } else {
        Term::function("sin", vec![arg])
    };
    Some(Ok(integrated.sub(&Term::symbol("u"), &back).mul(Term::Num(mult))))
}
