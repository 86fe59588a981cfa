//! Two-factor closed forms and algebraic reductions named explicitly in
//! `spec.md` §4.D Group CB's factor-pair table — tried ahead of the
//! generic `u`-substitution/by-parts fallbacks in `integrate_product`,
//! since neither fallback can reach them on its own: `trig::cos_sin_power`
//! only matches same-argument `sin·cos`, and `substitution::try_u_sub`'s
//! `extract_inner` doesn't model the special-function derivative table
//! (`Ci`/`Si`/`Chi`/`Shi`/`Ei`) or a bare `log(x)^n` power-rule in reverse.

use crate::config::EngineConfig;
use crate::core::number::Rational;
use crate::core::term::Term;
use crate::error::CalcResult;
use crate::pattern::{self, decompose_arg};

use super::integrate_depth;

fn arg0(t: &Term) -> Term {
    t.args().first().cloned().unwrap_or_else(Term::zero)
}

/// `x^-1`, any coefficient.
fn is_reciprocal_of(t: &Term, dx: &str) -> bool {
    matches!(t, Term::Sym { name, power, .. } if name == dx && *power == crate::core::term::Exponent::Rational(Rational::new(-1, 1)))
}

/// FN·FN same argument: `tan·sec`/`sec·tan → sec/a`, `sec·cos`/`cos·sec →
/// x`, `sin·csc`/`csc·sin → x` (`spec.md` §4.D, the algebraic-
/// simplification row — the product collapses to a single function or a
/// constant before any further integration is needed).
pub fn fn_fn_algebraic(f1: &Term, f2: &Term, dx: &str) -> Option<CalcResult<Term>> {
    let (n1, n2) = (f1.fname()?, f2.fname()?);
    let a1 = arg0(f1);
    if a1.text() != arg0(f2).text() {
        return None;
    }
    let total_mult = f1.multiplier() * f2.multiplier();
    let decomposed = decompose_arg(&a1, dx);
    if decomposed.x.text() != dx {
        return None;
    }
    match (n1, n2) {
        ("tan", "sec") | ("sec", "tan") => Some(Ok(Term::function("sec", vec![a1])
            .div(decomposed.a)
            .mul(Term::Num(total_mult)))),
        ("sec", "cos") | ("cos", "sec") | ("sin", "csc") | ("csc", "sin") => {
            Some(Ok(Term::symbol(dx).mul(Term::Num(total_mult))))
        }
        _ => None,
    }
}

/// FN·FN differing linear arguments: product-to-sum via
/// `pattern::trig_transform`, then recurse on the (now additive) result.
/// Same-argument pairs are left to `trig::cos_sin_power`.
pub fn fn_fn_product_to_sum(
    f1: &Term,
    f2: &Term,
    dx: &str,
    depth: u32,
    cfg: EngineConfig,
) -> Option<CalcResult<Term>> {
    let (n1, n2) = (f1.fname()?, f2.fname()?);
    let pair = matches!((n1, n2), ("cos", "sin") | ("sin", "cos") | ("sin", "sin"));
    if !pair || arg0(f1).text() == arg0(f2).text() {
        return None;
    }
    let total_mult = f1.multiplier() * f2.multiplier();
    let transformed = pattern::trig_transform(&[f1.to_unit_multiplier(), f2.to_unit_multiplier()]);
    if transformed.len() != 1 {
        return None;
    }
    let rewritten = transformed.into_iter().next().unwrap().mul(Term::Num(total_mult));
    Some(integrate_depth(&rewritten, dx, depth, cfg))
}

/// FN·S special-function closed forms (`spec.md` §4.D): `cos(a·x)/x →
/// Ci(a·x)` and the `Si`/`Chi`/`Shi` analogues (restricted to a
/// zero-intercept linear argument — the derivative table's `Ci'(u) =
/// cos(u)/u` only matches `cos(a·x)/x` exactly once the chain rule is
/// applied to `u = a·x`, not to `u = a·x + b` with `b ≠ 0`), and bare
/// `log(x)^n/x → log(x)^(n+1)/(n+1)` for integer `n ≠ −1`.
pub fn fn_over_reciprocal(f1: &Term, f2: &Term, dx: &str) -> Option<CalcResult<Term>> {
    let fn_t = if matches!(f1, Term::Fn { .. }) && is_reciprocal_of(f2, dx) {
        f1
    } else if matches!(f2, Term::Fn { .. }) && is_reciprocal_of(f1, dx) {
        f2
    } else {
        return None;
    };
    let total_mult = f1.multiplier() * f2.multiplier();
    let name = fn_t.fname()?;
    let arg = arg0(fn_t);

    if name == "log" && arg.text() == dx {
        let p = fn_t.power()?.as_rational()?.clone();
        if p.is_integer() && p != Rational::new(-1, 1) {
            let n_plus_1 = p + Rational::one();
            return Some(Ok(Term::function("log", vec![arg])
                .pow_rational(&n_plus_1)
                .div(Term::Num(n_plus_1))
                .mul(Term::Num(total_mult))));
        }
        return None;
    }

    if fn_t.power() != Some(crate::core::term::Exponent::one()) {
        return None;
    }
    let decomposed = decompose_arg(&arg, dx);
    if decomposed.x.text() != dx || !decomposed.b.equals(&Term::zero()) {
        return None;
    }
    let special = match name {
        "cos" => "Ci",
        "sin" => "Si",
        "cosh" => "Chi",
        "sinh" => "Shi",
        _ => return None,
    };
    Some(Ok(Term::function(special, vec![arg]).mul(Term::Num(total_mult))))
}

/// EX·S special-function closed form: `e^(a·x)/x → Ei(a·x)` (same
/// zero-intercept restriction as `fn_over_reciprocal`, for the same
/// chain-rule reason).
pub fn exp_over_reciprocal(f1: &Term, f2: &Term, dx: &str) -> Option<CalcResult<Term>> {
    let exp_t = if matches!(f1, Term::Exp { .. }) && is_reciprocal_of(f2, dx) {
        f1
    } else if matches!(f2, Term::Exp { .. }) && is_reciprocal_of(f1, dx) {
        f2
    } else {
        return None;
    };
    let (base, exponent) = match exp_t {
        Term::Exp { base, exponent, .. } => (&**base, &**exponent),
        _ => unreachable!(),
    };
    if !base.is_e() {
        return None;
    }
    let total_mult = f1.multiplier() * f2.multiplier();
    let decomposed = decompose_arg(exponent, dx);
    if decomposed.x.text() != dx || !decomposed.b.equals(&Term::zero()) {
        return None;
    }
    Some(Ok(Term::function("Ei", vec![exponent.clone()]).mul(Term::Num(total_mult))))
}

/// EX·EX, differing constant bases, both exponents linear in `dx`:
/// collapses to a single base `b1^(a1·x)·b2^(a2·x) = (b1^a1·b2^a2)^x`,
/// whose antiderivative is the usual `c^x / log(c)` with `log(c) =
/// a1·log(b1) + a2·log(b2)` (`spec.md` §4.D).
pub fn exp_exp_closed_form(f1: &Term, f2: &Term, dx: &str) -> Option<CalcResult<Term>> {
    let (b1, e1, m1) = match f1 {
        Term::Exp { base, exponent, mult } => (&**base, &**exponent, mult.clone()),
        _ => return None,
    };
    let (b2, e2, m2) = match f2 {
        Term::Exp { base, exponent, mult } => (&**base, &**exponent, mult.clone()),
        _ => return None,
    };
    if b1.contains(dx, true) || b2.contains(dx, true) || b1.text() == b2.text() {
        return None;
    }
    let d1 = decompose_arg(e1, dx);
    let d2 = decompose_arg(e2, dx);
    if d1.x.text() != dx || d2.x.text() != dx {
        return None;
    }
    let core1 = Term::Exp { base: Box::new(b1.clone()), exponent: Box::new(d1.ax.clone()), mult: Rational::one() };
    let core2 = Term::Exp { base: Box::new(b2.clone()), exponent: Box::new(d2.ax.clone()), mult: Rational::one() };
    let log_c = Term::function("log", vec![b1.clone()])
        .mul(d1.a)
        .add(Term::function("log", vec![b2.clone()]).mul(d2.a));
    let intercept1 = if d1.b.equals(&Term::zero()) {
        Term::one()
    } else {
        Term::Exp { base: Box::new(b1.clone()), exponent: Box::new(d1.b), mult: Rational::one() }
    };
    let intercept2 = if d2.b.equals(&Term::zero()) {
        Term::one()
    } else {
        Term::Exp { base: Box::new(b2.clone()), exponent: Box::new(d2.b), mult: Rational::one() }
    };
    Some(Ok(core1
        .mul(core2)
        .div(log_c)
        .mul(intercept1)
        .mul(intercept2)
        .mul(Term::Num(m1 * m2))))
}

/// CP·CP: both positive-integer powers expand and distribute; exactly
/// `(−1, −1)` combines into a single rational expression and resolves via
/// partial fractions. Mixed-sign or other power combinations are left to
/// the `u`-substitution/by-parts fallbacks — `Term::expand` doesn't model
/// negative-power `Sum` factors, so there is no safe generic "distribute"
/// for that case (`spec.md`'s "otherwise distribute" row is narrowed to
/// the two cases with a sound implementation; see `DESIGN.md`).
pub fn cp_cp(t: &Term, f1: &Term, f2: &Term, dx: &str, depth: u32, cfg: EngineConfig) -> Option<CalcResult<Term>> {
    let (p1, p2) = match (f1, f2) {
        (Term::Sum { power: p1, .. }, Term::Sum { power: p2, .. }) => (p1.clone(), p2.clone()),
        _ => return None,
    };
    if p1.is_integer() && p2.is_integer() && p1.is_positive() && p2.is_positive() {
        return Some(integrate_depth(&t.clone().expand(), dx, depth, cfg));
    }
    if p1 == Rational::new(-1, 1) && p2 == Rational::new(-1, 1) {
        let total_mult = f1.multiplier() * f2.multiplier();
        let core = |f: &Term| match f {
            Term::Sum { terms, .. } => Term::Sum { terms: terms.clone(), power: Rational::one(), mult: Rational::one() },
            _ => unreachable!(),
        };
        let denominator = core(f1).mul(core(f2)).expand();
        let addends = crate::algebra::partfrac::partfrac(&Term::one(), &denominator, dx)?;
        let mut acc = Term::zero();
        for addend in addends {
            let piece = addend.numerator.div(addend.denominator);
            match integrate_depth(&piece, dx, depth, cfg) {
                Ok(r) => acc = acc.add(r),
                Err(e) => return Some(Err(e)),
            }
        }
        return Some(Ok(acc.mul(Term::Num(total_mult))));
    }
    None
}
