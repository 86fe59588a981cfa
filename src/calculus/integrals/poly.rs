//! Polynomial, exponential (`EX`), and quadratic-core `CP` integration
//! rules (`spec.md` §4.D Group S, Group EX, CP power −1/−1/2/other).

use crate::algebra;
use crate::config::EngineConfig;
use crate::core::number::Rational;
use crate::core::term::{Exponent, Term};
use crate::error::{CalcError, CalcResult};

/// `c·x^p` poly-rule: `p = −1 → c·log(x)`; else `c·x^(p+1)/(p+1)`.
pub fn integrate_power(power: &Exponent, mult: Rational, dx: &str) -> CalcResult<Term> {
    let p = match power {
        Exponent::Rational(r) => r.clone(),
        Exponent::Symbolic(_) => return Err(CalcError::stop("symbolic power of integration variable")),
    };
    if p == Rational::new(-1, 1) {
        return Ok(Term::function("log", vec![Term::symbol(dx)]).mul(Term::Num(mult)));
    }
    let new_power = p.clone() + Rational::one();
    if new_power.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    Ok(Term::symbol(dx)
        .pow_rational(&new_power)
        .div(Term::Num(new_power))
        .mul(Term::Num(mult)))
}

/// Group EX (`spec.md` §4.D): base/exponent dx-dependence cases.
pub fn integrate_exp(t: &Term, dx: &str, depth: u32, cfg: EngineConfig) -> CalcResult<Term> {
    let (base, exponent, mult) = match t {
        Term::Exp { base, exponent, mult } => (&**base, &**exponent, mult.clone()),
        _ => return Err(CalcError::stop("not an EX term")),
    };
    let base_has_dx = base.contains(dx, true);
    let exp_has_dx = exponent.contains(dx, true);

    if base_has_dx && !exp_has_dx {
        return super::integrate_depth(
            &base.clone().pow(exponent.clone()).mul(Term::Num(mult)),
            dx,
            depth,
            cfg,
        );
    }
    if !exp_has_dx {
        return Ok(t.clone().mul(Term::symbol(dx)));
    }

    // e^(e^x) one-off (`spec.md` §4.D).
    if base.is_e() {
        if let Term::Exp {
            base: inner_base,
            exponent: inner_exp,
            ..
        } = exponent
        {
            if inner_base.is_e() && inner_exp.text() == dx {
                return Ok(Term::function("Ei", vec![exponent.clone()])
                    .mul(exponent.clone())
                    .mul(Term::Num(mult)));
            }
        }
    }

    let decomposed = crate::pattern::decompose_arg(exponent, dx);
    let is_affine = decomposed.x.text() == dx;
    if is_affine {
        let a = decomposed.a;
        if base.is_e() {
            return Ok(Term::Exp {
                base: Box::new(base.clone()),
                exponent: Box::new(exponent.clone()),
                mult: Rational::one(),
            }
            .div(a)
            .mul(Term::Num(mult)));
        }
        let ln_a = Term::function("log", vec![base.clone()]);
        return Ok(Term::Exp {
            base: Box::new(base.clone()),
            exponent: Box::new(exponent.clone()),
            mult: Rational::one(),
        }
        .div(ln_a.mul(a))
        .mul(Term::Num(mult)));
    }

    integrate_gaussian(base, exponent, mult, dx)
}

/// Gaussian-like pattern `k · e^(α·x²)` (`spec.md` §4.D):
/// `k·√π·erf(√(−α)·x) / (2·√(−α))`.
fn integrate_gaussian(base: &Term, exponent: &Term, mult: Rational, dx: &str) -> CalcResult<Term> {
    if !base.is_e() {
        return Err(CalcError::stop("non-affine, non-Gaussian exponent"));
    }
    let alpha = match exponent {
        Term::Sym { name, power, mult: m } if name == dx => match power {
            Exponent::Rational(r) if *r == Rational::from_int(2) => m.clone(),
            _ => return Err(CalcError::stop("exponent is not a quadratic in dx")),
        },
        _ => return Err(CalcError::stop("exponent is not a bare quadratic in dx")),
    };
    if !alpha.is_negative() {
        return Err(CalcError::stop("Gaussian pattern requires negative coefficient"));
    }
    let neg_alpha = alpha.negate();
    let sqrt_neg_alpha = Term::function("sqrt", vec![Term::Num(neg_alpha)]);
    let sqrt_pi = Term::function("sqrt", vec![Term::symbol("pi")]);
    let erf_arg = sqrt_neg_alpha.clone().mul(Term::symbol(dx));
    Ok(sqrt_pi
        .mul(Term::function("erf", vec![erf_arg]))
        .div(sqrt_neg_alpha.mul(Term::integer(2)))
        .mul(Term::Num(mult)))
}

/// `CP` power `−1` over an affine/quadratic/quartic core.
pub fn integrate_cp_reciprocal(t: &Term, dx: &str, depth: u32, cfg: EngineConfig) -> CalcResult<Term> {
    let (terms, mult) = match t {
        Term::Sum { terms, mult, .. } => (terms, mult.clone()),
        _ => return Err(CalcError::stop("not a CP term")),
    };
    let core = Term::Sum {
        terms: terms.clone(),
        power: Rational::one(),
        mult: Rational::one(),
    };
    if let Some(poly1) = algebra::factor::as_poly1(&core, dx) {
        let degree = poly1.coeffs.len().saturating_sub(1);
        if degree == 1 {
            let a = poly1.coeffs[1].clone();
            let r = poly1.coeffs[0].clone().negate() / a.clone();
            return Ok(Term::function("log", vec![Term::symbol(dx).sub_term(Term::Num(r))])
                .div(Term::Num(a))
                .mul(Term::Num(mult)));
        }
        if degree == 2 {
            let c = poly1.coeffs[0].clone();
            let b = poly1.coeffs[1].clone();
            let a = poly1.coeffs[2].clone();
            if b.is_zero() && a.is_positive() && c.is_positive() {
                let sqrt_a = Term::function("sqrt", vec![Term::Num(a.clone())]);
                let sqrt_c = Term::function("sqrt", vec![Term::Num(c.clone())]);
                let atan_arg = sqrt_a.clone().mul(Term::symbol(dx)).div(sqrt_c.clone());
                return Ok(Term::function("atan", vec![atan_arg])
                    .div(sqrt_a.mul(sqrt_c))
                    .mul(Term::Num(mult)));
            }
            if b.is_zero() {
                return integrate_partfrac_fallback(&core, dx, depth, cfg, mult);
            }
            return complete_square_and_substitute(&a, &b, &c, dx, mult);
        }
    }
    integrate_partfrac_fallback(&core, dx, depth, cfg, mult)
}

/// Completes the square on `a·x^2 + b·x + c` and substitutes `u = x +
/// b/(2a)`, reusing the affine/quadratic reciprocal rules above.
fn complete_square_and_substitute(
    a: &Rational,
    b: &Rational,
    c: &Rational,
    dx: &str,
    mult: Rational,
) -> CalcResult<Term> {
    let shift = b.clone() / (Rational::from_int(2) * a.clone());
    let remainder = c.clone() - b.clone() * b.clone() / (Rational::from_int(4) * a.clone());
    if !remainder.is_positive() || !a.is_positive() {
        return Err(CalcError::stop("quadratic does not complete to a positive core"));
    }
    let sqrt_a = Term::function("sqrt", vec![Term::Num(a.clone())]);
    let sqrt_rem = Term::function("sqrt", vec![Term::Num(remainder.clone())]);
    let u = Term::symbol(dx).add(Term::Num(shift));
    let atan_arg = sqrt_a.clone().mul(u).div(sqrt_rem.clone());
    Ok(Term::function("atan", vec![atan_arg])
        .div(sqrt_a.mul(sqrt_rem))
        .mul(Term::Num(mult)))
}

fn integrate_partfrac_fallback(
    core: &Term,
    dx: &str,
    depth: u32,
    cfg: EngineConfig,
    mult: Rational,
) -> CalcResult<Term> {
    let numerator = Term::one();
    let addends = algebra::partfrac::partfrac(&numerator, core, dx)
        .ok_or_else(|| CalcError::stop("denominator does not factor"))?;
    let mut acc = Term::zero();
    for addend in addends {
        let piece = addend.numerator.div(addend.denominator);
        acc = acc.add(super::integrate_depth(&piece, dx, depth, cfg)?);
    }
    Ok(acc.mul(Term::Num(mult)))
}

/// `CP` power `−1/2` over a quadratic core (`spec.md` §4.D).
pub fn integrate_cp_neg_half(t: &Term, dx: &str) -> CalcResult<Term> {
    let (terms, mult) = match t {
        Term::Sum { terms, mult, .. } => (terms, mult.clone()),
        _ => return Err(CalcError::stop("not a CP term")),
    };
    let core = Term::Sum {
        terms: terms.clone(),
        power: Rational::one(),
        mult: Rational::one(),
    };
    let poly1 = algebra::factor::as_poly1(&core, dx)
        .ok_or_else(|| CalcError::stop("non-polynomial core"))?;
    if poly1.coeffs.len() != 3 || !poly1.coeffs[1].is_zero() {
        return Err(CalcError::stop("not an a*x^2+b shaped core"));
    }
    let b = poly1.coeffs[0].clone();
    let a = poly1.coeffs[2].clone();
    if a.is_negative() && b.is_positive() {
        let sqrt_b = Term::function("sqrt", vec![Term::Num(b)]);
        let sqrt_neg_a = Term::function("sqrt", vec![Term::Num(a.negate())]);
        let arg = sqrt_neg_a.mul(Term::symbol(dx)).div(sqrt_b);
        return Ok(Term::function("asin", vec![arg]).mul(Term::Num(mult)));
    }
    if a.is_positive() != b.is_positive() {
        let sqrt_a = Term::function("sqrt", vec![Term::Num(a)]);
        let arg = sqrt_a.clone().mul(Term::symbol(dx)).div(Term::function("sqrt", vec![core]));
        return Ok(Term::function("atan", vec![arg]).div(sqrt_a).mul(Term::Num(mult)));
    }
    Err(CalcError::stop("a*x^2+b sign combination unsupported"))
}

/// Catch-all for `CP` with any other power: reduction via trig
/// substitution for a quadratic core with negative integer power, or
/// partial-fraction otherwise (`spec.md` §4.D).
pub fn integrate_cp_other(t: &Term, dx: &str, depth: u32, cfg: EngineConfig) -> CalcResult<Term> {
    let (terms, power, mult) = match t {
        Term::Sum { terms, power, mult } => (terms, power.clone(), mult.clone()),
        _ => return Err(CalcError::stop("not a CP term")),
    };
    let core = Term::Sum {
        terms: terms.clone(),
        power: Rational::one(),
        mult: Rational::one(),
    };
    if power.is_integer() && power.is_negative() {
        if let Some(poly1) = algebra::factor::as_poly1(&core, dx) {
            if poly1.coeffs.len() == 3 && poly1.coeffs[1].is_zero() && poly1.coeffs[2].is_positive() {
                return trig_sub_power(&poly1, power.to_i64().unwrap_or(-2), dx, mult);
            }
        }
    }
    integrate_partfrac_fallback(&core, dx, depth, cfg, mult)
}

/// `1/(a·tan(u)²+b)^n` trig substitution for a quadratic core raised to a
/// negative integer power (`spec.md` §4.D): `x = √(b/a)·tan(u)`, integrate
/// `cos(u)^(2(n−1))`, back-substitute.
fn trig_sub_power(poly1: &algebra::factor::Poly1, n: i64, dx: &str, mult: Rational) -> CalcResult<Term> {
    let b = poly1.coeffs[0].clone();
    let a = poly1.coeffs[2].clone();
    if !a.is_positive() || !b.is_positive() {
        return Err(CalcError::stop("trig substitution requires positive a, b"));
    }
    let u = Term::function("atan", vec![Term::function("sqrt", vec![Term::Num(a.clone() / b.clone())]).mul(Term::symbol(dx))]);
    let power = -2 * (n + 1);
    let cos_power = Term::function("cos", vec![u]).pow_rational(&Rational::from_int(power));
    Ok(cos_power
        .div(Term::function(
            "sqrt",
            vec![Term::Num(a * b.clone() * b)],
        ))
        .mul(Term::Num(mult)))
}

/// Group `PL`: delegate to partial fractions.
pub fn integrate_poly(t: &Term, dx: &str) -> CalcResult<Term> {
    let numerator = Term::one();
    let addends = algebra::partfrac::partfrac(&numerator, t, dx)
        .ok_or_else(|| CalcError::stop("PL term does not factor"))?;
    let mut acc = Term::zero();
    for addend in addends {
        acc = acc.add(addend.numerator.div(addend.denominator));
    }
    Ok(acc)
}
