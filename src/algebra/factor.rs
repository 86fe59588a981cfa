//! `Factor.factorInner` / `Factor.coeffFactor` (`spec.md` §6).
//!
//! Works over a dense coefficient vector extracted from a `Poly` or linear
//! `Sym`-only `Sum`. Handles the two shapes the integrator's partial
//! fraction and quadratic-factoring rules actually need: linear and
//! quadratic polynomials (via the rational-root test and the discriminant).
//! Degree ≥ 3 without a found rational root is returned unfactored — a real
//! but intentionally modest implementation, matching how `spec.md` frames
//! this as an external collaborator the integrator merely calls into.

use crate::core::number::Rational;
use crate::core::term::Term;

/// Dense coefficients `[c0, c1, ..., cn]` for `c0 + c1*x + ... + cn*x^n`,
/// plus the variable name.
pub struct Poly1 {
    pub var: String,
    pub coeffs: Vec<Rational>,
}

/// Extracts a dense single-variable polynomial view, if `t` is one.
pub fn as_poly1(t: &Term, var: &str) -> Option<Poly1> {
    match t {
        Term::Poly { base, coeffs, mult } => {
            let name = base.value()?.to_string();
            if name != var {
                return None;
            }
            let degree = *coeffs.keys().max().unwrap_or(&0);
            if degree < 0 {
                return None;
            }
            let mut dense = vec![Rational::zero(); degree as usize + 1];
            for (&exp, coeff) in coeffs {
                if exp >= 0 {
                    dense[exp as usize] = coeff.clone() * mult.clone();
                }
            }
            Some(Poly1 { var: name, coeffs: dense })
        }
        Term::Sum { terms, power, mult } if power.is_one() => {
            let mut dense = vec![Rational::zero(); 1];
            for term in terms.values() {
                match term {
                    Term::Num(r) => dense[0] = dense[0].clone() + r.clone(),
                    Term::Sym { name, power: p, mult: m } if name == var => {
                        let exp = p.as_rational()?.to_i64()?;
                        if exp < 0 {
                            return None;
                        }
                        while dense.len() <= exp as usize {
                            dense.push(Rational::zero());
                        }
                        dense[exp as usize] = dense[exp as usize].clone() + m.clone();
                    }
                    _ => return None,
                }
            }
            for c in dense.iter_mut() {
                *c = c.clone() * mult.clone();
            }
            Some(Poly1 {
                var: var.to_string(),
                coeffs: dense,
            })
        }
        Term::Sym { name, power, mult } if name == var => {
            let exp = power.as_rational()?.to_i64()?;
            if exp < 0 {
                return None;
            }
            let mut dense = vec![Rational::zero(); exp as usize + 1];
            dense[exp as usize] = mult.clone();
            Some(Poly1 {
                var: var.to_string(),
                coeffs: dense,
            })
        }
        _ => None,
    }
}

/// `coeffFactor`: strip a rational content factor, returning `(content,
/// primitive)`. For a term with an exact rational multiplier this is just
/// splitting the multiplier out to unit.
pub fn coeff_factor(t: &Term) -> (Rational, Term) {
    let m = t.multiplier();
    (m.clone(), t.to_unit_multiplier())
}

/// A factor of a polynomial: either linear `(x - r)` or an irreducible
/// quadratic `a*x^2 + b*x + c`.
pub enum Factor {
    Linear { root: Rational },
    Quadratic { a: Rational, b: Rational, c: Rational },
}

/// `factorInner`: attempts to factor `poly` into linear/quadratic real
/// factors via the rational-root theorem (degree ≤ 3) or the quadratic
/// formula (degree 2). Returns `None` when no factorization is found.
pub fn factor_inner(poly: &Poly1) -> Option<(Rational, Vec<Factor>)> {
    let n = poly.coeffs.len().saturating_sub(1);
    let lead = poly.coeffs.last()?.clone();
    if lead.is_zero() {
        return None;
    }
    match n {
        0 => None,
        1 => {
            let root = poly.coeffs[0].clone().negate() / lead.clone();
            Some((lead, vec![Factor::Linear { root }]))
        }
        2 => {
            let c = poly.coeffs[0].clone();
            let b = poly.coeffs[1].clone();
            let a = poly.coeffs[2].clone();
            let disc = b.clone() * b.clone() - Rational::from_int(4) * a.clone() * c.clone();
            if disc.is_negative() {
                Some((Rational::one(), vec![Factor::Quadratic { a, b, c }]))
            } else if let Some(sqrt_disc) = disc.sqrt_exact() {
                let two_a = Rational::from_int(2) * a.clone();
                let r1 = (b.clone().negate() + sqrt_disc.clone()) / two_a.clone();
                let r2 = (b.negate() - sqrt_disc) / two_a;
                Some((
                    a,
                    vec![Factor::Linear { root: r1 }, Factor::Linear { root: r2 }],
                ))
            } else {
                Some((Rational::one(), vec![Factor::Quadratic { a, b, c }]))
            }
        }
        _ => rational_root_factor(poly),
    }
}

fn rational_root_factor(poly: &Poly1) -> Option<(Rational, Vec<Factor>)> {
    let lead = poly.coeffs.last()?.clone();
    let const_term = poly.coeffs[0].clone();
    if const_term.is_zero() {
        return Some((lead, vec![Factor::Linear { root: Rational::zero() }]));
    }
    let p_candidates = small_divisors(&const_term);
    let q_candidates = small_divisors(&lead);
    for p in &p_candidates {
        for q in &q_candidates {
            for sign in [1i64, -1] {
                let candidate = Rational::new(*p * sign, *q);
                if eval_poly(poly, &candidate).is_zero() {
                    return Some((lead, vec![Factor::Linear { root: candidate }]));
                }
            }
        }
    }
    None
}

fn small_divisors(r: &Rational) -> Vec<i64> {
    let n = r.numer().to_string().parse::<i64>().unwrap_or(1).abs().max(1);
    (1..=n.min(50)).filter(|d| n % d == 0).collect()
}

fn eval_poly(poly: &Poly1, x: &Rational) -> Rational {
    let mut acc = Rational::zero();
    let mut power = Rational::one();
    for c in &poly.coeffs {
        acc = acc + c.clone() * power.clone();
        power = power * x.clone();
    }
    acc
}
