//! `PartFrac.partfrac` (`spec.md` §6, §4.D Group PL / CP power −1 "else
//! partial-fraction").
//!
//! Decomposes `num/den` (both single-variable polynomials over `var`) into
//! a sum of `A/(x-root)` (and, for an irreducible quadratic remainder,
//! `(Bx+C)/(a*x^2+b*x+c)`) addends, built on [`crate::algebra::factor`].
//! Only linear-root denominators are solved exactly for the coefficients
//! (via the cover-up method); an irreducible quadratic factor is left
//! whole as one addend over that quadratic, which is what the integrator's
//! arctan-pattern rule expects to see next anyway.

use crate::algebra::factor::{as_poly1, factor_inner, Factor, Poly1};
use crate::core::number::Rational;
use crate::core::term::Term;

/// One partial-fraction addend: `numerator / denominator`, both as
/// `Term`s over `var`.
pub struct Addend {
    pub numerator: Term,
    pub denominator: Term,
}

fn poly_to_term(p: &Poly1) -> Term {
    let var = Term::symbol(&p.var);
    let mut acc = Term::zero();
    for (i, c) in p.coeffs.iter().enumerate() {
        if c.is_zero() {
            continue;
        }
        let term = if i == 0 {
            Term::Num(c.clone())
        } else {
            var.clone().pow_rational(&Rational::from_int(i as i64)).mul(Term::Num(c.clone()))
        };
        acc = acc.add(term);
    }
    acc
}

fn eval_poly(p: &Poly1, x: &Rational) -> Rational {
    let mut acc = Rational::zero();
    let mut power = Rational::one();
    for c in &p.coeffs {
        acc = acc + c.clone() * power.clone();
        power = power * x.clone();
    }
    acc
}

fn deriv_poly(p: &Poly1) -> Poly1 {
    let mut out = Vec::new();
    for (i, c) in p.coeffs.iter().enumerate().skip(1) {
        out.push(c.clone() * Rational::from_int(i as i64));
    }
    if out.is_empty() {
        out.push(Rational::zero());
    }
    Poly1 {
        var: p.var.clone(),
        coeffs: out,
    }
}

/// Decomposes `numerator / denominator` (proper rational function: numerator
/// degree < denominator degree) into partial fractions. Returns `None` when
/// the denominator doesn't factor via [`factor_inner`], or the fraction
/// isn't proper.
pub fn partfrac(numerator: &Term, denominator: &Term, var: &str) -> Option<Vec<Addend>> {
    let num_poly = as_poly1(numerator, var)?;
    let den_poly = as_poly1(denominator, var)?;
    if num_poly.coeffs.len() >= den_poly.coeffs.len() {
        return None;
    }
    let (lead, factors) = factor_inner(&den_poly)?;

    let linear_roots: Vec<Rational> = factors
        .iter()
        .filter_map(|f| match f {
            Factor::Linear { root } => Some(root.clone()),
            Factor::Quadratic { .. } => None,
        })
        .collect();
    let quadratics: Vec<(Rational, Rational, Rational)> = factors
        .iter()
        .filter_map(|f| match f {
            Factor::Quadratic { a, b, c } => Some((a.clone(), b.clone(), c.clone())),
            Factor::Linear { .. } => None,
        })
        .collect();

    if quadratics.len() > 1 || (quadratics.len() == 1 && !linear_roots.is_empty()) {
        // Mixed linear + quadratic remainders: cover-up coefficients don't
        // apply cleanly; leave the whole fraction as a single addend so the
        // integrator falls back to another strategy.
        return None;
    }

    let mut addends = Vec::new();
    if !quadratics.is_empty() {
        let (a, b, c) = quadratics[0].clone();
        let quad_term = Term::symbol(var)
            .pow_rational(&Rational::from_int(2))
            .mul(Term::Num(a.clone()))
            .add(Term::symbol(var).mul(Term::Num(b)))
            .add(Term::Num(c));
        addends.push(Addend {
            numerator: poly_to_term(&num_poly).div(Term::Num(lead)),
            denominator: quad_term.div(Term::Num(a)),
        });
        return Some(addends);
    }

    // Cover-up method for distinct linear factors: A_i = N(r_i) / D'(r_i)
    // where D is the *monic* denominator with `lead` factored out.
    let den_deriv = deriv_poly(&den_poly);
    for root in &linear_roots {
        let a_i = eval_poly(&num_poly, root) / eval_poly(&den_deriv, root);
        addends.push(Addend {
            numerator: Term::Num(a_i),
            denominator: Term::symbol(var).sub_term(Term::Num(root.clone())),
        });
    }
    Some(addends)
}
