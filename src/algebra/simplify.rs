//! `Simplify.simplify` (`spec.md` §6) — a real but intentionally modest
//! simplifier: recursive renormalization through the arithmetic kernel
//! (which already folds constants and collects like terms on construction,
//! `crate::core::term::arithmetic`) plus one Pythagorean identity pass.
//! Not a full CAS simplifier — `spec.md` §8.1 itself only requires the
//! testable laws to hold "up to simplification" at this level.

use crate::core::number::Rational;
use crate::core::term::Term;

pub fn simplify(t: &Term) -> Term {
    let renormalized = renormalize(t);
    pythagorean_pass(&renormalized)
}

fn renormalize(t: &Term) -> Term {
    match t {
        Term::Num(_) | Term::Sym { .. } | Term::Infinity(_) => t.clone(),
        Term::Fn {
            name, args, power, mult,
        } => {
            let simplified_args: Vec<Term> = args.iter().map(renormalize).collect();
            let base = Term::Fn {
                name: name.clone(),
                args: simplified_args,
                power: power.clone(),
                mult: Rational::one(),
            };
            base.mul(Term::Num(mult.clone()))
        }
        Term::Prod { factors, .. } => {
            let mut acc = Term::Num(t.multiplier());
            for f in factors.values() {
                acc = acc.mul(renormalize(f));
            }
            acc
        }
        Term::Sum { terms, .. } => {
            let mut acc = Term::Num(t.multiplier());
            for term in terms.values() {
                acc = acc.add(renormalize(term));
            }
            acc
        }
        Term::Exp { base, exponent, mult } => Term::Exp {
            base: Box::new(renormalize(base)),
            exponent: Box::new(renormalize(exponent)),
            mult: mult.clone(),
        },
        Term::Poly { .. } => t.clone(),
    }
}

/// `sin(a)^2 + cos(a)^2 → 1` whenever both appear as direct summands with
/// the same coefficient and argument.
fn pythagorean_pass(t: &Term) -> Term {
    let terms = match t {
        Term::Sum { terms, power, .. } if power.is_one() => terms,
        _ => return t.clone(),
    };
    let values: Vec<&Term> = terms.values().collect();
    for i in 0..values.len() {
        for j in 0..values.len() {
            if i == j {
                continue;
            }
            if let (Some(sin_pair), Some(cos_pair)) = (
                square_of(values[i], "sin"),
                square_of(values[j], "cos"),
            ) {
                if sin_pair.0 == cos_pair.0 && sin_pair.1 == cos_pair.1 {
                    let mut rest = Term::zero();
                    for (k, v) in values.iter().enumerate() {
                        if k != i && k != j {
                            rest = rest.add((*v).clone());
                        }
                    }
                    return rest.add(Term::Num(cos_pair.1)).mul(Term::Num(t.multiplier()));
                }
            }
        }
    }
    t.clone()
}

/// If `term` is `k * fname(arg)^2`, returns `(arg_text, k)`.
fn square_of(term: &Term, target: &str) -> Option<(String, Rational)> {
    match term {
        Term::Fn { name, args, power, mult } if name == target => {
            let p = power.as_rational()?;
            if *p == Rational::from_int(2) {
                Some((args.first()?.text(), mult.clone()))
            } else {
                None
            }
        }
        _ => None,
    }
}

