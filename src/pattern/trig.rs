//! Trig/hyperbolic product identities and single-function rewrites
//! (`spec.md` §4.B).

use crate::config::function_names as fname;
use crate::core::number::Rational;
use crate::core::term::Term;

fn arg0(t: &Term) -> Term {
    t.args().first().cloned().unwrap_or_else(Term::zero)
}

/// `cos(a)·sin(b) → (sin(a+b) − sin(a−b))/2` when arguments differ;
/// `sin(2a)/2` when arguments match and the second factor has power 1.
fn cos_sin(cos_t: &Term, sin_t: &Term) -> Option<Term> {
    let a = arg0(cos_t);
    let b = arg0(sin_t);
    if a.text() == b.text() {
        if sin_t.power() == Some(crate::core::term::Exponent::one()) {
            let double = a.clone().mul(Term::integer(2));
            return Some(Term::function(fname::SIN, vec![double]).mul(Term::rational(1, 2)));
        }
        return None;
    }
    let sum = a.clone().add(b.clone());
    let diff = a.sub_term(b);
    let half = Rational::new(1, 2);
    Some(
        Term::function(fname::SIN, vec![sum])
            .sub_term(Term::function(fname::SIN, vec![diff]))
            .mul(Term::Num(half)),
    )
}

/// `sin(a)·sin(b) → (cos(a−b) − cos(a+b))/2`.
fn sin_sin(a_t: &Term, b_t: &Term) -> Option<Term> {
    let a = arg0(a_t);
    let b = arg0(b_t);
    let sum = a.clone().add(b.clone());
    let diff = a.sub_term(b);
    let half = Rational::new(1, 2);
    Some(
        Term::function(fname::COS, vec![diff])
            .sub_term(Term::function(fname::COS, vec![sum]))
            .mul(Term::Num(half)),
    )
}

/// `trigTransform(factors)`: folds a multiset of trig factors pairwise
/// using the product identities above; leftover factors pass through
/// untouched. Per `spec.md` §9, the "same arg vs different arg" branch of
/// the original is ambiguous between two source variants; this
/// implementation treats *differing* argument text as the "different
/// arguments" branch (the literal `!=` reading) — see `DESIGN.md`.
pub fn trig_transform(factors: &[Term]) -> Vec<Term> {
    let mut remaining: Vec<Term> = factors.to_vec();
    let mut out = Vec::new();

    while let Some(first) = remaining.pop() {
        let first_name = first.fname().map(|s| s.to_string());
        let mut paired = false;
        if let Some(fname_first) = &first_name {
            for i in (0..remaining.len()).rev() {
                let second = &remaining[i];
                let second_name = second.fname().unwrap_or("");
                let combined = match (fname_first.as_str(), second_name) {
                    (f, "sin") if f == fname::COS => cos_sin(&first, second),
                    ("sin", f) if f == fname::COS => cos_sin(second, &first),
                    ("sin", "sin") => sin_sin(&first, second),
                    _ => None,
                };
                if let Some(result) = combined {
                    out.push(result);
                    remaining.remove(i);
                    paired = true;
                    break;
                }
            }
        }
        if !paired {
            out.push(first);
        }
    }
    out
}

/// `fnTransform` on a single function term (`spec.md` §4.B).
pub fn fn_transform(t: &Term) -> Term {
    let (name, args, power, mult) = match t {
        Term::Fn {
            name, args, power, mult,
        } => (name.clone(), args.clone(), power.clone(), mult.clone()),
        _ => return t.clone(),
    };
    let arg = args.first().cloned().unwrap_or_else(Term::zero);
    let p = power.as_rational().cloned().unwrap_or_else(Rational::one);

    let rewritten = if p.is_one() {
        linear_identity(&name, &arg)
    } else if p == Rational::from_int(2) {
        square_identity(&name, &arg)
    } else if p == Rational::from_int(3) && (name == fname::SIN || name == fname::COS) {
        triple_angle(&name, &arg)
    } else if p.is_integer() && p.is_negative() {
        negative_power_identity(&name, &arg, &p)
    } else if p.is_integer() && p.to_i64().map(|n| n % 2 == 0 && n > 0).unwrap_or(false) {
        even_power_identity(&name, &arg, &p)
    } else {
        None
    };

    match rewritten {
        Some(r) => r.mul(Term::Num(mult)),
        None => t.clone(),
    }
}

fn linear_identity(name: &str, arg: &Term) -> Option<Term> {
    match name {
        "sinh" => Some(
            Term::Exp {
                base: Box::new(Term::symbol("e")),
                exponent: Box::new(arg.clone()),
                mult: Rational::one(),
            }
            .sub_term(Term::Exp {
                base: Box::new(Term::symbol("e")),
                exponent: Box::new(arg.clone().negate()),
                mult: Rational::one(),
            })
            .mul(Term::rational(1, 2)),
        ),
        "cosh" => Some(
            Term::Exp {
                base: Box::new(Term::symbol("e")),
                exponent: Box::new(arg.clone()),
                mult: Rational::one(),
            }
            .add(Term::Exp {
                base: Box::new(Term::symbol("e")),
                exponent: Box::new(arg.clone().negate()),
                mult: Rational::one(),
            })
            .mul(Term::rational(1, 2)),
        ),
        "tanh" => {
            let e_pos = Term::Exp {
                base: Box::new(Term::symbol("e")),
                exponent: Box::new(arg.clone()),
                mult: Rational::one(),
            };
            let e_neg = Term::Exp {
                base: Box::new(Term::symbol("e")),
                exponent: Box::new(arg.clone().negate()),
                mult: Rational::one(),
            };
            Some(e_pos.clone().sub_term(e_neg.clone()).div(e_pos.add(e_neg)))
        }
        "tan" => Some(
            Term::function(fname::SIN, vec![arg.clone()])
                .div(Term::function(fname::COS, vec![arg.clone()])),
        ),
        "csc" => Some(Term::one().div(Term::function(fname::SIN, vec![arg.clone()]))),
        "sec" => Some(Term::one().div(Term::function(fname::COS, vec![arg.clone()]))),
        _ => None,
    }
}

fn square_identity(name: &str, arg: &Term) -> Option<Term> {
    let double = arg.clone().mul(Term::integer(2));
    match name {
        "sin" => Some(
            Term::one()
                .sub_term(Term::function(fname::COS, vec![double]))
                .mul(Term::rational(1, 2)),
        ),
        "cos" => Some(
            Term::one()
                .add(Term::function(fname::COS, vec![double]))
                .mul(Term::rational(1, 2)),
        ),
        "sinh" => Some(
            Term::function(fname::COSH, vec![double])
                .sub_term(Term::one())
                .mul(Term::rational(1, 2)),
        ),
        "cosh" => Some(
            Term::function(fname::COSH, vec![double])
                .add(Term::one())
                .mul(Term::rational(1, 2)),
        ),
        "tan" => Some(
            Term::function(fname::SIN, vec![arg.clone()])
                .pow_rational(&Rational::from_int(2))
                .div(Term::function(fname::COS, vec![arg.clone()]).pow_rational(&Rational::from_int(2))),
        ),
        "sec" => Some(
            Term::one()
                .sub_term(Term::function(fname::COS, vec![double.clone()]))
                .div(
                    Term::one().add(Term::function(fname::COS, vec![double])),
                )
                .add(Term::one()),
        ),
        _ => None,
    }
}

/// `sin³ / cos³ → triple-angle sums` (`spec.md` §4.B).
fn triple_angle(name: &str, arg: &Term) -> Option<Term> {
    let triple = arg.clone().mul(Term::integer(3));
    match name {
        "sin" => Some(
            Term::function(fname::SIN, vec![triple])
                .negate()
                .add(Term::function(fname::SIN, vec![arg.clone()]).mul(Term::integer(3)))
                .mul(Term::rational(1, 4)),
        ),
        "cos" => Some(
            Term::function(fname::COS, vec![triple])
                .add(Term::function(fname::COS, vec![arg.clone()]).mul(Term::integer(3)))
                .mul(Term::rational(1, 4)),
        ),
        _ => None,
    }
}

fn negative_power_identity(name: &str, arg: &Term, p: &Rational) -> Option<Term> {
    let recip_name = match name {
        "sin" => "csc",
        "cos" => "sec",
        "tan" => "cot",
        _ => return None,
    };
    let positive = p.abs();
    Some(Term::function(recip_name, vec![arg.clone()]).pow_rational(&positive))
}

fn even_power_identity(name: &str, arg: &Term, p: &Rational) -> Option<Term> {
    if name != "sin" && name != "cos" {
        return None;
    }
    let half = square_identity(name, arg)?;
    let n = p.to_i64()? / 2;
    let expanded = half.pow_rational(&Rational::from_int(n)).expand();
    Some(expanded)
}
