//! Differentiation (`spec.md` §4.C): chain rule first, then dispatch by
//! group; poly-rule on symbols, product rule on `CB`, sum rule on `CP`,
//! logarithmic differentiation on `EX`/symbolic-power `FN`.

use crate::core::number::Rational;
use crate::core::term::{Exponent, Sign, Term};

pub fn nth_derivative(t: &Term, var: &str, n: u32) -> Term {
    let mut result = t.clone();
    for _ in 0..n.max(1) {
        result = differentiate_once(&result, var);
    }
    if n == 0 {
        t.clone()
    } else {
        result
    }
}

fn differentiate_once(t: &Term, var: &str) -> Term {
    let t = t.unwrap_sqrt();
    match &t {
        Term::Num(_) | Term::Infinity(_) => Term::zero(),
        Term::Sym { name, power, mult } => {
            if name != var {
                return Term::zero();
            }
            match power {
                Exponent::Rational(p) => {
                    let new_power = p.clone() - Rational::one();
                    let coeff = p.clone() * mult.clone();
                    if coeff.is_zero() {
                        Term::zero()
                    } else if new_power.is_zero() {
                        Term::Num(coeff)
                    } else {
                        Term::Sym {
                            name: name.clone(),
                            power: Exponent::Rational(new_power),
                            mult: coeff,
                        }
                    }
                }
                Exponent::Symbolic(_) => log_diff(&t, var),
            }
        }
        Term::Fn {
            name, args, power, mult,
        } => {
            if name == "atan2" && args.len() == 2 {
                return atan2_derivative(args, mult, var);
            }
            match power {
                Exponent::Rational(p) if p.is_one() => {
                    chain_rule_unit(name, args, mult.clone(), var)
                }
                Exponent::Rational(p) => {
                    let bare = Term::function(name.clone(), args.clone());
                    let bare_deriv = chain_rule_unit(name, args, Rational::one(), var);
                    bare.pow_rational(&(p.clone() - Rational::one()))
                        .mul(bare_deriv)
                        .mul(Term::Num(p.clone() * mult.clone()))
                }
                Exponent::Symbolic(_) => log_diff(&t, var),
            }
        }
        Term::Prod { factors, power, mult } => {
            let items: Vec<Term> = factors.values().cloned().collect();
            let bare_deriv = product_rule(&items, var);
            let result = match power {
                Exponent::Rational(p) if p.is_one() => bare_deriv,
                Exponent::Rational(p) => {
                    let bare = Term::Prod {
                        factors: factors.clone(),
                        power: Exponent::one(),
                        mult: Rational::one(),
                    };
                    bare.pow_rational(&(p.clone() - Rational::one()))
                        .mul(bare_deriv)
                        .mul(Term::Num(p.clone()))
                }
                Exponent::Symbolic(_) => return log_diff(&t, var),
            };
            result.mul(Term::Num(mult.clone()))
        }
        Term::Sum { terms, power, mult } => {
            let bare_deriv: Term = terms
                .values()
                .map(|term| differentiate_once(term, var))
                .fold(Term::zero(), |acc, d| acc.add(d));
            let result = if power.is_one() {
                bare_deriv
            } else {
                let bare = Term::Sum {
                    terms: terms.clone(),
                    power: Rational::one(),
                    mult: Rational::one(),
                };
                bare.pow_rational(&(power.clone() - Rational::one()))
                    .mul(bare_deriv)
                    .mul(Term::Num(power.clone()))
            };
            result.mul(Term::Num(mult.clone()))
        }
        Term::Poly { base, coeffs, mult } => {
            let base_deriv = differentiate_once(base, var);
            let mut acc = Term::zero();
            for (&exp, coeff) in coeffs {
                if exp == 0 {
                    continue;
                }
                let term = (**base)
                    .clone()
                    .pow_rational(&Rational::from_int(exp - 1))
                    .mul(Term::Num(coeff.clone() * Rational::from_int(exp)));
                acc = acc.add(term);
            }
            acc.mul(base_deriv).mul(Term::Num(mult.clone()))
        }
        Term::Exp { .. } => log_diff(&t, var),
    }
}

fn product_rule(factors: &[Term], var: &str) -> Term {
    let mut acc = Term::zero();
    for i in 0..factors.len() {
        let di = differentiate_once(&factors[i], var);
        let mut term = di;
        for (j, fj) in factors.iter().enumerate() {
            if j != i {
                term = term.mul(fj.clone());
            }
        }
        acc = acc.add(term);
    }
    acc
}

/// Logarithmic differentiation for `EX` and symbolic-power `FN`
/// (`spec.md` §4.C): `y = base^exponent`, `y' = y*(exponent'*ln(base) +
/// exponent*base'/base)`.
fn log_diff(t: &Term, var: &str) -> Term {
    let (base, exponent) = match t {
        Term::Exp { base, exponent, .. } => ((**base).clone(), (**exponent).clone()),
        Term::Fn {
            name, args, power, ..
        } => {
            let p = match power {
                Exponent::Symbolic(p) => (**p).clone(),
                Exponent::Rational(r) => Term::Num(r.clone()),
            };
            let arg = args.first().cloned().unwrap_or_else(Term::zero);
            (Term::function(name.clone(), vec![arg]), p)
        }
        _ => return Term::zero(),
    };
    let y = t.clone();
    let base_deriv = differentiate_once(&base, var);
    let exp_deriv = differentiate_once(&exponent, var);
    let ln_base = Term::function("log", vec![base.clone()]);
    let term1 = exp_deriv.mul(ln_base);
    let term2 = exponent.mul(base_deriv).div(base);
    let bracket = term1.add(term2);
    y.mul(bracket)
}

fn atan2_derivative(args: &[Term], mult: &Rational, var: &str) -> Term {
    let y = args[0].clone();
    let x = args[1].clone();
    let dy = differentiate_once(&y, var);
    let dx = differentiate_once(&x, var);
    let denom = x.clone().pow_rational(&Rational::from_int(2)).add(
        y.clone().pow_rational(&Rational::from_int(2)),
    );
    x.mul(dy)
        .sub_term(y.mul(dx))
        .div(denom)
        .mul(Term::Num(mult.clone()))
}

fn chain_rule_unit(name: &str, args: &[Term], mult: Rational, var: &str) -> Term {
    let arg = match args.first() {
        Some(a) => a.clone(),
        None => return Term::zero(),
    };
    let inner_deriv = differentiate_once(&arg, var);
    match deriv_table(name, &arg) {
        Some(outer) => outer.mul(inner_deriv).mul(Term::Num(mult)),
        // Unknown function: `spec.md` §4.C "return diff(arg, wrt) as an
        // unresolved symbolic derivative" — preserved verbatim, including
        // the loss of the outer-function factor.
        None => inner_deriv.mul(Term::Num(mult)),
    }
}

fn sqrt1_minus_u2(u: &Term) -> Term {
    Term::function(
        "sqrt",
        vec![Term::one().sub_term(u.clone().pow_rational(&Rational::from_int(2)))],
    )
}

/// `dF/du` for every function in the derivative table (`spec.md` §4.C).
fn deriv_table(name: &str, u: &Term) -> Option<Term> {
    let two = Rational::from_int(2);
    Some(match name {
        "log" => Term::one().div(u.clone()),
        "log10" => {
            let ln10 = Term::function("log", vec![Term::integer(10)]);
            Term::one().div(u.clone().mul(ln10))
        }
        "sin" => Term::function("cos", vec![u.clone()]),
        "cos" => Term::function("sin", vec![u.clone()]).negate(),
        "tan" => Term::function("sec", vec![u.clone()]).pow_rational(&two),
        "sec" => Term::function("sec", vec![u.clone()]).mul(Term::function("tan", vec![u.clone()])),
        "csc" => Term::function("csc", vec![u.clone()])
            .mul(Term::function("cot", vec![u.clone()]))
            .negate(),
        "cot" => Term::function("csc", vec![u.clone()]).pow_rational(&two).negate(),
        "asin" => Term::one().div(sqrt1_minus_u2(u)),
        "acos" => Term::one().div(sqrt1_minus_u2(u)).negate(),
        "atan" => Term::one().div(Term::one().add(u.clone().pow_rational(&two))),
        "abs" => u.clone().div(Term::function("abs", vec![u.clone()])),
        "parens" => Term::one(),
        "sinh" => Term::function("cosh", vec![u.clone()]),
        "cosh" => Term::function("sinh", vec![u.clone()]),
        "tanh" => Term::function("sech", vec![u.clone()]).pow_rational(&two),
        "sech" => Term::function("sech", vec![u.clone()])
            .mul(Term::function("tanh", vec![u.clone()]))
            .negate(),
        "csch" => Term::function("coth", vec![u.clone()])
            .mul(Term::function("csch", vec![u.clone()]))
            .negate(),
        "coth" => Term::function("csch", vec![u.clone()]).pow_rational(&two).negate(),
        "asinh" => Term::one().div(Term::function(
            "sqrt",
            vec![u.clone().pow_rational(&two).add(Term::one())],
        )),
        "acosh" => Term::one().div(Term::function(
            "sqrt",
            vec![u.clone().pow_rational(&two).sub_term(Term::one())],
        )),
        "atanh" | "acoth" => Term::one().div(Term::one().sub_term(u.clone().pow_rational(&two))),
        "asech" => Term::one()
            .div(u.clone().mul(sqrt1_minus_u2(u)))
            .negate(),
        "acsch" => Term::one()
            .div(Term::function("abs", vec![u.clone()]).mul(Term::function(
                "sqrt",
                vec![u.clone().pow_rational(&two).add(Term::one())],
            )))
            .negate(),
        "asec" => Term::one().div(
            Term::function("abs", vec![u.clone()]).mul(Term::function(
                "sqrt",
                vec![u.clone().pow_rational(&two).sub_term(Term::one())],
            )),
        ),
        "acsc" => Term::one()
            .div(Term::function("abs", vec![u.clone()]).mul(Term::function(
                "sqrt",
                vec![u.clone().pow_rational(&two).sub_term(Term::one())],
            )))
            .negate(),
        "acot" => Term::one().div(Term::one().add(u.clone().pow_rational(&two))).negate(),
        "S" => {
            let pi = Term::symbol("pi");
            Term::function(
                "sin",
                vec![pi.mul(u.clone().pow_rational(&two)).mul(Term::rational(1, 2))],
            )
        }
        "C" => {
            let pi = Term::symbol("pi");
            Term::function(
                "cos",
                vec![pi.mul(u.clone().pow_rational(&two)).mul(Term::rational(1, 2))],
            )
        }
        "Si" => Term::function("sin", vec![u.clone()]).div(u.clone()),
        "Shi" => Term::function("sinh", vec![u.clone()]).div(u.clone()),
        "Ci" => Term::function("cos", vec![u.clone()]).div(u.clone()),
        "Chi" => Term::function("cosh", vec![u.clone()]).div(u.clone()),
        "Ei" => Term::Exp {
            base: Box::new(Term::symbol("e")),
            exponent: Box::new(u.clone()),
            mult: Rational::one(),
        }
        .div(u.clone()),
        "Li" => Term::one().div(Term::function("log", vec![u.clone()])),
        "erf" => {
            let two_over_sqrt_pi = Term::integer(2).div(Term::function("sqrt", vec![Term::symbol("pi")]));
            let neg_u2 = u.clone().pow_rational(&two).negate();
            two_over_sqrt_pi.mul(Term::Exp {
                base: Box::new(Term::symbol("e")),
                exponent: Box::new(neg_u2),
                mult: Rational::one(),
            })
        }
        "sign" => Term::zero(),
        "sinc" => {
            let num = u.clone().mul(Term::function("cos", vec![u.clone()])).sub_term(
                Term::function("sin", vec![u.clone()]),
            );
            num.div(u.clone().pow_rational(&two))
        }
        _ => return None,
    })
}

impl Term {
    pub(crate) fn infinity_sign(&self) -> Option<Sign> {
        match self {
            Term::Infinity(s) => Some(*s),
            _ => None,
        }
    }
}
