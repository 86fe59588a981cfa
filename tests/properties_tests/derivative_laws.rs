//! Linearity and chain-rule laws (spec.md §8.1).

use symcalc_core::algebra;
use symcalc_core::prelude::*;

#[test]
fn linearity_holds_across_a_sample_of_scalars_and_terms() {
    let x = Term::symbol("x");
    let pairs: Vec<(Term, Term, i64)> = vec![
        (x.clone().pow_rational(&Rational::from_int(3)), Term::function("sin", vec![x.clone()]), 2),
        (Term::function("cos", vec![x.clone()]), x.clone(), -3),
        (x.clone().pow_rational(&Rational::from_int(2)), Term::function("log", vec![x.clone()]), 5),
    ];

    for (f, g, k) in pairs {
        let lhs = f.clone().mul(Term::integer(k)).add(g.clone()).differentiate(Some("x"), None);
        let rhs = f.differentiate(Some("x"), None).mul(Term::integer(k)).add(g.differentiate(Some("x"), None));
        let diff = algebra::simplify(&lhs.sub_term(rhs));
        assert!(diff.equals(&Term::zero()), "linearity failed: {:?}", diff);
    }
}

#[test]
fn chain_rule_holds_for_a_sample_of_outer_functions() {
    // diff(F(g(x)), x) == F'(g(x)) * diff(g(x), x) for a representative
    // sample spanning the trig, log, and exponential families in the
    // derivative table.
    let x = Term::symbol("x");
    let inner = x.clone().pow_rational(&Rational::from_int(2)).add(Term::one());
    let inner_deriv = inner.clone().differentiate(Some("x"), None);

    let cases: Vec<(Term, Term)> = vec![
        (
            Term::function("sin", vec![inner.clone()]),
            Term::function("cos", vec![inner.clone()]).mul(inner_deriv.clone()),
        ),
        (
            Term::function("cos", vec![inner.clone()]),
            Term::function("sin", vec![inner.clone()]).negate().mul(inner_deriv.clone()),
        ),
        (
            Term::function("log", vec![inner.clone()]),
            Term::one().div(inner.clone()).mul(inner_deriv.clone()),
        ),
        (
            Term::function("atan", vec![inner.clone()]),
            Term::one().div(Term::one().add(inner.clone().pow_rational(&Rational::from_int(2)))).mul(inner_deriv.clone()),
        ),
        (
            Term::Exp { base: Box::new(Term::symbol("e")), exponent: Box::new(inner.clone()), mult: Rational::one() },
            Term::Exp { base: Box::new(Term::symbol("e")), exponent: Box::new(inner.clone()), mult: Rational::one() }.mul(inner_deriv.clone()),
        ),
    ];

    for (outer, expected) in cases {
        let got = outer.differentiate(Some("x"), None);
        let diff = algebra::simplify(&got.sub_term(expected));
        assert!(diff.equals(&Term::zero()), "chain rule failed for {:?}: residual {:?}", outer, diff);
    }
}
