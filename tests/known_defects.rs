//! Tests documenting the three behaviors spec.md §9 says to preserve
//! verbatim rather than "fix" — each test pins the defective behavior so a
//! future change that silently corrects it is caught as a regression here,
//! not discovered downstream.

use symcalc_core::core::term::classify::in_h_trig;
use symcalc_core::prelude::*;

#[test]
fn known_defect_h_trig_includes_inverse_hyperbolic_names() {
    // `in_h_trig` is meant to classify sinh/cosh/tanh, but also carries the
    // inverse-hyperbolic names alongside them (spec.md §9).
    for name in ["sinh", "cosh", "tanh"] {
        assert!(in_h_trig(name), "{name} should be in_h_trig");
    }
    for name in ["acsch", "asech", "acoth"] {
        assert!(in_h_trig(name), "preserved defect: {name} should still be in_h_trig");
    }
}

#[test]
fn known_defect_sum_product_end_bound_asymmetry() {
    // A non-Num `end` with an integer-valued multiplier: `product` reads
    // its bare multiplier and iterates; `sum` only accepts a literal
    // `Term::Num` and falls back to the symbolic placeholder instead.
    let i = Term::symbol("i");
    let body = i.clone();
    let start = Term::one();
    // A bare symbol with multiplier 3, not a literal `Term::Num` — only
    // `product_end_bound` reads through to the multiplier.
    let non_num_end = Term::symbol("n").mul(Term::integer(3));
    let product_got = product(&body, "i", &start, &non_num_end);
    assert!(product_got.is_ok(), "preserved defect: product should iterate using the bare multiplier");
    assert!(product_got.unwrap().equals(&Term::integer(6)), "product(i,1,3) should give 3! = 6");

    let sum_got = sum(&body, "i", &start, &non_num_end);
    assert!(sum_got.is_ok());
    assert!(sum_got.unwrap().contains_function("sum"), "preserved defect: sum should fall back to the symbolic placeholder for the same bound");
}

#[test]
fn known_defect_cos_sin_even_powers_mis_substitutes() {
    // cos(x)^2 * sin(x)^2: both powers are even, so the correct closed form
    // needs a half-angle reduction, but the preserved `cosAsinAtransform`
    // defect (spec.md §9) dispatches purely on sin's power parity and
    // substitutes u = sin(x) as though sin's power were odd, regardless of
    // cos's. The antiderivative it produces therefore fails the fundamental
    // theorem — that's the defect, pinned here rather than "fixed".
    let x = Term::symbol("x");
    let cfg = EngineConfig::default();
    let integrand = Term::function("sin", vec![x.clone()])
        .pow_rational(&Rational::from_int(2))
        .mul(Term::function("cos", vec![x.clone()]).pow_rational(&Rational::from_int(2)));
    let antideriv = integrate(&integrand, Some("x"), cfg).expect("the defective rule still produces *a* closed form");
    let back = antideriv.differentiate(Some("x"), None);
    let residual = symcalc_core::algebra::simplify(&back.sub_term(integrand));
    assert!(!residual.equals(&Term::zero()), "preserved defect: even/even power reduction should NOT satisfy the fundamental theorem");
}
