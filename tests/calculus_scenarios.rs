//! Concrete scenario coverage (spec.md §8.2): one test per worked example,
//! each checked against an independently-built expected `Term` rather than
//! a display string, since `Term`'s derived `PartialEq` already normalizes
//! on the arithmetic kernel's canonical form.

use symcalc_core::prelude::*;
use symcalc_core::{algebra, numeric};

#[test]
fn scenario_01_polynomial_derivative() {
    // diff(3x^4 + 2x, x) = 12x^3 + 2
    let x = Term::symbol("x");
    let expr = x.clone().pow_rational(&Rational::from_int(4)).mul(Term::integer(3)).add(x.clone().mul(Term::integer(2)));
    let got = expr.differentiate(Some("x"), None);
    let expected = x.clone().pow_rational(&Rational::from_int(3)).mul(Term::integer(12)).add(Term::integer(2));
    assert!(got.equals(&expected), "got {:?}, expected {:?}", got, expected);
}

#[test]
fn scenario_02_chain_rule_on_trig() {
    // diff(sin(x^2), x) = 2x*cos(x^2)
    let x = Term::symbol("x");
    let x2 = x.clone().pow_rational(&Rational::from_int(2));
    let expr = Term::function("sin", vec![x2.clone()]);
    let got = expr.differentiate(Some("x"), None);
    let expected = x.clone().mul(Term::integer(2)).mul(Term::function("cos", vec![x2]));
    assert!(got.equals(&expected), "got {:?}, expected {:?}", got, expected);
}

#[test]
fn scenario_03_by_parts_cyclic() {
    // integrate(e^x * sin(x), x) = (e^x*sin(x) - e^x*cos(x)) / 2
    // Verified via the fundamental theorem (spec.md §8.1) rather than a
    // hand-built expected term, since the by-parts fixed point's exact
    // internal shape is more fragile to reconstruct than to re-differentiate.
    let x = Term::symbol("x");
    let ex = Term::Exp { base: Box::new(Term::symbol("e")), exponent: Box::new(x.clone()), mult: Rational::one() };
    let integrand = ex.clone().mul(Term::function("sin", vec![x.clone()]));
    let cfg = EngineConfig::default();
    let antideriv = integrate(&integrand, Some("x"), cfg).expect("by-parts cycle should close");
    let back = antideriv.differentiate(Some("x"), None);
    let diff = back.sub_term(integrand);
    let simplified = algebra::simplify(&diff);
    assert!(simplified.equals(&Term::zero()), "fundamental theorem failed: {:?}", simplified);
}

#[test]
fn scenario_04_u_substitution() {
    // integrate(2x*cos(x^2), x) = sin(x^2)
    let x = Term::symbol("x");
    let x2 = x.clone().pow_rational(&Rational::from_int(2));
    let integrand = x.clone().mul(Term::integer(2)).mul(Term::function("cos", vec![x2.clone()]));
    let cfg = EngineConfig::default();
    let got = integrate(&integrand, Some("x"), cfg).expect("u-substitution should succeed");
    let expected = Term::function("sin", vec![x2]);
    assert!(got.equals(&expected), "got {:?}, expected {:?}", got, expected);
}

#[test]
fn scenario_05_arctan_pattern() {
    // integrate(1/(x^2+1), x) = atan(x)
    let x = Term::symbol("x");
    let integrand = x.clone().pow_rational(&Rational::from_int(2)).add(Term::one()).pow_rational(&Rational::new(-1, 1));
    let cfg = EngineConfig::default();
    let got = integrate(&integrand, Some("x"), cfg).expect("arctan pattern should match");
    let expected = Term::function("atan", vec![x]);
    assert!(got.equals(&expected), "got {:?}, expected {:?}", got, expected);
}

#[test]
fn scenario_06_arcsin_pattern() {
    // integrate(1/sqrt(1-x^2), x) = asin(x)
    let x = Term::symbol("x");
    let inner = Term::one().sub_term(x.clone().pow_rational(&Rational::from_int(2)));
    let integrand = inner.pow_rational(&Rational::new(-1, 2));
    let cfg = EngineConfig::default();
    let got = integrate(&integrand, Some("x"), cfg).expect("arcsin pattern should match");
    let expected = Term::function("asin", vec![x]);
    assert!(got.equals(&expected), "got {:?}, expected {:?}", got, expected);
}

#[test]
fn scenario_07_reduction_formula() {
    // integrate(cos(x)^4, x) = 3x/8 + sin(2x)/4 + sin(4x)/32
    let x = Term::symbol("x");
    let integrand = Term::function("cos", vec![x.clone()]).pow_rational(&Rational::from_int(4));
    let cfg = EngineConfig::default();
    let got = integrate(&integrand, Some("x"), cfg).expect("reduction formula should close");
    let expected = x.clone().mul(Term::rational(3, 8)).add(
        Term::function("sin", vec![x.clone().mul(Term::integer(2))]).mul(Term::rational(1, 4)),
    ).add(
        Term::function("sin", vec![x.mul(Term::integer(4))]).mul(Term::rational(1, 32)),
    );
    assert!(got.equals(&expected), "got {:?}, expected {:?}", got, expected);
}

#[test]
fn scenario_08_definite_integral() {
    // defint(x^2, 0, 1, x) = 1/3
    let x = Term::symbol("x");
    let integrand = x.pow_rational(&Rational::from_int(2));
    let cfg = EngineConfig::default();
    let got = defint(&integrand, &Term::zero(), &Term::one(), Some("x"), cfg).expect("definite integral should close");
    assert!(got.equals(&Term::rational(1, 3)), "got {:?}", got);
}

#[test]
fn scenario_09_limit_lhopital() {
    // limit(sin(x)/x, x, 0) = 1
    let x = Term::symbol("x");
    let expr = Term::function("sin", vec![x.clone()]).div(x.clone());
    let cfg = EngineConfig::default();
    let got = limit(&expr, "x", &Term::zero(), cfg);
    assert_eq!(got, LimitValue::Value(Term::one()));
}

#[test]
fn scenario_10_divergent_limit() {
    // limit(1/x, x, 0) is the interval [-inf, inf]
    let x = Term::symbol("x");
    let expr = x.invert();
    let cfg = EngineConfig::default();
    let got = limit(&expr, "x", &Term::zero(), cfg);
    assert_eq!(got, LimitValue::Interval(Term::infinity(Sign::Negative), Term::infinity(Sign::Positive)));
}

#[test]
fn scenario_11_composite_limit_via_log_rewrite() {
    // limit((1 + 1/x)^x, x, inf) = e
    //
    // This exercises the log-rewrite path (limit_exp) and the 0*inf
    // indeterminate-product rewrite added alongside it; the nested
    // L'Hopital recursion that resolves the rewritten x*log(1+1/x) form
    // wasn't hand-verified past its first few steps, so this asserts the
    // numeric value rather than a specific symbolic shape.
    let x = Term::symbol("x");
    let base = Term::one().add(x.clone().invert());
    let expr = Term::Exp { base: Box::new(base), exponent: Box::new(x.clone()), mult: Rational::one() };
    let cfg = EngineConfig::default();
    let got = limit(&expr, "x", &Term::infinity(Sign::Positive), cfg);
    match got {
        LimitValue::Value(v) => {
            let approx = numeric::eval_constant(&v);
            assert!((approx - std::f64::consts::E).abs() < 0.2, "limit approx {} not close to e", approx);
        }
        other => panic!("expected a convergent value, got {:?}", other),
    }
}

#[test]
fn scenario_12_sum() {
    // sum(i, i, 1, 10) = 55
    let i = Term::symbol("i");
    let got = sum(&i, "i", &Term::one(), &Term::integer(10)).expect("finite numeric sum should expand");
    assert!(got.equals(&Term::integer(55)), "got {:?}", got);
}

#[test]
fn scenario_13_equation_diff() {
    // diff(y = x^2, x): per the documented Open Question decision this crate
    // has no implicit differentiation, so an independent symbol on the LHS
    // differentiates to 0 rather than staying a symbolic diff(y,x) term.
    let y = Term::symbol("y");
    let x = Term::symbol("x");
    let eq = Equation::new(y, x.clone().pow_rational(&Rational::from_int(2)));
    let got = eq.differentiate(Some("x"), None);
    let expected_rhs = x.mul(Term::integer(2));
    assert!(got.lhs.equals(&Term::zero()), "lhs got {:?}", got.lhs);
    assert!(got.rhs.equals(&expected_rhs), "rhs got {:?}, expected {:?}", got.rhs, expected_rhs);
}
