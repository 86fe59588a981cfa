//! Direct-substitution, L'Hopital, and depth-cap laws (spec.md §8.1).

use symcalc_core::prelude::*;

#[test]
fn direct_substitution_holds_when_f_of_c_is_finite() {
    let x = Term::symbol("x");
    let cfg = EngineConfig::default();
    let cases: Vec<(Term, Term, Term)> = vec![
        (x.clone().pow_rational(&Rational::from_int(2)).add(Term::one()), Term::integer(3), Term::integer(10)),
        (Term::function("sin", vec![x.clone()]), Term::zero(), Term::zero()),
        (x.clone().mul(Term::integer(2)), Term::integer(5), Term::integer(10)),
    ];
    for (f, c, expected) in cases {
        let got = limit(&f, "x", &c, cfg);
        assert_eq!(got, LimitValue::Value(expected), "direct substitution failed for {:?} at {:?}", f, c);
    }
}

#[test]
fn lhopital_reduces_an_indeterminate_quotient_in_one_step() {
    // sin(x)/x at 0 is 0/0; one L'Hopital step is cos(x)/1, which
    // substitutes directly to 1.
    let x = Term::symbol("x");
    let cfg = EngineConfig::default();
    let f = Term::function("sin", vec![x.clone()]);
    let g = x.clone();
    let got = limit(&f.div(g), "x", &Term::zero(), cfg);
    assert_eq!(got, LimitValue::Value(Term::one()));
}

#[test]
fn depth_cap_surfaces_a_divergent_interval_instead_of_looping_forever() {
    // A config with max_lim_depth = 0 forces the very first call past its
    // cap, regardless of what the limit actually is.
    let x = Term::symbol("x");
    let mut cfg = EngineConfig::default();
    cfg.max_lim_depth = 0;
    let f = Term::function("sin", vec![x.clone()]).div(x);
    let got = limit(&f, "x", &Term::zero(), cfg);
    assert_eq!(got, LimitValue::diverges());
}
