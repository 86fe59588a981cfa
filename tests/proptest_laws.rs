//! Randomized checks of the universal laws (spec.md §8.1) over a range of
//! scalars, complementing the fixed-sample checks in
//! `tests/properties_tests/derivative_laws.rs`.

use proptest::prelude::*;
use symcalc_core::algebra;
use symcalc_core::prelude::*;

proptest! {
    #[test]
    fn derivative_linearity_holds_for_any_integer_scalar(k in -20i64..20) {
        let x = Term::symbol("x");
        let f = x.clone().pow_rational(&Rational::from_int(3));
        let g = Term::function("sin", vec![x.clone()]);

        let lhs = f.clone().mul(Term::integer(k)).add(g.clone()).differentiate(Some("x"), None);
        let rhs = f.differentiate(Some("x"), None).mul(Term::integer(k)).add(g.differentiate(Some("x"), None));
        let diff = algebra::simplify(&lhs.sub_term(rhs));
        prop_assert!(diff.equals(&Term::zero()));
    }

    #[test]
    fn sum_numeric_expansion_matches_gauss_formula(n in 1i64..150) {
        let i = Term::symbol("i");
        let got = sum(&i, "i", &Term::one(), &Term::integer(n)).expect("small numeric sum should expand");
        let expected = Term::integer(n * (n + 1) / 2);
        prop_assert!(got.equals(&expected));
    }
}
