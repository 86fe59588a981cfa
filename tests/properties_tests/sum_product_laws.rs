//! Numeric-expansion law for finite sums/products (spec.md §8.1): for
//! integer bounds with `end - start < 200`, the result equals literal
//! accumulation.

use symcalc_core::prelude::*;

#[test]
fn sum_of_squares_matches_literal_accumulation() {
    let i = Term::symbol("i");
    let body = i.pow_rational(&Rational::from_int(2));
    let got = sum(&body, "i", &Term::one(), &Term::integer(5)).expect("small numeric sum should expand");
    // 1 + 4 + 9 + 16 + 25 = 55
    assert!(got.equals(&Term::integer(55)), "got {:?}", got);
}

#[test]
fn product_of_consecutive_integers_matches_literal_accumulation() {
    let i = Term::symbol("i");
    let got = product(&i, "i", &Term::one(), &Term::integer(5)).expect("small numeric product should expand");
    // 5! = 120
    assert!(got.equals(&Term::integer(120)), "got {:?}", got);
}

#[test]
fn empty_range_yields_the_additive_or_multiplicative_identity() {
    let i = Term::symbol("i");
    let sum_got = sum(&i, "i", &Term::integer(5), &Term::one()).expect("empty sum range should still resolve");
    assert!(sum_got.equals(&Term::zero()), "empty sum got {:?}", sum_got);
    let product_got = product(&i, "i", &Term::integer(5), &Term::one()).expect("empty product range should still resolve");
    assert!(product_got.equals(&Term::one()), "empty product got {:?}", product_got);
}
