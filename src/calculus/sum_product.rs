//! `sum`/`product` (`spec.md` §4.G): exact-rational accumulation over
//! numeric bounds, numeric (`f64`) accumulation past the 200-term cutoff,
//! symbolic placeholder otherwise.
//!
//! **Preserved defect (`spec.md` §9):** `sum`'s end-bound extractor only
//! accepts a literal `Term::Num`; `product`'s extractor instead reads
//! `end.multiplier()` unconditionally, so a non-`Num` `end` with an
//! integer-valued multiplier (e.g. a bare symbol with `mult = 5`) silently
//! iterates for `product` while `sum` falls back to the symbolic
//! placeholder for the identical bound. See `known_defect_sum_product_end_bound`.

use crate::config::{self, EngineConfig};
use crate::core::number::Rational;
use crate::core::term::Term;
use crate::error::CalcResult;
use crate::numeric;

fn placeholder(name: &str, f: &Term, index: &str, start: &Term, end: &Term) -> Term {
    Term::function(name, vec![f.clone(), Term::symbol(index), start.clone(), end.clone()])
}

fn start_bound(start: &Term) -> Option<i64> {
    match start {
        Term::Num(r) => r.to_i64(),
        _ => None,
    }
}

/// `sum`'s bound extractor: only a literal `Term::Num` counts.
fn sum_end_bound(end: &Term) -> Option<i64> {
    match end {
        Term::Num(r) => r.to_i64(),
        _ => None,
    }
}

/// `product`'s bound extractor — the preserved defect: reads the
/// multiplier of *any* term shape, not just `Term::Num`.
fn product_end_bound(end: &Term) -> Option<i64> {
    let m = end.multiplier();
    m.to_i64()
}

fn iterate<F: Fn(Term, Term) -> Term>(
    f: &Term,
    index: &str,
    lo: i64,
    hi: i64,
    identity: Term,
    combine: F,
) -> Term {
    let mut acc = identity;
    for i in lo..=hi {
        let term = f.sub(&Term::symbol(index), &Term::integer(i));
        acc = combine(acc, term);
    }
    acc
}

fn iterate_numeric<F: Fn(f64, f64) -> f64>(
    f: &Term,
    index: &str,
    lo: i64,
    hi: i64,
    identity: f64,
    combine: F,
) -> f64 {
    let mut acc = identity;
    for i in lo..=hi {
        let term = f.sub(&Term::symbol(index), &Term::integer(i));
        acc = combine(acc, numeric::eval_constant(&term));
    }
    acc
}

pub fn sum(f: &Term, index: &str, start: &Term, end: &Term) -> CalcResult<Term> {
    accumulate(
        config::function_names::SUM,
        f,
        index,
        start,
        end,
        Term::zero(),
        Term::add,
        0.0,
        |a, b| a + b,
        sum_end_bound,
    )
}

/// Preserves the source's `end`-bound-extraction defect verbatim.
pub fn product(f: &Term, index: &str, start: &Term, end: &Term) -> CalcResult<Term> {
    accumulate(
        config::function_names::PRODUCT,
        f,
        index,
        start,
        end,
        Term::one(),
        Term::mul,
        1.0,
        |a, b| a * b,
        product_end_bound,
    )
}

#[allow(clippy::too_many_arguments)]
fn accumulate(
    name: &str,
    f: &Term,
    index: &str,
    start: &Term,
    end: &Term,
    identity: Term,
    combine: fn(Term, Term) -> Term,
    numeric_identity: f64,
    numeric_combine: fn(f64, f64) -> f64,
    end_bound: fn(&Term) -> Option<i64>,
) -> CalcResult<Term> {
    // `IndexMustBeSymbol` (`spec.md` §4.G) is enforced by this API's own
    // shape: `index` is a plain name, not a `Term`, so a non-symbol index
    // can't reach this function at all.
    let lo = start_bound(start);
    let hi = end_bound(end);
    match (lo, hi) {
        (Some(lo), Some(hi)) if hi >= lo => {
            if (hi - lo) >= config::NUMERIC_EXPANSION_THRESHOLD {
                let value = iterate_numeric(f, index, lo, hi, numeric_identity, numeric_combine);
                Ok(Term::Num(Rational::from_f64_approx(value)))
            } else {
                Ok(iterate(f, index, lo, hi, identity, combine))
            }
        }
        (Some(lo), Some(hi)) if hi < lo => Ok(identity),
        _ => Ok(placeholder(name, f, index, start, end)),
    }
}
