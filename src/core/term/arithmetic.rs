//! The minimal-but-real arithmetic kernel (`spec.md` §1 "Out of scope"
//! lists `multiply/add/subtract/divide/pow/expand` as an external
//! collaborator — but the calculus rules in `crate::calculus` have nothing
//! to call without *some* implementation, so this module provides a modest
//! one: constant folding, like-term/like-factor collection via the
//! `TermMap` fingerprint, and unit power/multiplier elision. It does not
//! attempt general simplification (trig identities, radical denesting,
//! …) — that's `crate::algebra::simplify`'s job, built on top of this.
//!
//! Grounded on the smart-constructor idiom in
//! `mathhook-core/src/core/expression/operations.rs` (`Expression::add`/
//! `Expression::mul` fold and flatten eagerly at construction time rather
//! than leaving that to a later simplification pass).

use crate::core::number::Rational;
use crate::core::term::{Exponent, Sign, Term, TermMap};

impl Term {
    /// `add(other)`: exact sum, with like-term collection.
    pub fn add(self, other: Term) -> Term {
        if self.is_zero_num() {
            return other;
        }
        if other.is_zero_num() {
            return self;
        }
        if let (Term::Num(a), Term::Num(b)) = (&self, &other) {
            return Term::Num(a.clone() + b.clone());
        }

        let mut terms: TermMap = TermMap::new();
        let mut mult = Rational::zero();
        for t in [self, other] {
            Self::flatten_into_sum(t, &mut terms, &mut mult);
        }
        Term::build_sum(terms, mult)
    }

    fn is_zero_num(&self) -> bool {
        matches!(self, Term::Num(r) if r.is_zero())
    }

    fn flatten_into_sum(t: Term, terms: &mut TermMap, mult: &mut Rational) {
        match t {
            Term::Num(r) => *mult = mult.clone() + r,
            Term::Sum {
                terms: inner_terms,
                power,
                mult: inner_mult,
            } if power.is_one() => {
                for (_, child) in inner_terms {
                    Self::merge_summand(child.scaled(inner_mult.clone()), terms);
                }
            }
            other => Self::merge_summand(other, terms),
        }
    }

    fn merge_summand(t: Term, terms: &mut TermMap) {
        let key = t.fingerprint();
        match terms.remove(&key) {
            Some(existing) => {
                let combined_mult = existing.multiplier() + t.multiplier();
                let mut merged = t.to_unit_multiplier();
                merged.set_multiplier(combined_mult);
                if !merged.multiplier().is_zero() {
                    terms.insert(key, merged);
                }
            }
            None => {
                if !t.multiplier().is_zero() {
                    terms.insert(key, t);
                }
            }
        }
    }

    fn build_sum(mut terms: TermMap, mult: Rational) -> Term {
        if !mult.is_zero() {
            Self::merge_summand(Term::Num(mult), &mut terms);
        }
        match terms.len() {
            0 => Term::zero(),
            1 => {
                let (_, only) = terms.into_iter().next().unwrap();
                only
            }
            _ => Term::try_promote_poly(&terms).unwrap_or(Term::Sum {
                terms,
                power: Rational::one(),
                mult: Rational::one(),
            }),
        }
    }

    /// Detects the common case of a polynomial in a single symbol (every
    /// summand is `Sym{name=v}` to a non-negative integer power, or a bare
    /// constant folded separately) and promotes it to group `PL`
    /// (`spec.md` §3.1). Falls back to a plain `Sum` (group `CP`) whenever
    /// the base varies or an exponent isn't a non-negative integer.
    fn try_promote_poly(terms: &TermMap) -> Option<Term> {
        let mut base_name: Option<&str> = None;
        let mut coeffs = std::collections::BTreeMap::new();
        for t in terms.values() {
            match t {
                Term::Sym { name, power, mult } => {
                    let r = power.as_rational()?;
                    if !r.is_integer() || r.is_negative() {
                        return None;
                    }
                    match base_name {
                        Some(existing) if existing != name => return None,
                        _ => base_name = Some(name),
                    }
                    let exp = r.to_i64()?;
                    coeffs.insert(exp, mult.clone());
                }
                _ => return None,
            }
        }
        let base_name = base_name?;
        Some(Term::Poly {
            base: Box::new(Term::symbol(base_name)),
            coeffs,
            mult: Rational::one(),
        })
    }

    /// `subtract(other)`.
    pub fn sub_term(self, other: Term) -> Term {
        self.add(other.negate())
    }

    /// `multiply(other)`: exact product, with like-base exponent collection.
    pub fn mul(self, other: Term) -> Term {
        if self.is_zero_num() || other.is_zero_num() {
            return Term::zero();
        }
        if self.is_one_num() {
            return other;
        }
        if other.is_one_num() {
            return self;
        }
        if let (Term::Num(a), Term::Num(b)) = (&self, &other) {
            return Term::Num(a.clone() * b.clone());
        }

        let mut factors: TermMap = TermMap::new();
        let mut mult = Rational::one();
        for t in [self, other] {
            Self::flatten_into_product(t, &mut factors, &mut mult);
        }
        Term::build_product(factors, mult)
    }

    fn is_one_num(&self) -> bool {
        matches!(self, Term::Num(r) if r.is_one())
    }

    fn flatten_into_product(t: Term, factors: &mut TermMap, mult: &mut Rational) {
        match t {
            Term::Num(r) => *mult = mult.clone() * r,
            Term::Prod {
                factors: inner,
                power,
                mult: inner_mult,
            } if power.is_one() => {
                *mult = mult.clone() * inner_mult;
                for (_, child) in inner {
                    Self::merge_factor(child, factors);
                }
            }
            other => {
                let m = other.multiplier();
                *mult = mult.clone() * m;
                Self::merge_factor(other.to_unit_multiplier(), factors);
            }
        }
    }

    fn merge_factor(t: Term, factors: &mut TermMap) {
        let base_key = t.base_fingerprint();
        match factors.remove(&base_key) {
            Some(existing) => match Term::combine_like_bases(existing, t) {
                Some(combined) => {
                    if !combined.is_one_num() {
                        factors.insert(base_key, combined);
                    }
                }
                None => {}
            },
            None => {
                factors.insert(base_key, t);
            }
        }
    }

    /// A product factor's fingerprint ignoring its exponent, so `x^2 * x^3`
    /// merge into `x^5`.
    fn base_fingerprint(&self) -> String {
        match self {
            Term::Sym { name, .. } => format!("S:{name}"),
            Term::Fn { name, args, .. } => {
                format!("F:{name}({})", args.iter().map(|a| a.text()).collect::<Vec<_>>().join(","))
            }
            other => other.fingerprint(),
        }
    }

    fn combine_like_bases(a: Term, b: Term) -> Option<Term> {
        match (a, b) {
            (
                Term::Sym {
                    name,
                    power: pa,
                    mult: ma,
                },
                Term::Sym { power: pb, mult: mb, .. },
            ) => {
                let combined_power = Term::add_exponents(pa, pb)?;
                Some(Term::Sym {
                    name,
                    power: combined_power,
                    mult: ma * mb,
                })
            }
            (
                Term::Fn {
                    name,
                    args,
                    power: pa,
                    mult: ma,
                },
                Term::Fn { power: pb, mult: mb, .. },
            ) => {
                let combined_power = Term::add_exponents(pa, pb)?;
                Some(Term::Fn {
                    name,
                    args,
                    power: combined_power,
                    mult: ma * mb,
                })
            }
            _ => None,
        }
    }

    fn add_exponents(a: Exponent, b: Exponent) -> Option<Exponent> {
        match (a, b) {
            (Exponent::Rational(ra), Exponent::Rational(rb)) => {
                Some(Exponent::Rational(ra + rb))
            }
            _ => None,
        }
    }

    fn build_product(factors: TermMap, mult: Rational) -> Term {
        if mult.is_zero() {
            return Term::zero();
        }
        match factors.len() {
            0 => Term::Num(mult),
            1 => {
                let (_, mut only) = factors.into_iter().next().unwrap();
                let m = only.multiplier() * mult;
                only.set_multiplier(m);
                only
            }
            _ => Term::Prod {
                factors,
                power: Exponent::one(),
                mult,
            },
        }
    }

    /// `pow(exponent)`: exact power when the exponent is rational; falls
    /// into group `EX` otherwise (`spec.md` §3.1).
    pub fn pow(self, exponent: Term) -> Term {
        match exponent {
            Term::Num(r) => self.pow_rational(&r),
            other => {
                if self.contains_free_vars() || other.contains_free_vars() {
                    Term::Exp {
                        base: Box::new(self.to_unit_multiplier().scaled(Rational::one())),
                        exponent: Box::new(other),
                        mult: self.multiplier(),
                    }
                } else {
                    self.pow_rational(&Rational::one())
                }
            }
        }
    }

    fn contains_free_vars(&self) -> bool {
        self.first_free_variable().is_some()
    }

    pub fn pow_rational(self, r: &Rational) -> Term {
        if r.is_zero() {
            return Term::one();
        }
        if r.is_one() {
            return self;
        }
        match self {
            Term::Num(base) => {
                if r.is_integer() {
                    let n = r.to_i64().unwrap_or(0);
                    Term::Num(int_pow(base, n))
                } else if let Some(root) = base.sqrt_exact() {
                    if *r == Rational::new(1, 2) {
                        Term::Num(root)
                    } else {
                        Term::Exp {
                            base: Box::new(Term::Num(base)),
                            exponent: Box::new(Term::Num(r.clone())),
                            mult: Rational::one(),
                        }
                    }
                } else {
                    Term::Exp {
                        base: Box::new(Term::Num(base)),
                        exponent: Box::new(Term::Num(r.clone())),
                        mult: Rational::one(),
                    }
                }
            }
            Term::Sym { name, power, mult } => {
                let new_power = match power {
                    Exponent::Rational(p) => Exponent::Rational(p * r.clone()),
                    Exponent::Symbolic(p) => Exponent::Symbolic(Box::new(p.mul(Term::Num(r.clone())))),
                };
                let new_mult = if r.is_integer() {
                    int_pow(mult, r.to_i64().unwrap_or(1))
                } else {
                    mult
                };
                Term::Sym {
                    name,
                    power: new_power,
                    mult: new_mult,
                }
            }
            Term::Fn {
                name,
                args,
                power,
                mult,
            } => {
                let new_power = match power {
                    Exponent::Rational(p) => Exponent::Rational(p * r.clone()),
                    Exponent::Symbolic(p) => Exponent::Symbolic(Box::new(p.mul(Term::Num(r.clone())))),
                };
                let new_mult = if r.is_integer() {
                    int_pow(mult, r.to_i64().unwrap_or(1))
                } else {
                    mult
                };
                Term::Fn {
                    name,
                    args,
                    power: new_power,
                    mult: new_mult,
                }
            }
            Term::Prod {
                factors,
                power,
                mult,
            } => {
                let new_power = match power {
                    Exponent::Rational(p) => Exponent::Rational(p * r.clone()),
                    other => other,
                };
                let new_mult = if r.is_integer() {
                    int_pow(mult, r.to_i64().unwrap_or(1))
                } else {
                    mult
                };
                Term::Prod {
                    factors,
                    power: new_power,
                    mult: new_mult,
                }
            }
            Term::Sum { terms, power, mult } => {
                let new_power = power * r.clone();
                let new_mult = if r.is_integer() {
                    int_pow(mult, r.to_i64().unwrap_or(1))
                } else {
                    mult
                };
                Term::Sum {
                    terms,
                    power: new_power,
                    mult: new_mult,
                }
            }
            Term::Infinity(sign) => {
                if r.is_negative() {
                    Term::zero()
                } else if r.is_integer() {
                    let flips = r.to_i64().unwrap_or(0) % 2 != 0;
                    let result_sign = if sign == Sign::Negative && flips { Sign::Negative } else { Sign::Positive };
                    Term::infinity(result_sign)
                } else {
                    Term::infinity(Sign::Positive)
                }
            }
            other => Term::Exp {
                base: Box::new(other),
                exponent: Box::new(Term::Num(r.clone())),
                mult: Rational::one(),
            },
        }
    }

    /// `divide(other)`: `self * other^-1`.
    pub fn div(self, other: Term) -> Term {
        self.mul(other.invert())
    }

    pub fn invert(self) -> Term {
        self.pow_rational(&Rational::new(-1, 1))
    }

    /// `expand()`: distribute products over sums, and integer powers of
    /// sums, into a flat `Sum`. This is a real (if modest) expander — it
    /// handles `(a+b)*(c+d)` and `(a+b)^n` for small non-negative integer
    /// `n`; anything else returns `self` unchanged, matching the spec's
    /// framing of `expand` as a black-box service this crate merely needs
    /// *a* working instance of (`spec.md` §1).
    pub fn expand(self) -> Term {
        match self {
            Term::Sum { terms, power, mult } if power.is_one() => {
                let mut out = Term::zero();
                for t in terms.values() {
                    out = out.add(t.clone().expand());
                }
                out.scaled(mult)
            }
            Term::Sum { terms, power, mult } if power.is_integer() && !power.is_negative() => {
                let n = power.to_i64().unwrap_or(1);
                let base: Vec<Term> = terms.values().cloned().collect();
                let mut acc = Term::one();
                for _ in 0..n {
                    acc = Term::expand_product(acc, Term::Sum {
                        terms: terms.clone(),
                        power: Rational::one(),
                        mult: Rational::one(),
                    });
                }
                acc.scaled(mult)
            }
            Term::Prod { factors, power, mult } if power.is_one() => {
                let mut acc = Term::one();
                for f in factors.values() {
                    acc = Term::expand_product(acc, f.clone().expand());
                }
                acc.scaled(mult)
            }
            other => other,
        }
    }

    fn expand_product(a: Term, b: Term) -> Term {
        match (&a, &b) {
            (Term::Sum { terms: ta, mult: ma, .. }, Term::Sum { terms: tb, mult: mb, .. }) => {
                let mut out = Term::zero();
                for x in ta.values() {
                    for y in tb.values() {
                        out = out.add(x.clone().mul(y.clone()));
                    }
                }
                out.scaled(ma.clone() * mb.clone())
            }
            (Term::Sum { terms, mult, .. }, other) | (other, Term::Sum { terms, mult, .. }) => {
                let mut out = Term::zero();
                for x in terms.values() {
                    out = out.add(x.clone().mul(other.clone()));
                }
                out.scaled(mult.clone())
            }
            _ => a.mul(b),
        }
    }
}

impl Exponent {
    pub(crate) fn is_one(&self) -> bool {
        matches!(self, Exponent::Rational(r) if r.is_one())
    }
    fn is_integer(&self) -> bool {
        matches!(self, Exponent::Rational(r) if r.is_integer())
    }
    fn is_negative(&self) -> bool {
        matches!(self, Exponent::Rational(r) if r.is_negative())
    }
    fn to_i64(&self) -> Option<i64> {
        match self {
            Exponent::Rational(r) => r.to_i64(),
            Exponent::Symbolic(_) => None,
        }
    }
}

fn int_pow(base: Rational, n: i64) -> Rational {
    if n == 0 {
        return Rational::one();
    }
    let neg = n < 0;
    let mut acc = Rational::one();
    for _ in 0..n.unsigned_abs() {
        acc = acc * base.clone();
    }
    if neg {
        acc.invert().unwrap_or_else(Rational::zero)
    } else {
        acc
    }
}
