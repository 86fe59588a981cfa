//! The algebraic term representation (`spec.md` §3, §9).
//!
//! This is the Rust mapping the spec's own Design Notes (§9) prescribe: a
//! tagged union with one variant per discriminant group. Field names below
//! intentionally echo the spec's vocabulary (`mult`, `power`, `fname`/`name`,
//! `args`) so the calculus strategies in `crate::calculus` read against the
//! spec directly.
//!
//! Grounded in shape (not content — the teacher's `Expression` enum models a
//! different, flatter algebra) on `mathhook-core/src/core/expression.rs`'s
//! enum-of-variants style and its `Commutativity`/`Symbol` satellite types.

pub mod arithmetic;
pub mod classify;
pub mod display;
pub mod ops;

use crate::core::number::Rational;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sign of an unsigned/signed infinity (`spec.md` §3.1 `isInfinity`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

/// A term's exponent: either an exact rational power, or — when the
/// exponent itself depends on a variable — a nested term, which is exactly
/// what pushes the whole term into group `EX` (`spec.md` §3.1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Exponent {
    Rational(Rational),
    Symbolic(Box<Term>),
}

impl Exponent {
    pub fn one() -> Self {
        Exponent::Rational(Rational::one())
    }

    pub fn from_i64(n: i64) -> Self {
        Exponent::Rational(Rational::from_int(n))
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Exponent::Symbolic(_))
    }

    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Exponent::Rational(r) => Some(r),
            Exponent::Symbolic(_) => None,
        }
    }
}

/// Structural fingerprint used as the key in `Prod`/`Sum` child maps
/// (`spec.md` §3.1 "symbols: mapping from child-fingerprint to child term").
///
/// A plain `String` key keeps merge-on-insert (like-term collection)
/// trivially deterministic via `BTreeMap`'s ordering, matching the spec's
/// requirement that "key generation [be] deterministic" (`spec.md` §9).
pub type Fingerprint = String;

/// Ordered child map keyed by structural fingerprint.
pub type TermMap = BTreeMap<Fingerprint, Term>;

/// The algebraic term (`spec.md` §3.1).
///
/// | Variant | Group |
/// |---|---|
/// | `Num` | N |
/// | `Sym` | S |
/// | `Fn` | FN |
/// | `Prod` | CB |
/// | `Sum` | CP |
/// | `Poly` | PL |
/// | `Exp` | EX |
/// | `Infinity` | (isInfinity) |
///
/// `Poly` additionally carries `mult` (the spec's literal template omits it,
/// but §3.2's invariant — "its multiplier factors out a global rational
/// scalar" — applies uniformly to every composite group, so it is kept here
/// for consistency; see `DESIGN.md`). `Poly.base` is restricted to a
/// non-composite term (typically a bare symbol) in this implementation —
/// the fully general "same base" case from §3.1 degrades to a plain `Sum`
/// here, which is semantically equivalent, just less specialized for
/// partial-fraction dispatch (see `DESIGN.md` Open Questions).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Term {
    /// Group N: a bare numeric constant. No `args`, no `symbols`
    /// (`spec.md` §3.2).
    Num(Rational),

    /// Group S: a symbol/variable, optionally raised to a power.
    Sym {
        name: String,
        power: Exponent,
        mult: Rational,
    },

    /// Group FN: a named function application.
    Fn {
        name: String,
        args: Vec<Term>,
        power: Exponent,
        mult: Rational,
    },

    /// Group CB: a product ("combination") of factors.
    Prod {
        factors: TermMap,
        power: Exponent,
        mult: Rational,
    },

    /// Group CP: a sum ("composite polynomial") of mixed terms.
    Sum {
        terms: TermMap,
        power: Rational,
        mult: Rational,
    },

    /// Group PL: a polynomial in a single base, keyed by integer exponent.
    Poly {
        base: Box<Term>,
        coeffs: BTreeMap<i64, Rational>,
        mult: Rational,
    },

    /// Group EX: a power whose exponent contains a variable.
    Exp {
        base: Box<Term>,
        exponent: Box<Term>,
        mult: Rational,
    },

    /// Signed infinity.
    Infinity(Sign),
}

/// Discriminant tag, exposed for strategies that branch on shape
/// (`spec.md` §3.1 `group`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Group {
    N,
    S,
    P,
    PL,
    CP,
    CB,
    FN,
    EX,
}

impl Term {
    // ---- smart constructors (spec.md §4.J) ----------------------------

    pub fn integer(n: i64) -> Term {
        Term::Num(Rational::from_int(n))
    }

    pub fn rational(num: i64, den: i64) -> Term {
        Term::Num(Rational::new(num, den))
    }

    pub fn zero() -> Term {
        Term::integer(0)
    }

    pub fn one() -> Term {
        Term::integer(1)
    }

    pub fn symbol(name: impl Into<String>) -> Term {
        Term::Sym {
            name: name.into(),
            power: Exponent::one(),
            mult: Rational::one(),
        }
    }

    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Term {
        Term::Fn {
            name: name.into(),
            args,
            power: Exponent::one(),
            mult: Rational::one(),
        }
    }

    pub fn infinity(sign: Sign) -> Term {
        Term::Infinity(sign)
    }

    // ---- group / accessors (spec.md §4.A) ------------------------------

    pub fn group(&self) -> Group {
        match self {
            Term::Num(_) => Group::N,
            Term::Sym { .. } => Group::S,
            Term::Fn { .. } => Group::FN,
            Term::Prod { .. } => Group::CB,
            Term::Sum { .. } => Group::CP,
            Term::Poly { .. } => Group::PL,
            Term::Exp { .. } => Group::EX,
            Term::Infinity(_) => Group::P,
        }
    }

    pub fn multiplier(&self) -> Rational {
        match self {
            Term::Num(r) => r.clone(),
            Term::Sym { mult, .. }
            | Term::Fn { mult, .. }
            | Term::Prod { mult, .. }
            | Term::Sum { mult, .. }
            | Term::Poly { mult, .. }
            | Term::Exp { mult, .. } => mult.clone(),
            Term::Infinity(_) => Rational::one(),
        }
    }

    /// The exact-rational power, if this term's exponent isn't symbolic
    /// (anything other than `EX` group, plus `Exp` is excluded by
    /// definition — use [`Term::exponent`] for the general case).
    pub fn power(&self) -> Option<Exponent> {
        match self {
            Term::Sym { power, .. } | Term::Fn { power, .. } | Term::Prod { power, .. } => {
                Some(power.clone())
            }
            Term::Sum { power, .. } => Some(Exponent::Rational(power.clone())),
            Term::Num(_) | Term::Poly { .. } | Term::Exp { .. } | Term::Infinity(_) => None,
        }
    }

    pub fn fname(&self) -> Option<&str> {
        match self {
            Term::Fn { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn args(&self) -> &[Term] {
        match self {
            Term::Fn { args, .. } => args,
            _ => &[],
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Term::Sym { name, .. } => Some(name.as_str()),
            Term::Fn { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }
}
