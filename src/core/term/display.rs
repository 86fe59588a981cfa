//! Deterministic infix rendering (`SPEC_FULL.md` §"Supplemented features").
//!
//! Not part of the distilled spec's public surface, but required by
//! `fingerprint()` (structural keys) and by by-parts cycle detection
//! (`spec.md` §4.D.P, which fingerprints `v * du` strings to notice when
//! integration by parts has looped back to its starting integrand).

use crate::core::number::Rational;
use crate::core::term::{Exponent, Term};
use std::fmt;

impl Term {
    /// Canonical text form. Children are rendered in `TermMap` (sorted
    /// fingerprint) order, which is what makes this suitable as a
    /// structural key — two terms built in different orders but equal
    /// after normalization render identically.
    pub fn text(&self) -> String {
        format!("{self}")
    }
}

fn fmt_mult_prefix(f: &mut fmt::Formatter<'_>, mult: &Rational) -> fmt::Result {
    if mult.is_one() {
        return Ok(());
    }
    if *mult == Rational::new(-1, 1) {
        return write!(f, "-");
    }
    write!(f, "{mult}*")
}

fn fmt_power_suffix(f: &mut fmt::Formatter<'_>, power: &Exponent) -> fmt::Result {
    match power {
        Exponent::Rational(r) if r.is_one() => Ok(()),
        Exponent::Rational(r) => write!(f, "^{r}"),
        Exponent::Symbolic(t) => write!(f, "^({t})"),
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Num(r) => write!(f, "{r}"),
            Term::Sym { name, power, mult } => {
                fmt_mult_prefix(f, mult)?;
                write!(f, "{name}")?;
                fmt_power_suffix(f, power)
            }
            Term::Fn {
                name, args, power, mult,
            } => {
                fmt_mult_prefix(f, mult)?;
                write!(f, "{name}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")?;
                fmt_power_suffix(f, power)
            }
            Term::Prod { factors, power, mult } => {
                fmt_mult_prefix(f, mult)?;
                write!(f, "(")?;
                for (i, factor) in factors.values().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    write!(f, "{factor}")?;
                }
                write!(f, ")")?;
                fmt_power_suffix(f, &power.clone())
            }
            Term::Sum { terms, power, mult } => {
                fmt_mult_prefix(f, mult)?;
                write!(f, "(")?;
                for (i, term) in terms.values().enumerate() {
                    if i > 0 {
                        write!(f, "+")?;
                    }
                    write!(f, "{term}")?;
                }
                write!(f, ")")?;
                fmt_power_suffix(f, &Exponent::Rational(power.clone()))
            }
            Term::Poly { base, coeffs, mult } => {
                fmt_mult_prefix(f, mult)?;
                write!(f, "poly(")?;
                write!(f, "{base}")?;
                for (exp, coeff) in coeffs {
                    write!(f, ",{exp}:{coeff}")?;
                }
                write!(f, ")")
            }
            Term::Exp { base, exponent, mult } => {
                fmt_mult_prefix(f, mult)?;
                write!(f, "{base}^({exponent})")
            }
            Term::Infinity(sign) => match sign {
                crate::core::term::Sign::Positive => write!(f, "Infinity"),
                crate::core::term::Sign::Negative => write!(f, "-Infinity"),
            },
        }
    }
}
