//! Exact rational arithmetic (`spec.md` §3.1).
//!
//! Backed by `num-rational`/`num-bigint`, exactly the teacher crate's core
//! math dependency set (`mathhook-core/src/core/number.rs`). Unlike the
//! teacher's `Number` (which also carries `Integer`/`Float`/`BigInteger`
//! variants for performance), every numeric quantity in this engine is an
//! exact rational — `spec.md` never calls for an inexact fast path, and
//! introducing one would risk the termination/equality guarantees the
//! rewriter depends on.

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An exact rational number, always held in lowest terms with `den > 0`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rational(BigRational);

impl Rational {
    /// Construct from an integer.
    pub fn from_int(n: i64) -> Self {
        Rational(BigRational::from_integer(BigInt::from(n)))
    }

    /// Construct `num/den`, normalizing sign so `den > 0` (`spec.md` §3.1).
    ///
    /// # Panics
    /// Panics if `den == 0` — callers must check via [`CalcError::DivisionByZero`]
    /// before constructing.
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "Rational::new called with zero denominator");
        Rational(BigRational::new(BigInt::from(num), BigInt::from(den)))
    }

    pub fn zero() -> Self {
        Rational(BigRational::zero())
    }

    pub fn one() -> Self {
        Rational(BigRational::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// `den == 1` — the integer-ness test from `spec.md` §3.1.
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn negate(&self) -> Self {
        Rational(-self.0.clone())
    }

    pub fn invert(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Rational(self.0.recip()))
        }
    }

    pub fn abs(&self) -> Self {
        Rational(self.0.abs())
    }

    pub fn less_than(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    pub fn greater_than(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Best-effort conversion for numeric collaborators (quadrature,
    /// numeric sum/product expansion past `spec.md` §4.G's 200-term cutoff).
    pub fn to_f64(&self) -> f64 {
        let n = self.0.numer();
        let d = self.0.denom();
        n.to_string().parse::<f64>().unwrap_or(f64::NAN)
            / d.to_string().parse::<f64>().unwrap_or(1.0)
    }

    /// Exact `i64` if this rational is an integer and fits.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.0.numer().to_string().parse::<i64>().ok()
    }

    /// Best-effort rational approximation of an `f64`, used only by the
    /// numeric-quadrature fallback (`spec.md` §4.E) to keep every `Term`
    /// exact-rational even when the value came from `num_integrate`.
    pub fn from_f64_approx(x: f64) -> Self {
        if !x.is_finite() {
            return Rational::zero();
        }
        const SCALE: i64 = 1_000_000_000;
        let scaled = (x * SCALE as f64).round();
        if scaled.abs() >= i64::MAX as f64 {
            return Rational::zero();
        }
        Rational::new(scaled as i64, SCALE)
    }

    /// Integer square root check: `Some(r)` if `self = r*r` for rational `r`
    /// with integer numerator/denominator square roots.
    pub fn sqrt_exact(&self) -> Option<Self> {
        if self.is_negative() {
            return None;
        }
        let n = self.0.numer();
        let d = self.0.denom();
        let sn = n.sqrt();
        let sd = d.sqrt();
        if &(&sn * &sn) == n && &(&sd * &sd) == d {
            Some(Rational(BigRational::new(sn, sd)))
        } else {
            None
        }
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Rational {}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl Add for Rational {
    type Output = Rational;
    fn add(self, rhs: Self) -> Rational {
        Rational(self.0 + rhs.0)
    }
}
impl Sub for Rational {
    type Output = Rational;
    fn sub(self, rhs: Self) -> Rational {
        Rational(self.0 - rhs.0)
    }
}
impl Mul for Rational {
    type Output = Rational;
    fn mul(self, rhs: Self) -> Rational {
        Rational(self.0 * rhs.0)
    }
}
impl Div for Rational {
    type Output = Rational;
    fn div(self, rhs: Self) -> Rational {
        Rational(self.0 / rhs.0)
    }
}
impl Neg for Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl<'a> Add<&'a Rational> for &'a Rational {
    type Output = Rational;
    fn add(self, rhs: &'a Rational) -> Rational {
        Rational(self.0.clone() + rhs.0.clone())
    }
}
impl<'a> Sub<&'a Rational> for &'a Rational {
    type Output = Rational;
    fn sub(self, rhs: &'a Rational) -> Rational {
        Rational(self.0.clone() - rhs.0.clone())
    }
}
impl<'a> Mul<&'a Rational> for &'a Rational {
    type Output = Rational;
    fn mul(self, rhs: &'a Rational) -> Rational {
        Rational(self.0.clone() * rhs.0.clone())
    }
}
impl<'a> Div<&'a Rational> for &'a Rational {
    type Output = Rational;
    fn div(self, rhs: &'a Rational) -> Rational {
        Rational(self.0.clone() / rhs.0.clone())
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.0.numer())
        } else {
            write!(f, "{}/{}", self.0.numer(), self.0.denom())
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::from_int(n)
    }
}
