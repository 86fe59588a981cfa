//! Classification predicates and scalar-extraction helpers (`spec.md` §4.A).

use crate::config::function_names as fname;
use crate::core::number::Rational;
use crate::core::term::{Exponent, Group, Sign, Term};

const TRIG: &[&str] = &["sin", "cos", "tan", "sec", "csc", "cot"];
const INVERSE_TRIG: &[&str] = &["asin", "acos", "atan", "asec", "acsc", "acot"];

/// `inHTrig` — deliberately preserves the source defect flagged in
/// `spec.md` §9: the inverse-hyperbolic names `acsch`/`asech`/`acoth` are
/// listed alongside the hyperbolic ones. See `tests/known_defects.rs`.
const H_TRIG: &[&str] = &["sinh", "cosh", "tanh", "acsch", "asech", "acoth"];

pub fn in_trig(name: &str) -> bool {
    TRIG.contains(&name)
}

pub fn in_inverse_trig(name: &str) -> bool {
    INVERSE_TRIG.contains(&name)
}

/// See the `H_TRIG` doc comment: this mirrors the known source defect
/// verbatim rather than "fixing" it.
pub fn in_h_trig(name: &str) -> bool {
    H_TRIG.contains(&name)
}

impl Term {
    /// Does this term reference `var`? `deep` also looks inside function
    /// arguments of nested composites (always true in practice here, since
    /// there is no shallow-only traversal that would be useful to callers;
    /// kept as a parameter to match the spec's `contains(varName, deep?)`
    /// signature).
    pub fn contains(&self, var: &str, _deep: bool) -> bool {
        match self {
            Term::Num(_) | Term::Infinity(_) => false,
            Term::Sym { name, power, .. } => {
                name == var || matches!(power, Exponent::Symbolic(t) if t.contains(var, true))
            }
            Term::Fn { args, power, .. } => {
                args.iter().any(|a| a.contains(var, true))
                    || matches!(power, Exponent::Symbolic(t) if t.contains(var, true))
            }
            Term::Prod { factors, power, .. } => {
                factors.values().any(|f| f.contains(var, true))
                    || matches!(power, Exponent::Symbolic(t) if t.contains(var, true))
            }
            Term::Sum { terms, .. } => terms.values().any(|t| t.contains(var, true)),
            Term::Poly { base, .. } => base.contains(var, true),
            Term::Exp { base, exponent, .. } => {
                base.contains(var, true) || exponent.contains(var, true)
            }
        }
    }

    pub fn contains_function(&self, fn_name: &str) -> bool {
        match self {
            Term::Fn { name, args, .. } => {
                name == fn_name || args.iter().any(|a| a.contains_function(fn_name))
            }
            Term::Prod { factors, .. } => factors.values().any(|f| f.contains_function(fn_name)),
            Term::Sum { terms, .. } => terms.values().any(|t| t.contains_function(fn_name)),
            Term::Poly { base, .. } => base.contains_function(fn_name),
            Term::Exp { base, exponent, .. } => {
                base.contains_function(fn_name) || exponent.contains_function(fn_name)
            }
            Term::Num(_) | Term::Sym { .. } | Term::Infinity(_) => false,
        }
    }

    pub fn has_func(&self) -> bool {
        match self {
            Term::Fn { .. } => true,
            Term::Prod { factors, .. } => factors.values().any(|f| f.has_func()),
            Term::Sum { terms, .. } => terms.values().any(|t| t.has_func()),
            Term::Poly { base, .. } => base.has_func(),
            Term::Exp { base, exponent, .. } => base.has_func() || exponent.has_func(),
            _ => false,
        }
    }

    pub fn has_trig(&self) -> bool {
        match self {
            Term::Fn { name, args, .. } => {
                in_trig(name) || in_h_trig(name) || args.iter().any(|a| a.has_trig())
            }
            Term::Prod { factors, .. } => factors.values().any(|f| f.has_trig()),
            Term::Sum { terms, .. } => terms.values().any(|t| t.has_trig()),
            Term::Poly { base, .. } => base.has_trig(),
            Term::Exp { base, exponent, .. } => base.has_trig() || exponent.has_trig(),
            _ => false,
        }
    }

    pub fn has_integral(&self) -> bool {
        self.contains_function(fname::INTEGRATE) || self.contains_function(fname::DEFINT)
    }

    /// `isConstant(deep?)`: true if no free variable appears anywhere.
    pub fn is_constant(&self, deep: bool) -> bool {
        match self {
            Term::Num(_) | Term::Infinity(_) => true,
            Term::Sym { .. } => false,
            Term::Fn { args, .. } => {
                if !deep {
                    args.is_empty()
                } else {
                    args.iter().all(|a| a.is_constant(true))
                }
            }
            Term::Prod { factors, .. } => factors.values().all(|f| f.is_constant(deep)),
            Term::Sum { terms, .. } => terms.values().all(|t| t.is_constant(deep)),
            Term::Poly { .. } => false,
            Term::Exp { base, exponent, .. } => {
                base.is_constant(deep) && exponent.is_constant(deep)
            }
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.group(), Group::CB | Group::CP | Group::PL)
    }

    /// `isLinear([wrt])`: power exactly 1 (exponent-wise) with respect to
    /// the (optional) given variable; for composites, linear means every
    /// child is individually linear and the outer power is 1.
    pub fn is_linear(&self, wrt: Option<&str>) -> bool {
        let unit_power = match self.power() {
            Some(Exponent::Rational(r)) => r.is_one(),
            Some(Exponent::Symbolic(_)) => false,
            None => true,
        };
        if !unit_power {
            return false;
        }
        if let Some(v) = wrt {
            self.contains(v, true)
        } else {
            true
        }
    }

    pub fn is_e(&self) -> bool {
        matches!(self, Term::Sym { name, .. } if name == "e")
    }

    /// `isPoly(deep?)`: every exponent over the free variable is a
    /// non-negative integer.
    pub fn is_poly(&self, deep: bool) -> bool {
        match self {
            Term::Num(_) => true,
            Term::Sym { power, .. } => match power {
                Exponent::Rational(r) => r.is_integer() && !r.is_negative(),
                Exponent::Symbolic(_) => false,
            },
            Term::Poly { coeffs, .. } => coeffs.keys().all(|k| *k >= 0),
            Term::Sum { terms, power, .. } => {
                power.is_integer()
                    && !power.is_negative()
                    && (!deep || terms.values().all(|t| t.is_poly(true)))
            }
            Term::Prod { factors, power, .. } => match power {
                Exponent::Rational(r) if r.is_integer() && !r.is_negative() => {
                    !deep || factors.values().all(|f| f.is_poly(true))
                }
                _ => false,
            },
            Term::Fn { .. } | Term::Exp { .. } | Term::Infinity(_) => false,
        }
    }

    /// The factor of `self` that is independent of `var` (`spec.md` §4.A
    /// `stripVar`). For a product, this is the sub-product of dx-free
    /// factors; for anything dx-free, it's `self` itself; otherwise `1`.
    pub fn strip_var(&self, var: &str) -> Term {
        match self {
            Term::Prod { factors, mult, .. } => {
                let mut kept = Term::Num(mult.clone());
                for f in factors.values() {
                    if !f.contains(var, true) {
                        kept = kept.mul(f.clone());
                    }
                }
                kept
            }
            other => {
                if other.contains(var, true) {
                    Term::one()
                } else {
                    other.clone()
                }
            }
        }
    }

    /// Numerator of this term's multiplier, as a `Term`.
    pub fn get_num(&self) -> Term {
        Term::Num(Rational::from_int(
            self.multiplier().numer().to_string().parse().unwrap_or(0),
        ))
    }

    /// Denominator of this term's multiplier, as a `Term`.
    pub fn get_denom(&self) -> Term {
        Term::Num(Rational::from_int(
            self.multiplier()
                .denom()
                .to_string()
                .parse()
                .unwrap_or(1),
        ))
    }

    pub fn sign(&self) -> i32 {
        match self {
            Term::Infinity(Sign::Positive) => 1,
            Term::Infinity(Sign::Negative) => -1,
            _ => {
                let m = self.multiplier();
                if m.is_negative() {
                    -1
                } else if m.is_zero() {
                    0
                } else {
                    1
                }
            }
        }
    }

    pub fn abs(&self) -> Term {
        let mut t = self.clone();
        let m = t.multiplier().abs();
        t.set_multiplier(m);
        t
    }

    pub fn negate(&self) -> Term {
        let mut t = self.clone();
        let m = t.multiplier().negate();
        t.set_multiplier(m);
        t
    }

    pub(crate) fn set_multiplier(&mut self, new_mult: Rational) {
        match self {
            Term::Num(r) => *r = new_mult,
            Term::Sym { mult, .. }
            | Term::Fn { mult, .. }
            | Term::Prod { mult, .. }
            | Term::Sum { mult, .. }
            | Term::Poly { mult, .. }
            | Term::Exp { mult, .. } => *mult = new_mult,
            Term::Infinity(_) => {}
        }
    }

    /// First free variable encountered in a canonical (sorted) walk of the
    /// term, used whenever `diff`/`integrate`/`limit` are called with no
    /// explicit variable (`spec.md` §4.C, §4.D, §4.E).
    pub fn first_free_variable(&self) -> Option<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars.into_iter().next()
    }

    fn collect_variables(&self, out: &mut Vec<String>) {
        match self {
            Term::Num(_) | Term::Infinity(_) => {}
            Term::Sym { name, power, .. } => {
                out.push(name.clone());
                if let Exponent::Symbolic(t) = power {
                    t.collect_variables(out);
                }
            }
            Term::Fn { args, power, .. } => {
                for a in args {
                    a.collect_variables(out);
                }
                if let Exponent::Symbolic(t) = power {
                    t.collect_variables(out);
                }
            }
            Term::Prod { factors, power, .. } => {
                for f in factors.values() {
                    f.collect_variables(out);
                }
                if let Exponent::Symbolic(t) = power {
                    t.collect_variables(out);
                }
            }
            Term::Sum { terms, .. } => {
                for t in terms.values() {
                    t.collect_variables(out);
                }
            }
            Term::Poly { base, .. } => base.collect_variables(out),
            Term::Exp { base, exponent, .. } => {
                base.collect_variables(out);
                exponent.collect_variables(out);
            }
        }
    }

    pub fn equals(&self, other: &Term) -> bool {
        self == other
    }

    pub fn less_than(&self, other: &Term) -> bool {
        self.multiplier().less_than(&other.multiplier())
    }

    pub fn greater_than(&self, other: &Term) -> bool {
        self.multiplier().greater_than(&other.multiplier())
    }
}
