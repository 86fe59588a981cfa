//! Normal-form transforms and traversal helpers (`spec.md` §3.2, §4.A).

use crate::core::number::Rational;
use crate::core::term::{Exponent, Term};

impl Term {
    /// Structural fingerprint used as a `TermMap` key (`spec.md` §3.1).
    ///
    /// This is the term rendered with its multiplier stripped to `1` — two
    /// terms that differ only by scalar multiple fingerprint identically,
    /// which is exactly what like-term collection in `crate::core::term::arithmetic`
    /// needs.
    pub fn fingerprint(&self) -> String {
        self.to_unit_multiplier().text()
    }

    /// `toUnitMultiplier()`: a structural copy with `multiplier = 1`.
    pub fn to_unit_multiplier(&self) -> Term {
        let mut t = self.clone();
        t.set_multiplier(Rational::one());
        t
    }

    /// `toLinear()`: a copy with `power = 1`.
    pub fn to_linear(&self) -> Term {
        match self.clone() {
            Term::Sym { name, mult, .. } => Term::Sym {
                name,
                power: Exponent::one(),
                mult,
            },
            Term::Fn {
                name, args, mult, ..
            } => Term::Fn {
                name,
                args,
                power: Exponent::one(),
                mult,
            },
            Term::Prod { factors, mult, .. } => Term::Prod {
                factors,
                power: Exponent::one(),
                mult,
            },
            Term::Sum { terms, mult, .. } => Term::Sum {
                terms,
                power: Rational::one(),
                mult,
            },
            other => other,
        }
    }

    /// `sqrt(x)^p` rewritten to `x^(p/2)` so rules can dispatch uniformly
    /// (`spec.md` §3.2 "sqrt-unwrap"). Returns `self` unchanged when it
    /// isn't a `sqrt(...)` application.
    pub fn unwrap_sqrt(&self) -> Term {
        if let Term::Fn {
            name, args, power, mult,
        } = self
        {
            if name == "sqrt" && args.len() == 1 {
                let inner = args[0].clone();
                let half = Rational::new(1, 2);
                let new_power = match power {
                    Exponent::Rational(r) => Exponent::Rational(r.clone() * half),
                    Exponent::Symbolic(t) => {
                        Exponent::Symbolic(Box::new((**t).clone().mul(Term::rational(1, 2))))
                    }
                };
                return match inner {
                    Term::Sym {
                        name: inner_name, ..
                    } => Term::Sym {
                        name: inner_name,
                        power: new_power,
                        mult: mult.clone(),
                    },
                    other => {
                        let mut raised = other.pow_exponent(new_power);
                        let m = raised.multiplier() * mult.clone();
                        raised.set_multiplier(m);
                        raised
                    }
                };
            }
        }
        self.clone()
    }

    fn pow_exponent(self, p: Exponent) -> Term {
        match p {
            Exponent::Rational(r) => self.pow_rational(&r),
            Exponent::Symbolic(t) => Term::Exp {
                base: Box::new(self.to_unit_multiplier()),
                exponent: t,
                mult: Rational::one(),
            },
        }
    }

    /// `updateHash()` in the source keeps a cached fingerprint consistent
    /// after an in-place identity-preserving mutation. This implementation
    /// never caches the fingerprint (`fingerprint()` always recomputes), so
    /// there is nothing to invalidate — this is a deliberate no-op kept for
    /// call-site symmetry with the spec's lifecycle description
    /// (`spec.md` §3.2).
    pub fn update_hash(&mut self) {}

    /// `collectSymbols()`: flatten a product into its ordered factor list
    /// (with the scalar multiplier attached to the first factor so the
    /// product of the list reconstructs `self`).
    pub fn collect_symbols(&self) -> Vec<Term> {
        match self {
            Term::Prod { factors, mult, .. } => {
                let mut out: Vec<Term> = factors.values().cloned().collect();
                if let Some(first) = out.first_mut() {
                    let m = first.multiplier() * mult.clone();
                    first.set_multiplier(m);
                } else {
                    out.push(Term::Num(mult.clone()));
                }
                out
            }
            other => vec![other.clone()],
        }
    }

    /// `each(callback, flat?)`: iterate immediate (or, if `flat`, all
    /// transitively nested same-kind) children.
    pub fn each<F: FnMut(&Term)>(&self, mut callback: F, flat: bool) {
        match self {
            Term::Prod { factors, .. } => {
                for f in factors.values() {
                    if flat {
                        if let Term::Prod { .. } = f {
                            f.each(|c| callback(c), true);
                            continue;
                        }
                    }
                    callback(f);
                }
            }
            Term::Sum { terms, .. } => {
                for t in terms.values() {
                    if flat {
                        if let Term::Sum { .. } = t {
                            t.each(|c| callback(c), true);
                            continue;
                        }
                    }
                    callback(t);
                }
            }
            Term::Fn { args, .. } => {
                for a in args {
                    callback(a);
                }
            }
            Term::Exp { base, exponent, .. } => {
                callback(base);
                callback(exponent);
            }
            Term::Poly { base, .. } => callback(base),
            _ => {}
        }
    }

    /// Capture-safe substitution: replace every occurrence of `old` with
    /// `new` (`spec.md` §4.A `sub(old, new)`). Matching is structural on the
    /// unit-multiplier form so `2*x` substitutes inside `6*x` correctly.
    pub fn sub(&self, old: &Term, new: &Term) -> Term {
        if self.to_unit_multiplier() == old.to_unit_multiplier() {
            let scale = if old.to_unit_multiplier() == *old {
                Rational::one()
            } else {
                self.multiplier()
                    .clone()
                    .div_checked(&old.multiplier())
                    .unwrap_or_else(Rational::one)
            };
            let mut replaced = new.clone();
            let m = replaced.multiplier() * scale;
            replaced.set_multiplier(m);
            return replaced;
        }
        match self {
            Term::Sym { name, power, mult } => {
                if old.to_unit_multiplier() == Term::symbol(name.clone()) {
                    let raised = match power {
                        Exponent::Rational(r) => new.clone().pow_rational(r),
                        Exponent::Symbolic(p) => new.clone().pow((**p).clone()),
                    };
                    raised.scaled(mult.clone())
                } else {
                    self.clone()
                }
            }
            Term::Fn {
                name, args, power, mult,
            } => Term::Fn {
                name: name.clone(),
                args: args.iter().map(|a| a.sub(old, new)).collect(),
                power: power.clone(),
                mult: mult.clone(),
            },
            Term::Prod {
                factors, power, mult,
            } => {
                let mut result = Term::Num(mult.clone());
                for f in factors.values() {
                    result = result.mul(f.sub(old, new));
                }
                if let Exponent::Rational(r) = power {
                    if !r.is_one() {
                        result = result.pow_rational(r);
                    }
                }
                result
            }
            Term::Sum { terms, mult, .. } => {
                let mut result = Term::zero();
                for t in terms.values() {
                    result = result.add(t.sub(old, new));
                }
                let m = result.multiplier() * mult.clone();
                result.set_multiplier(m);
                result
            }
            Term::Poly { base, coeffs, mult } => {
                let substituted_base = base.sub(old, new);
                let mut result = Term::zero();
                for (&power, coeff) in coeffs {
                    result = result.add(substituted_base.clone().pow_rational(&Rational::from_int(power)).scaled(coeff.clone()));
                }
                result.scaled_mut(mult.clone());
                result
            }
            Term::Exp {
                base,
                exponent,
                mult,
            } => {
                let b = base.sub(old, new);
                let e = exponent.sub(old, new);
                Term::Exp {
                    base: Box::new(b),
                    exponent: Box::new(e),
                    mult: mult.clone(),
                }
            }
            other => other.clone(),
        }
    }

    pub(crate) fn scaled(&self, r: Rational) -> Term {
        let mut t = self.clone();
        let m = t.multiplier() * r;
        t.set_multiplier(m);
        t
    }

    pub(crate) fn scaled_mut(&mut self, r: Rational) {
        let m = self.multiplier() * r;
        self.set_multiplier(m);
    }
}

impl Rational {
    /// Checked division returning `None` on a zero divisor, used by
    /// substitution's scale-factor recovery instead of panicking.
    pub fn div_checked(&self, other: &Rational) -> Option<Rational> {
        if other.is_zero() {
            None
        } else {
            Some(self.clone() / other.clone())
        }
    }
}
