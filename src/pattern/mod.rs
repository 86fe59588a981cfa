//! Structural pattern helpers shared by the integrator and limit engine
//! (`spec.md` §4.B).

pub mod trig;

pub use trig::{fn_transform, trig_transform};

use crate::core::term::Term;

/// `decomposeArg(t, dx)` → `(a, x, a·x, b)`: writes `t` as `a·x + b` where
/// `x` is the `dx`-dependent core. Structurally neutral (`a = 1, b = 0`)
/// when `t` doesn't cleanly decompose into that shape.
pub struct Decomposed {
    pub a: Term,
    pub x: Term,
    pub ax: Term,
    pub b: Term,
}

pub fn decompose_arg(t: &Term, dx: &str) -> Decomposed {
    match t {
        Term::Sum { terms, power, mult } if power.is_one() => {
            let mut a = Term::one();
            let mut x = Term::zero();
            let mut b = Term::zero();
            for term in terms.values() {
                if term.contains(dx, true) {
                    a = term.strip_var(dx);
                    x = term.clone();
                    let unit = x.to_unit_multiplier();
                    x = unit;
                } else {
                    b = b.add(term.clone());
                }
            }
            let ax = x.clone().mul(a.clone());
            Decomposed {
                a: a.scaled(mult.clone()),
                x,
                ax,
                b: b.scaled(mult.clone()),
            }
        }
        other if other.contains(dx, true) => {
            let a = other.strip_var(dx);
            let x = other.to_unit_multiplier();
            let ax = other.clone();
            Decomposed {
                a,
                x,
                ax,
                b: Term::zero(),
            }
        }
        other => Decomposed {
            a: Term::one(),
            x: Term::zero(),
            ax: Term::zero(),
            b: other.clone(),
        },
    }
}

/// `allFunctions(arr)`: every element of `arr` is group FN.
pub fn all_functions(terms: &[Term]) -> bool {
    terms
        .iter()
        .all(|t| matches!(t, Term::Fn { .. }))
}

// `Term::scaled` (pub(crate), defined in `core::term::ops`) is visible here.
