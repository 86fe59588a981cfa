//! The limit engine (`spec.md` §4.F): direct substitution first, named
//! boundary cases for single-argument functions, L'Hopital (`divide`)
//! otherwise. Results are either a single value or a `[lo, hi]` interval
//! (`spec.md` §4.F: "Interval values are represented as a two-element
//! vector").

use crate::algebra;
use crate::calculus::derivatives;
use crate::config::EngineConfig;
use crate::core::number::Rational;
use crate::core::term::{Exponent, Sign, Term};

/// `limit(...)`'s result: a resolved value, or the `[lo, hi]` interval form
/// (`spec.md` §4.F).
#[derive(Clone, Debug, PartialEq)]
pub enum LimitValue {
    Value(Term),
    Interval(Term, Term),
}

impl LimitValue {
    pub fn diverges() -> Self {
        LimitValue::Interval(Term::infinity(Sign::Negative), Term::infinity(Sign::Positive))
    }

    /// `isConvergent`: false iff this is the full-∞ interval or still
    /// carries an unresolved `limit(...)` call.
    pub fn is_convergent(&self) -> bool {
        match self {
            LimitValue::Value(t) => !t.has_integral() && !t.contains_function("limit"),
            LimitValue::Interval(lo, hi) => {
                !(matches!(lo, Term::Infinity(Sign::Negative)) && matches!(hi, Term::Infinity(Sign::Positive)))
            }
        }
    }

    fn as_value(&self) -> Option<&Term> {
        match self {
            LimitValue::Value(t) => Some(t),
            LimitValue::Interval(..) => None,
        }
    }
}

fn placeholder(term: &Term, x: &str, c: &Term) -> Term {
    Term::function(
        crate::config::function_names::LIMIT,
        vec![term.clone(), Term::symbol(x), c.clone()],
    )
}

/// Splits a term into `(numerator, denominator)` by pulling out
/// negative-power `CB` factors or treating a `CP^-1` term as a bare
/// denominator (`spec.md` §4.F "split into numerator / denominator").
fn split_num_den(t: &Term) -> (Term, Term) {
    match t {
        Term::Prod { factors, power, mult } if power.is_one() => {
            let mut num = Term::Num(mult.clone());
            let mut den = Term::one();
            for f in factors.values() {
                match f.power() {
                    Some(Exponent::Rational(r)) if r.is_negative() => {
                        den = den.mul(f.clone().invert());
                    }
                    _ => num = num.mul(f.clone()),
                }
            }
            (num, den)
        }
        Term::Sum { terms, power, mult } if *power == Rational::new(-1, 1) => {
            let core = Term::Sum {
                terms: terms.clone(),
                power: Rational::one(),
                mult: Rational::one(),
            };
            (Term::Num(mult.clone()), core)
        }
        _ => match t.power() {
            Some(Exponent::Rational(r)) if r.is_negative() => {
                (Term::Num(t.multiplier()), t.to_unit_multiplier().invert())
            }
            _ => (t.clone(), Term::one()),
        },
    }
}

fn is_zero_value(v: &LimitValue) -> bool {
    matches!(v, LimitValue::Value(t) if t.equals(&Term::zero()))
}

fn is_infinite_value(v: &LimitValue) -> bool {
    matches!(v, LimitValue::Value(Term::Infinity(_))) || matches!(v, LimitValue::Interval(..))
}

/// `limit(term, x, c, depth)` (`spec.md` §4.F).
pub fn limit(term: &Term, x: &str, c: &Term, cfg: EngineConfig, depth: u32) -> LimitValue {
    if depth > cfg.max_lim_depth {
        return LimitValue::diverges();
    }
    let t = algebra::simplify(term);

    if let Term::Sum { terms, power, mult } = &t {
        if power.is_one() {
            let parts: Vec<LimitValue> = terms.values().map(|s| limit(s, x, c, cfg, depth + 1)).collect();
            if let Some(values) = parts.iter().map(LimitValue::as_value).collect::<Option<Vec<_>>>() {
                let sum = values.into_iter().cloned().fold(Term::zero(), |acc, v| acc.add(v));
                return LimitValue::Value(sum.mul(Term::Num(mult.clone())));
            }
            if parts.iter().filter(|p| is_infinite_value(p)).count() <= 1 {
                // One divergent addend, the rest finite: retry by
                // differentiating the whole sum once (`spec.md` §4.F "on
                // add failure, differentiate once and retry").
                let derivative = derivatives::nth_derivative(&t, x, 1);
                if derivative.text() != t.text() {
                    return limit(&derivative, x, c, cfg, depth + 1);
                }
            }
            return LimitValue::diverges();
        }
    }

    if let Term::Exp { base, exponent, mult } = &t {
        return limit_exp(base, exponent, mult.clone(), x, c, cfg, depth);
    }

    if let Term::Prod { factors, power, mult } = &t {
        if power.is_one() && factors.len() == 2 {
            let items: Vec<Term> = factors.values().cloned().collect();
            let scaled = items[0].clone().mul(Term::Num(mult.clone()));
            let l0 = limit(&scaled, x, c, cfg, depth + 1);
            let l1 = limit(&items[1], x, c, cfg, depth + 1);
            if (is_zero_value(&l0) && is_infinite_value(&l1)) || (is_infinite_value(&l0) && is_zero_value(&l1)) {
                // `0·∞`-shaped: rewrite as a quotient so `divide`'s
                // L'Hopital machinery can resolve it (`spec.md` §4.F
                // frames `divide` as the general indeterminate-form
                // resolver, not just for literal `a/b` terms).
                return divide(&scaled, &items[1].clone().invert(), x, c, cfg, depth);
            }
        }
    }

    let (num, den) = split_num_den(&t);
    if den.equals(&Term::one()) {
        return substitute_or_boundary(&t, x, c, cfg, depth);
    }
    if den.is_constant(true) {
        return substitute_or_boundary(&t, x, c, cfg, depth);
    }
    divide(&num, &den, x, c, cfg, depth)
}

/// `base^exponent` via log rewrite (`spec.md` §8.2 scenario 11,
/// `(1+1/x)^x → e`): resolves `limit(exponent·log(base), x, c)` — itself
/// routed back through [`limit`], so a `0·∞` product there is caught by the
/// indeterminate-product rewrite above — then exponentiates the result
/// back, `exp(L)`. An infinite or divergent inner limit just propagates.
fn limit_exp(base: &Term, exponent: &Term, mult: Rational, x: &str, c: &Term, cfg: EngineConfig, depth: u32) -> LimitValue {
    let log_base = Term::function(crate::config::function_names::LOG, vec![base.clone()]);
    let inner = exponent.clone().mul(log_base);
    match limit(&inner, x, c, cfg, depth + 1) {
        LimitValue::Value(v) => {
            let result = Term::Exp {
                base: Box::new(Term::symbol("e")),
                exponent: Box::new(v),
                mult,
            };
            LimitValue::Value(algebra::simplify(&result))
        }
        interval @ LimitValue::Interval(..) => interval,
    }
}

fn substitute_or_boundary(t: &Term, x: &str, c: &Term, cfg: EngineConfig, depth: u32) -> LimitValue {
    let substituted = t.sub(&Term::symbol(x), c);
    if !matches!(c, Term::Infinity(_)) && substituted.is_constant(true) && !substituted.has_integral() {
        let simplified = algebra::simplify(&substituted);
        return match simplified {
            Term::Num(_) => LimitValue::Value(simplified),
            other => {
                let value = crate::numeric::eval_constant(&other);
                LimitValue::Value(Term::Num(Rational::from_f64_approx(value)))
            }
        };
    }
    if let Term::Fn { name, args, .. } = t {
        let arg_limit = limit(&args[0], x, c, cfg, depth + 1);
        return apply_fn_boundary(name, &arg_limit);
    }
    LimitValue::Value(substituted)
}

/// Named boundary cases for a unary function whose argument's own limit is
/// known (`spec.md` §4.F).
fn apply_fn_boundary(name: &str, arg_limit: &LimitValue) -> LimitValue {
    match arg_limit {
        LimitValue::Interval(lo, hi) => LimitValue::Interval(lo.clone(), hi.clone()),
        LimitValue::Value(Term::Infinity(Sign::Positive)) => match name {
            "log" | "log10" => LimitValue::Value(Term::infinity(Sign::Positive)),
            "sin" | "cos" => LimitValue::Interval(Term::integer(-1), Term::integer(1)),
            "tan" => LimitValue::diverges(),
            "factorial" => LimitValue::Value(Term::infinity(Sign::Positive)),
            "atan" => LimitValue::Value(Term::symbol("pi").div(Term::integer(2))),
            _ => LimitValue::diverges(),
        },
        LimitValue::Value(Term::Infinity(Sign::Negative)) => match name {
            "log" | "log10" => LimitValue::diverges(),
            "sin" | "cos" => LimitValue::Interval(Term::integer(-1), Term::integer(1)),
            "atan" => LimitValue::Value(Term::symbol("pi").div(Term::integer(-2))),
            _ => LimitValue::diverges(),
        },
        LimitValue::Value(v) if v.equals(&Term::zero()) && name == "log" => {
            LimitValue::Value(Term::infinity(Sign::Negative))
        }
        LimitValue::Value(v) => {
            let applied = Term::function(name, vec![v.clone()]);
            if applied.is_constant(true) {
                let simplified = algebra::simplify(&applied);
                match simplified {
                    Term::Num(_) => LimitValue::Value(simplified),
                    other => {
                        let value = crate::numeric::eval_constant(&other);
                        LimitValue::Value(Term::Num(Rational::from_f64_approx(value)))
                    }
                }
            } else {
                LimitValue::Value(applied)
            }
        }
    }
}

/// `divide(f, g, x, c, depth)` — repeated L'Hopital (`spec.md` §4.F).
fn divide(f: &Term, g: &Term, x: &str, c: &Term, cfg: EngineConfig, depth: u32) -> LimitValue {
    if depth > cfg.max_lim_depth {
        return LimitValue::diverges();
    }
    // `x/|x|`-shaped denominator shortcut.
    if let Term::Fn { name, args, .. } = g {
        if name == "abs" && args.first().map(|a| a.text()) == Some(x.to_string()) {
            if matches!(c, Term::Infinity(_)) {
                let sign = f.sign();
                return LimitValue::Value(Term::integer(sign as i64));
            }
            if c.equals(&Term::zero()) {
                return LimitValue::Interval(Term::integer(-1), Term::integer(1));
            }
        }
    }

    let lf = limit(f, x, c, cfg, depth + 1);
    let lg = limit(g, x, c, cfg, depth + 1);

    let indeterminate = (is_zero_value(&lf) && is_zero_value(&lg)) || (is_infinite_value(&lf) && is_infinite_value(&lg));
    if indeterminate {
        let df = derivatives::nth_derivative(f, x, 1);
        let dg = derivatives::nth_derivative(g, x, 1);
        if df.text() == f.text() && dg.text() == g.text() {
            return LimitValue::diverges();
        }
        return divide(&df, &dg, x, c, cfg, depth + 1);
    }

    match (lf.as_value(), lg.as_value()) {
        (Some(vf), Some(vg)) if vg.equals(&Term::zero()) => resolve_vanishing_denominator(vf, g, x, c),
        (Some(vf), Some(vg)) => LimitValue::Value(vf.clone().div(vg.clone())),
        _ => LimitValue::diverges(),
    }
}

/// `g → 0` without `g` itself being the literal term `0` is a genuine pole
/// (`spec.md` §8.2 scenario 10, `1/x` at `x = 0`): whether the quotient
/// diverges to a single signed infinity or the full `[-∞, ∞]` interval
/// depends on whether `g` keeps one sign on both sides of `c`, which the
/// symbolic `sign()` of its *limit value* (always `0` here) can't tell.
/// Probes `g` numerically a small step either side of `c`, in the spirit of
/// the numeric kernel's framing as a service the symbolic layer leans on
/// (`spec.md` §6).
fn resolve_vanishing_denominator(vf: &Term, g: &Term, x: &str, c: &Term) -> LimitValue {
    let vf_sign = vf.sign();
    if vf_sign == 0 {
        return LimitValue::diverges();
    }
    if let Term::Num(c_num) = c {
        let c_f64 = c_num.to_f64();
        let probe = crate::numeric::compile(g, x);
        const H: f64 = 1e-6;
        let plus = probe(c_f64 + H);
        let minus = probe(c_f64 - H);
        if plus != 0.0 && minus != 0.0 {
            let right = vf_sign as f64 * plus.signum();
            let left = vf_sign as f64 * minus.signum();
            return if right > 0.0 && left > 0.0 {
                LimitValue::Value(Term::infinity(Sign::Positive))
            } else if right < 0.0 && left < 0.0 {
                LimitValue::Value(Term::infinity(Sign::Negative))
            } else {
                LimitValue::diverges()
            };
        }
    }
    match vf_sign {
        s if s < 0 => LimitValue::Value(Term::infinity(Sign::Negative)),
        s if s > 0 => LimitValue::Value(Term::infinity(Sign::Positive)),
        _ => LimitValue::diverges(),
    }
}
