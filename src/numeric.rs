//! Numeric kernel collaborator (`spec.md` §6: `Math2.num_integrate(f,a,b)`,
//! `build(term) → (x:number)→number`).
//!
//! A real composite-Simpson quadrature plus a term-to-closure compiler, so
//! `defint`'s numeric-fallback branch (`spec.md` §4.E) is exercisable.
//! Matches `spec.md`'s framing of the numeric kernel as "a service, not
//! part of the symbolic core" — this is the minimal real instance of it.

use crate::core::term::Term;

/// `build(term) → (x:number)→number`: compiles a single-variable term into
/// an `f64` closure, evaluated over the named variable.
pub fn compile<'a>(term: &'a Term, var: &'a str) -> impl Fn(f64) -> f64 + 'a {
    move |x: f64| eval(term, var, x)
}

/// Evaluates a term with no free variables to an `f64` (`spec.md` §4.E's
/// numeric-quadrature bounds).
pub fn eval_constant(term: &Term) -> f64 {
    eval(term, "", 0.0)
}

fn eval(term: &Term, var: &str, x: f64) -> f64 {
    match term {
        Term::Num(r) => r.to_f64(),
        Term::Sym { name, power, mult } => {
            let base = if name == var {
                x
            } else {
                match name.as_str() {
                    "e" => std::f64::consts::E,
                    "pi" => std::f64::consts::PI,
                    _ => 1.0,
                }
            };
            let p = power.as_rational().map(|r| r.to_f64()).unwrap_or(1.0);
            mult.to_f64() * base.powf(p)
        }
        Term::Fn { name, args, power, mult } => {
            let arg = args.first().map(|a| eval(a, var, x)).unwrap_or(0.0);
            let p = power.as_rational().map(|r| r.to_f64()).unwrap_or(1.0);
            let value = eval_fn(name, arg);
            mult.to_f64() * value.powf(p)
        }
        Term::Prod { factors, mult, .. } => {
            mult.to_f64() * factors.values().map(|f| eval(f, var, x)).product::<f64>()
        }
        Term::Sum { terms, power, mult } => {
            let base: f64 = terms.values().map(|t| eval(t, var, x)).sum();
            mult.to_f64() * base.powf(power.to_f64())
        }
        Term::Poly { base, coeffs, mult } => {
            let b = eval(base, var, x);
            let mut acc = 0.0;
            for (&exp, c) in coeffs {
                acc += c.to_f64() * b.powi(exp as i32);
            }
            mult.to_f64() * acc
        }
        Term::Exp { base, exponent, mult } => {
            mult.to_f64() * eval(base, var, x).powf(eval(exponent, var, x))
        }
        Term::Infinity(crate::core::term::Sign::Positive) => f64::INFINITY,
        Term::Infinity(crate::core::term::Sign::Negative) => f64::NEG_INFINITY,
    }
}

fn eval_fn(name: &str, x: f64) -> f64 {
    match name {
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "sec" => 1.0 / x.cos(),
        "csc" => 1.0 / x.sin(),
        "cot" => 1.0 / x.tan(),
        "asin" => x.asin(),
        "acos" => x.acos(),
        "atan" => x.atan(),
        "sinh" => x.sinh(),
        "cosh" => x.cosh(),
        "tanh" => x.tanh(),
        "log" => x.ln(),
        "log10" => x.log10(),
        "exp" => x.exp(),
        "sqrt" => x.sqrt(),
        "abs" => x.abs(),
        "sign" => x.signum(),
        "erf" => erf(x),
        _ => x,
    }
}

/// Abramowitz & Stegun 7.1.26 rational approximation, good to ~1.5e-7 —
/// sufficient for the numeric-fallback quadrature path, not a replacement
/// for an exact `erf` closed form elsewhere in the integrator.
fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;
    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();
    sign * y
}

/// `num_integrate(f, a, b)`: composite Simpson's rule over `n` subintervals.
pub fn num_integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64) -> f64 {
    const N: usize = 200;
    let h = (b - a) / N as f64;
    let mut sum = f(a) + f(b);
    for i in 1..N {
        let x = a + (i as f64) * h;
        sum += if i % 2 == 0 { 2.0 } else { 4.0 } * f(x);
    }
    sum * h / 3.0
}
