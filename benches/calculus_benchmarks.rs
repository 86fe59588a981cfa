//! Comprehensive calculus operation benchmarks.
//!
//! Tests derivatives, integrals, limits, and sums with varying complexity,
//! mirroring the derivative/integral/multivariable benchmark groups the
//! teacher crate runs for its own calculus layer.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::Duration;
use symcalc_core::prelude::*;

fn bench_derivatives(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivatives");
    let x = Term::symbol("x");

    for power in [2, 5, 10, 20, 50].iter() {
        let expr = x.clone().pow_rational(&Rational::from_int(*power));
        group.bench_with_input(BenchmarkId::new("power_rule", power), power, |b, _| {
            b.iter(|| black_box(expr.differentiate(Some("x"), None)))
        });
    }

    let product_expr = x
        .clone()
        .pow_rational(&Rational::from_int(2))
        .mul(Term::function("sin", vec![x.clone()]));
    group.bench_function("product_rule", |b| {
        b.iter(|| black_box(product_expr.differentiate(Some("x"), None)))
    });

    let chain_expr = Term::function("sin", vec![x.clone().pow_rational(&Rational::from_int(2))]);
    group.bench_function("chain_rule", |b| {
        b.iter(|| black_box(chain_expr.differentiate(Some("x"), None)))
    });

    for order in [1u32, 2, 3, 5].iter() {
        let expr = x.clone().pow_rational(&Rational::from_int(10));
        group.bench_with_input(BenchmarkId::new("higher_order", order), order, |b, &ord| {
            b.iter(|| black_box(expr.differentiate(Some("x"), Some(ord))))
        });
    }

    let trig_expr = Term::function("sin", vec![x.clone()]).add(Term::function("cos", vec![x.clone()]));
    group.bench_function("trigonometric_derivative", |b| {
        b.iter(|| black_box(trig_expr.differentiate(Some("x"), None)))
    });

    let exp_expr = Term::Exp {
        base: Box::new(Term::symbol("e")),
        exponent: Box::new(x.clone().mul(Term::integer(2))),
        mult: Rational::one(),
    };
    group.bench_function("exponential_derivative", |b| {
        b.iter(|| black_box(exp_expr.differentiate(Some("x"), None)))
    });

    let complex_expr = x
        .clone()
        .pow_rational(&Rational::from_int(3))
        .mul(Term::integer(3))
        .add(Term::function("sin", vec![x.clone()]).mul(Term::integer(-2)))
        .add(Term::Exp {
            base: Box::new(Term::symbol("e")),
            exponent: Box::new(x.clone()),
            mult: Rational::one(),
        });
    group.bench_function("complex_mixed_derivative", |b| {
        b.iter(|| black_box(complex_expr.differentiate(Some("x"), None)))
    });

    group.finish();
}

fn bench_integrals(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrals");
    let x = Term::symbol("x");
    let cfg = EngineConfig::default();

    for power in [1, 2, 5, 10].iter() {
        let expr = x.clone().pow_rational(&Rational::from_int(*power));
        group.bench_with_input(BenchmarkId::new("power_rule", power), power, |b, _| {
            b.iter(|| black_box(integrate(&expr, Some("x"), cfg)))
        });
    }

    let sin_expr = Term::function("sin", vec![x.clone()]);
    group.bench_function("trigonometric_integral_sin", |b| {
        b.iter(|| black_box(integrate(&sin_expr, Some("x"), cfg)))
    });

    let cos_expr = Term::function("cos", vec![x.clone()]);
    group.bench_function("trigonometric_integral_cos", |b| {
        b.iter(|| black_box(integrate(&cos_expr, Some("x"), cfg)))
    });

    let exp_expr = Term::Exp {
        base: Box::new(Term::symbol("e")),
        exponent: Box::new(x.clone()),
        mult: Rational::one(),
    };
    group.bench_function("exponential_integral", |b| {
        b.iter(|| black_box(integrate(&exp_expr, Some("x"), cfg)))
    });

    let rational_expr = x
        .clone()
        .pow_rational(&Rational::from_int(2))
        .add(Term::one())
        .pow_rational(&Rational::new(-1, 1));
    group.bench_function("rational_integral", |b| {
        b.iter(|| black_box(integrate(&rational_expr, Some("x"), cfg)))
    });

    for degree in [2, 5, 10].iter() {
        let mut poly_expr = Term::zero();
        for i in 0..=*degree {
            poly_expr = poly_expr.add(
                x.clone()
                    .pow_rational(&Rational::from_int(i))
                    .mul(Term::integer(i + 1)),
            );
        }
        group.bench_with_input(BenchmarkId::new("polynomial_integral", degree), degree, |b, _| {
            b.iter(|| black_box(integrate(&poly_expr, Some("x"), cfg)))
        });
    }

    let substitution_expr = x.clone().mul(Term::integer(2)).mul(Term::Exp {
        base: Box::new(Term::symbol("e")),
        exponent: Box::new(x.clone().pow_rational(&Rational::from_int(2))),
        mult: Rational::one(),
    });
    group.bench_function("substitution_integral", |b| {
        b.iter(|| black_box(integrate(&substitution_expr, Some("x"), cfg)))
    });

    let by_parts_expr = Term::Exp {
        base: Box::new(Term::symbol("e")),
        exponent: Box::new(x.clone()),
        mult: Rational::one(),
    }
    .mul(Term::function("sin", vec![x.clone()]));
    group.bench_function("by_parts_cyclic_integral", |b| {
        b.iter(|| black_box(integrate(&by_parts_expr, Some("x"), cfg)))
    });

    group.finish();
}

fn bench_limits(c: &mut Criterion) {
    let mut group = c.benchmark_group("limits");
    let x = Term::symbol("x");
    let cfg = EngineConfig::default();

    let sinc = Term::function("sin", vec![x.clone()]).div(x.clone());
    group.bench_function("lhopital_sinc_at_zero", |b| {
        b.iter(|| black_box(limit(&sinc, "x", &Term::zero(), cfg)))
    });

    let rational_at_infinity = x
        .clone()
        .pow_rational(&Rational::from_int(2))
        .add(Term::one())
        .div(x.clone().pow_rational(&Rational::from_int(2)).add(x.clone()));
    group.bench_function("rational_at_infinity", |b| {
        b.iter(|| {
            black_box(limit(
                &rational_at_infinity,
                "x",
                &Term::infinity(Sign::Positive),
                cfg,
            ))
        })
    });

    group.finish();
}

fn bench_sum_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_product");
    let i = Term::symbol("i");

    for n in [10, 50, 200].iter() {
        let body = i.clone().pow_rational(&Rational::from_int(2));
        group.bench_with_input(BenchmarkId::new("sum_of_squares", n), n, |b, &n| {
            b.iter(|| black_box(sum(&body, "i", &Term::one(), &Term::integer(n))))
        });
    }

    group.finish();
}

criterion_group!(
    name = calculus_benchmarks;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = bench_derivatives, bench_integrals, bench_limits, bench_sum_product
);

criterion_main!(calculus_benchmarks);
